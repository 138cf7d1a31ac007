// src/io/writer.rs
use std::io;
use std::path::Path;

use image::{ImageBuffer, ImageFormat, Rgba};
use tracing::info;

use crate::error::{MapError, MapResult};
use crate::processing::ColorImage;
use crate::utils::fs::replace_file;

/// Encode an RGBA image as PNG at `output_path`, replacing any existing file.
pub fn write_png(image: &ColorImage, output_path: &Path) -> MapResult<()> {
    let width = u32::try_from(image.width).map_err(|e| MapError::encode(output_path, e))?;
    let height = u32::try_from(image.height).map_err(|e| MapError::encode(output_path, e))?;

    let buffer = ImageBuffer::<Rgba<u8>, &[u8]>::from_raw(width, height, &image.pixels[..]).ok_or_else(|| {
        MapError::encode(
            output_path,
            format!("pixel buffer does not match {}x{} RGBA", width, height),
        )
    })?;

    replace_file(output_path, |staging| {
        buffer
            .save_with_format(staging, ImageFormat::Png)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
    })
    .map_err(|e| MapError::encode(output_path, e))?;

    info!("Wrote {}x{} PNG to {}", width, height, output_path.display());
    Ok(())
}
