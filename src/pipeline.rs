// src/pipeline.rs
use std::path::PathBuf;

use tracing::{info, info_span};

use crate::config::PipelineConfig;
use crate::error::MapResult;
use crate::grid::BoundingBox;
use crate::io::{clip_raster, read_boundaries, write_png};
use crate::map::assemble;
use crate::processing::{Colorizer, ValueRange};

/// What a successful run produced.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub png_path: PathBuf,
    pub html_path: PathBuf,
    pub width: usize,
    pub height: usize,
    pub bounds: BoundingBox,
    pub crs: Option<String>,
    pub value_range: Option<ValueRange>,
}

/// Load, clip, colorize, write the PNG, then write the HTML map.
///
/// Stages run strictly in order; the first failure aborts the run, so a
/// failed clip writes nothing and a failed PNG write skips the HTML.
pub fn run(config: &PipelineConfig) -> MapResult<PipelineReport> {
    let paths = &config.paths;

    let boundaries = {
        let _stage = info_span!("vector_loader").entered();
        read_boundaries(&paths.boundaries)?
    };

    let clipped = {
        let _stage = info_span!("raster_clipper").entered();
        clip_raster(&paths.raster, &boundaries)?
    };
    let bounds = clipped.grid.bounds();

    let colorized = {
        let _stage = info_span!("colorizer").entered();
        Colorizer::jet(config.colorize.low_percentile, config.colorize.high_percentile).colorize(&clipped.grid)
    };

    {
        let _stage = info_span!("image_writer").entered();
        write_png(&colorized.image, &paths.png)?;
    }

    {
        let _stage = info_span!("map_assembler").entered();
        assemble(&paths.png, &paths.html, bounds, &config.map).save(&paths.html)?;
    }

    info!("Pipeline finished");
    Ok(PipelineReport {
        png_path: paths.png.clone(),
        html_path: paths.html.clone(),
        width: clipped.grid.width,
        height: clipped.grid.height,
        bounds,
        crs: clipped.crs,
        value_range: colorized.range,
    })
}
