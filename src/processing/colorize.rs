// src/processing/colorize.rs
use rayon::prelude::*;
use tracing::{info, warn};

use super::colormap::{Colormap, Jet};
use super::stats::{percentile_range, ValueRange};
use crate::grid::RasterGrid;

pub const TRANSPARENT: [u8; 4] = [0, 0, 0, 0];

/// RGBA image, 4 bytes per pixel, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorImage {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u8>,
}

impl ColorImage {
    pub fn pixel(&self, col: usize, row: usize) -> [u8; 4] {
        let i = (row * self.width + col) * 4;
        [self.pixels[i], self.pixels[i + 1], self.pixels[i + 2], self.pixels[i + 3]]
    }

    pub fn pixels(&self) -> impl Iterator<Item = [u8; 4]> + '_ {
        self.pixels.chunks_exact(4).map(|p| [p[0], p[1], p[2], p[3]])
    }
}

/// Output of [`Colorizer::colorize`].
#[derive(Debug, Clone)]
pub struct Colorized {
    pub image: ColorImage,
    /// `None` when the grid holds no valid cells.
    pub range: Option<ValueRange>,
}

/// Percentile-stretches a grid and paints it through a colormap.
pub struct Colorizer<C: Colormap = Jet> {
    colormap: C,
    low_percentile: f64,
    high_percentile: f64,
}

impl Colorizer<Jet> {
    pub fn jet(low_percentile: f64, high_percentile: f64) -> Self {
        Self::new(Jet::new(), low_percentile, high_percentile)
    }
}

impl<C: Colormap> Colorizer<C> {
    pub fn new(colormap: C, low_percentile: f64, high_percentile: f64) -> Self {
        Self {
            colormap,
            low_percentile,
            high_percentile,
        }
    }

    /// Range of the valid cells between the configured percentiles.
    pub fn value_range(&self, grid: &RasterGrid) -> Option<ValueRange> {
        let valid: Vec<f64> = grid
            .data
            .par_iter()
            .copied()
            .filter(|&v| !grid.is_nodata(v))
            .collect();
        percentile_range(valid, self.low_percentile, self.high_percentile)
    }

    pub fn colorize(&self, grid: &RasterGrid) -> Colorized {
        let mut pixels = vec![0u8; grid.width * grid.height * 4];

        let range = self.value_range(grid);
        let Some(range) = range else {
            warn!("No valid cells to colorize, image will be fully transparent");
            return Colorized {
                image: ColorImage {
                    width: grid.width,
                    height: grid.height,
                    pixels,
                },
                range: None,
            };
        };

        if range.is_degenerate() {
            warn!("Degenerate value range {:?}, all valid cells share one color", range);
        }
        info!(
            "Stretching {} with p{}={:.3}, p{}={:.3}",
            self.colormap.name(),
            self.low_percentile,
            range.vmin,
            self.high_percentile,
            range.vmax
        );

        pixels
            .par_chunks_mut(4)
            .zip(grid.data.par_iter())
            .for_each(|(pixel, &value)| {
                if grid.is_nodata(value) {
                    pixel.copy_from_slice(&TRANSPARENT);
                } else {
                    let [r, g, b] = self.colormap.rgb(range.normalize(value));
                    pixel.copy_from_slice(&[r, g, b, 255]);
                }
            });

        Colorized {
            image: ColorImage {
                width: grid.width,
                height: grid.height,
                pixels,
            },
            range: Some(range),
        }
    }
}
