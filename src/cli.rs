use clap::Parser;
use std::path::PathBuf;
use tracing::Level;

use crate::config::PipelineConfig;

#[derive(Parser, Debug)]
#[command(name = "hardiness-map")]
#[command(version = crate::VERSION)]
#[command(about = "Clip a low-temperature raster to county boundaries and publish it as a web map")]
pub struct Cli {
    /// Input temperature raster
    #[arg(short, long)]
    pub raster: Option<PathBuf>,

    /// Boundary polygons used to clip the raster
    #[arg(short, long)]
    pub boundaries: Option<PathBuf>,

    /// Output PNG overlay path
    #[arg(long)]
    pub png: Option<PathBuf>,

    /// Output HTML map path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: Level,
}

impl Cli {
    /// Paths given on the command line take precedence over the config file.
    pub fn apply_overrides(&self, config: &mut PipelineConfig) {
        if let Some(raster) = &self.raster {
            config.paths.raster = raster.clone();
        }
        if let Some(boundaries) = &self.boundaries {
            config.paths.boundaries = boundaries.clone();
        }
        if let Some(png) = &self.png {
            config.paths.png = png.clone();
        }
        if let Some(output) = &self.output {
            config.paths.html = output.clone();
        }
    }
}
