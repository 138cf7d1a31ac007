// src/error.rs
//! Error taxonomy for the map pipeline.

use std::path::PathBuf;

use thiserror::Error;

pub type MapResult<T> = Result<T, MapError>;

/// Every failure is fatal and names the stage and file that caused it.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("[vector loader] failed to load boundaries from {path}: {message}")]
    DataLoad { path: PathBuf, message: String },

    #[error("[raster clipper] failed to open raster {path}: {message}")]
    RasterOpen { path: PathBuf, message: String },

    #[error("[raster clipper] failed to reproject boundaries {from} -> {to}: {message}")]
    Reproject {
        from: String,
        to: String,
        message: String,
    },

    #[error("[raster clipper] boundaries from {boundaries} do not overlap raster {raster}")]
    ClipEmpty { raster: PathBuf, boundaries: PathBuf },

    #[error("[image writer] failed to write PNG {path}: {message}")]
    Encode { path: PathBuf, message: String },

    #[error("[map assembler] failed to write HTML {path}: {message}")]
    Write { path: PathBuf, message: String },

    #[error("[config] invalid configuration {path}: {message}")]
    Config { path: PathBuf, message: String },
}

impl MapError {
    /// Pipeline stage the error was raised in.
    pub fn stage(&self) -> &'static str {
        match self {
            MapError::DataLoad { .. } => "vector loader",
            MapError::RasterOpen { .. } | MapError::Reproject { .. } | MapError::ClipEmpty { .. } => {
                "raster clipper"
            }
            MapError::Encode { .. } => "image writer",
            MapError::Write { .. } => "map assembler",
            MapError::Config { .. } => "config",
        }
    }

    pub(crate) fn data_load(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        MapError::DataLoad {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub(crate) fn raster_open(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        MapError::RasterOpen {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub(crate) fn encode(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        MapError::Encode {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        MapError::Write {
            path: path.into(),
            message: message.to_string(),
        }
    }
}
