// src/io/mod.rs
pub mod raster;
pub mod vector;
pub mod writer;

pub use raster::{clip_raster, ClippedRaster};
pub use vector::{read_boundaries, BoundarySet};
pub use writer::write_png;
