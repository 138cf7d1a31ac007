// src/processing/mod.rs
pub mod colorize;
pub mod colormap;
pub mod stats;

// Re-export main components
pub use colorize::{ColorImage, Colorized, Colorizer};
pub use colormap::{Colormap, Jet};
pub use stats::ValueRange;
