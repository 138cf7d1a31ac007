// src/lib.rs
pub mod cli;
pub mod config;
pub mod error;
pub mod grid;
pub mod io;
pub mod map;
pub mod pipeline;
pub mod processing;
pub mod utils;

pub use error::{MapError, MapResult};

// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
