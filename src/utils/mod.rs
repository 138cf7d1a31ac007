// src/utils/mod.rs
pub mod fs;
pub mod geo_transform;
