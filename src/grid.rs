// src/grid.rs
use gdal::GeoTransform;

use crate::utils::geo_transform::array_bounds;

/// Used when the raster does not declare its own no-data value.
pub const FALLBACK_NODATA: f64 = -32000.0;

/// Geographic extent in the raster's CRS.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl BoundingBox {
    /// Leaflet corner order: `[[south, west], [north, east]]`.
    pub fn to_leaflet(&self) -> [[f64; 2]; 2] {
        [[self.south, self.west], [self.north, self.east]]
    }
}

/// Single band of samples, row-major, with its georeferencing.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterGrid {
    pub width: usize,
    pub height: usize,
    pub data: Vec<f64>,
    pub geo_transform: GeoTransform,
    pub nodata: f64,
}

impl RasterGrid {
    pub fn new(width: usize, height: usize, data: Vec<f64>, geo_transform: GeoTransform, nodata: f64) -> Self {
        debug_assert_eq!(data.len(), width * height);
        Self {
            width,
            height,
            data,
            geo_transform,
            nodata,
        }
    }

    #[inline]
    pub fn is_nodata(&self, value: f64) -> bool {
        value == self.nodata || value.is_nan()
    }

    pub fn valid_count(&self) -> usize {
        self.data.iter().filter(|&&v| !self.is_nodata(v)).count()
    }

    /// Extent of the grid, computed from its own transform and shape.
    pub fn bounds(&self) -> BoundingBox {
        let (west, south, east, north) = array_bounds(&self.geo_transform, self.width, self.height);
        BoundingBox {
            south,
            west,
            north,
            east,
        }
    }
}
