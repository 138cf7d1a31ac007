// src/io/vector.rs
use std::path::{Path, PathBuf};

use gdal::spatial_ref::{AxisMappingStrategy, CoordTransform, SpatialRef};
use gdal::vector::{Geometry, LayerAccess, OGRwkbGeometryType};
use gdal::Dataset;
use tracing::{debug, info};

use crate::error::{MapError, MapResult};

/// Boundary polygons and the CRS their coordinates are expressed in.
#[derive(Debug)]
pub struct BoundarySet {
    pub source: PathBuf,
    pub geometries: Vec<Geometry>,
    pub crs: Option<SpatialRef>,
}

impl BoundarySet {
    pub fn new(source: impl Into<PathBuf>, geometries: Vec<Geometry>, crs: Option<SpatialRef>) -> Self {
        Self {
            source: source.into(),
            geometries,
            crs,
        }
    }

    pub fn len(&self) -> usize {
        self.geometries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.geometries.is_empty()
    }

    /// Union envelope `(min_x, min_y, max_x, max_y)` of every polygon.
    pub fn envelope(&self) -> Option<(f64, f64, f64, f64)> {
        self.geometries
            .iter()
            .map(|geometry| {
                let env = geometry.envelope();
                (env.MinX, env.MinY, env.MaxX, env.MaxY)
            })
            .reduce(|a, b| (a.0.min(b.0), a.1.min(b.1), a.2.max(b.2), a.3.max(b.3)))
    }

    /// Copy of this set with every coordinate transformed into `target`.
    pub fn reproject(&self, target: &SpatialRef) -> MapResult<BoundarySet> {
        let Some(source_crs) = &self.crs else {
            return Ok(BoundarySet::new(
                &self.source,
                self.geometries.clone(),
                Some(target.clone()),
            ));
        };

        let reproject_error = |message: String| MapError::Reproject {
            from: describe_crs(source_crs),
            to: describe_crs(target),
            message,
        };

        let mut from = source_crs.clone();
        from.set_axis_mapping_strategy(AxisMappingStrategy::TraditionalGisOrder);
        let mut to = target.clone();
        to.set_axis_mapping_strategy(AxisMappingStrategy::TraditionalGisOrder);

        let transform = CoordTransform::new(&from, &to).map_err(|e| reproject_error(e.to_string()))?;

        let mut geometries = Vec::with_capacity(self.geometries.len());
        for geometry in &self.geometries {
            let mut projected = geometry.clone();
            projected
                .transform_inplace(&transform)
                .map_err(|e| reproject_error(e.to_string()))?;
            geometries.push(projected);
        }

        Ok(BoundarySet::new(&self.source, geometries, Some(target.clone())))
    }
}

/// Short human readable label for a CRS, used in logs and error messages.
pub fn describe_crs(srs: &SpatialRef) -> String {
    match srs.auth_code() {
        Ok(code) => format!("EPSG:{}", code),
        Err(_) => srs
            .to_proj4()
            .map(|proj| proj.trim().to_string())
            .unwrap_or_else(|_| "unknown CRS".to_string()),
    }
}

/// Polygons and multipolygons, including their Z, M and ZM variants.
fn is_polygonal(geometry: &Geometry) -> bool {
    matches!(
        geometry.geometry_type(),
        OGRwkbGeometryType::wkbPolygon
            | OGRwkbGeometryType::wkbPolygon25D
            | OGRwkbGeometryType::wkbPolygonM
            | OGRwkbGeometryType::wkbPolygonZM
            | OGRwkbGeometryType::wkbMultiPolygon
            | OGRwkbGeometryType::wkbMultiPolygon25D
            | OGRwkbGeometryType::wkbMultiPolygonM
            | OGRwkbGeometryType::wkbMultiPolygonZM
    )
}

/// Read every polygon from the first layer of a vector file.
pub fn read_boundaries(path: &Path) -> MapResult<BoundarySet> {
    info!("Loading boundaries from {}", path.display());

    if !path.exists() {
        return Err(MapError::data_load(path, "file does not exist"));
    }

    let dataset = Dataset::open(path).map_err(|e| MapError::data_load(path, e))?;
    if dataset.layer_count() == 0 {
        return Err(MapError::data_load(path, "dataset has no vector layers"));
    }
    let mut layer = dataset.layer(0).map_err(|e| MapError::data_load(path, e))?;
    let crs = layer.spatial_ref();

    let mut geometries = Vec::new();
    let mut skipped = 0usize;
    for feature in layer.features() {
        match feature.geometry() {
            Some(geometry) if !geometry.is_empty() && is_polygonal(geometry) => {
                geometries.push(geometry.clone());
            }
            _ => skipped += 1,
        }
    }

    if skipped > 0 {
        debug!("Skipped {} features without polygon geometry", skipped);
    }
    if geometries.is_empty() {
        return Err(MapError::data_load(path, "no polygon geometries found"));
    }

    info!(
        "Loaded {} boundary polygons ({})",
        geometries.len(),
        crs.as_ref().map(describe_crs).unwrap_or_else(|| "no CRS".to_string())
    );

    Ok(BoundarySet::new(path, geometries, crs))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry(wkt: &str) -> Geometry {
        Geometry::from_wkt(wkt).unwrap()
    }

    #[test]
    fn test_polygon_variants_are_polygonal() {
        for wkt in [
            "POLYGON ((0 0, 1 0, 1 1, 0 0))",
            "POLYGON Z ((0 0 1, 1 0 1, 1 1 1, 0 0 1))",
            "POLYGON M ((0 0 5, 1 0 5, 1 1 5, 0 0 5))",
            "POLYGON ZM ((0 0 1 5, 1 0 1 5, 1 1 1 5, 0 0 1 5))",
            "MULTIPOLYGON (((0 0, 1 0, 1 1, 0 0)))",
            "MULTIPOLYGON Z (((0 0 1, 1 0 1, 1 1 1, 0 0 1)))",
        ] {
            assert!(is_polygonal(&geometry(wkt)), "{}", wkt);
        }
    }

    #[test]
    fn test_other_geometries_are_skipped() {
        for wkt in ["POINT (0 0)", "LINESTRING (0 0, 1 1)", "POINT Z (0 0 1)", "MULTILINESTRING ((0 0, 1 1))"] {
            assert!(!is_polygonal(&geometry(wkt)), "{}", wkt);
        }
    }
}
