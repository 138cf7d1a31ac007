// src/io/raster.rs
use std::path::Path;

use gdal::raster::rasterize;
use gdal::spatial_ref::SpatialRef;
use gdal::vector::Geometry;
use gdal::{Dataset, DriverManager, GeoTransform};
use tracing::{debug, info, warn};

use super::vector::{describe_crs, BoundarySet};
use crate::error::{MapError, MapResult};
use crate::grid::{RasterGrid, FALLBACK_NODATA};
use crate::utils::geo_transform::{pixel_window, window_transform, PixelWindow};

/// Result of masking a raster to a set of boundary polygons.
#[derive(Debug, Clone)]
pub struct ClippedRaster {
    pub grid: RasterGrid,
    /// Label of the raster CRS the grid (and its bounds) are expressed in.
    pub crs: Option<String>,
}

/// Everything needed from the raster file, extracted while it is open.
struct RasterInfo {
    size: (usize, usize),
    geo_transform: GeoTransform,
    crs: Option<SpatialRef>,
    nodata: f64,
}

fn read_info(dataset: &Dataset, path: &Path) -> MapResult<RasterInfo> {
    if dataset.raster_count() == 0 {
        return Err(MapError::raster_open(path, "dataset has no raster bands"));
    }
    let band = dataset.rasterband(1).map_err(|e| MapError::raster_open(path, e))?;
    let nodata = match band.no_data_value() {
        Some(value) => value,
        None => {
            debug!("No no-data value declared, using {}", FALLBACK_NODATA);
            FALLBACK_NODATA
        }
    };
    let geo_transform = dataset.geo_transform().map_err(|e| MapError::raster_open(path, e))?;

    Ok(RasterInfo {
        size: dataset.raster_size(),
        geo_transform,
        crs: dataset.spatial_ref().ok(),
        nodata,
    })
}

fn read_window(dataset: &Dataset, path: &Path, window: &PixelWindow) -> MapResult<Vec<f64>> {
    let band = dataset.rasterband(1).map_err(|e| MapError::raster_open(path, e))?;
    let buffer = band
        .read_as::<f64>(
            (window.col_off as isize, window.row_off as isize),
            (window.width, window.height),
            (window.width, window.height),
            None,
        )
        .map_err(|e| MapError::raster_open(path, e))?;
    let (_, data) = buffer.into_shape_and_vec();
    Ok(data)
}

/// Burn the polygons into a `width` x `height` in-memory mask (1 = inside).
fn rasterize_mask(
    geometries: &[Geometry],
    geo_transform: &GeoTransform,
    width: usize,
    height: usize,
) -> gdal::errors::Result<Vec<u8>> {
    let driver = DriverManager::get_driver_by_name("MEM")?;
    let mut mask_ds = driver.create_with_band_type::<u8, _>("", width, height, 1)?;
    mask_ds.set_geo_transform(geo_transform)?;

    let burn_values = vec![1.0; geometries.len()];
    rasterize(&mut mask_ds, &[1], geometries, &burn_values, None)?;

    let band = mask_ds.rasterband(1)?;
    let buffer = band.read_as::<u8>((0, 0), (width, height), (width, height), None)?;
    let (_, mask) = buffer.into_shape_and_vec();
    Ok(mask)
}

/// Boundaries expressed in the raster CRS, reprojecting only when the two differ.
fn align_boundaries(boundaries: &BoundarySet, raster_crs: Option<&SpatialRef>) -> MapResult<Option<BoundarySet>> {
    match (boundaries.crs.as_ref(), raster_crs) {
        (Some(vector_crs), Some(raster_crs)) if vector_crs != raster_crs => {
            info!(
                "Reprojecting boundaries {} -> {}",
                describe_crs(vector_crs),
                describe_crs(raster_crs)
            );
            boundaries.reproject(raster_crs).map(Some)
        }
        (Some(_), Some(_)) => Ok(None),
        (None, _) => {
            warn!("Boundaries declare no CRS, assuming raster coordinates");
            Ok(None)
        }
        (Some(_), None) => {
            warn!("Raster declares no CRS, assuming boundary coordinates match");
            Ok(None)
        }
    }
}

/// Mask and crop the first band of a raster to the union of the boundary polygons.
///
/// The raster handle is released before rasterization; all metadata is read
/// while it is open.
pub fn clip_raster(raster_path: &Path, boundaries: &BoundarySet) -> MapResult<ClippedRaster> {
    info!("Opening raster {}", raster_path.display());

    let clip_empty = || MapError::ClipEmpty {
        raster: raster_path.to_path_buf(),
        boundaries: boundaries.source.clone(),
    };

    let (raster_info, reprojected, window, values) = {
        let dataset = Dataset::open(raster_path).map_err(|e| MapError::raster_open(raster_path, e))?;
        let raster_info = read_info(&dataset, raster_path)?;

        match &raster_info.crs {
            Some(crs) => {
                info!("Raster CRS: {}", describe_crs(crs));
                if crs.is_projected() {
                    warn!("Raster CRS is projected; overlay bounds will not be geographic");
                }
            }
            None => warn!("Raster declares no CRS"),
        }
        debug!("Raster size {:?}, geotransform {:?}", raster_info.size, raster_info.geo_transform);

        let reprojected = align_boundaries(boundaries, raster_info.crs.as_ref())?;
        let aligned = reprojected.as_ref().unwrap_or(boundaries);

        let envelope = aligned.envelope().ok_or_else(clip_empty)?;
        let window = pixel_window(&raster_info.geo_transform, envelope, raster_info.size).ok_or_else(clip_empty)?;
        debug!("Clip window {:?}", window);

        let values = read_window(&dataset, raster_path, &window)?;
        (raster_info, reprojected, window, values)
    };

    let aligned = reprojected.as_ref().unwrap_or(boundaries);
    let geo_transform = window_transform(&raster_info.geo_transform, &window);
    let mask = rasterize_mask(&aligned.geometries, &geo_transform, window.width, window.height)
        .map_err(|e| MapError::raster_open(raster_path, format!("failed to rasterize boundaries: {}", e)))?;

    if mask.iter().all(|&inside| inside == 0) {
        return Err(clip_empty());
    }

    let data = values
        .into_iter()
        .zip(mask)
        .map(|(value, inside)| if inside == 0 { raster_info.nodata } else { value })
        .collect();
    let grid = RasterGrid::new(window.width, window.height, data, geo_transform, raster_info.nodata);

    let valid = grid.valid_count();
    if valid == 0 {
        warn!("Clipped raster contains only no-data cells");
    }
    info!(
        "Clipped raster to {}x{} ({} valid cells), bounds {:?}",
        grid.width,
        grid.height,
        valid,
        grid.bounds()
    );

    Ok(ClippedRaster {
        grid,
        crs: raster_info.crs.as_ref().map(describe_crs),
    })
}
