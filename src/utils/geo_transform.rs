// src/utils/geo_transform.rs
//! Affine geotransform helpers (GDAL coefficient order).
//!
//! `x = gt[0] + col * gt[1] + row * gt[2]`
//! `y = gt[3] + col * gt[4] + row * gt[5]`

use gdal::GeoTransform;

/// Slack applied before floor/ceil so coordinates that land exactly on a cell
/// edge do not pull in an extra row or column through rounding noise.
const EDGE_EPSILON: f64 = 1e-9;

/// A rectangular block of pixels inside a raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelWindow {
    pub col_off: usize,
    pub row_off: usize,
    pub width: usize,
    pub height: usize,
}

/// Map a pixel coordinate to a geographic coordinate.
pub fn apply(gt: &GeoTransform, col: f64, row: f64) -> (f64, f64) {
    (
        gt[0] + col * gt[1] + row * gt[2],
        gt[3] + col * gt[4] + row * gt[5],
    )
}

/// Inverse of the affine transform, or `None` if it is singular.
pub fn invert(gt: &GeoTransform) -> Option<GeoTransform> {
    let det = gt[1] * gt[5] - gt[2] * gt[4];
    if det.abs() < f64::EPSILON * 1e-6 || !det.is_finite() {
        return None;
    }
    let inv_det = 1.0 / det;
    let a = gt[5] * inv_det;
    let b = -gt[2] * inv_det;
    let d = -gt[4] * inv_det;
    let e = gt[1] * inv_det;
    Some([
        -gt[0] * a - gt[3] * b,
        a,
        b,
        -gt[0] * d - gt[3] * e,
        d,
        e,
    ])
}

/// Pixel window covering the envelope `(min_x, min_y, max_x, max_y)`,
/// intersected with a `raster_size` of `(width, height)`.
///
/// Returns `None` when the envelope does not overlap the raster.
pub fn pixel_window(
    gt: &GeoTransform,
    envelope: (f64, f64, f64, f64),
    raster_size: (usize, usize),
) -> Option<PixelWindow> {
    let inverse = invert(gt)?;
    let (min_x, min_y, max_x, max_y) = envelope;

    let corners = [
        apply(&inverse, min_x, min_y),
        apply(&inverse, min_x, max_y),
        apply(&inverse, max_x, min_y),
        apply(&inverse, max_x, max_y),
    ];
    let (mut col_min, mut row_min) = (f64::INFINITY, f64::INFINITY);
    let (mut col_max, mut row_max) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for (col, row) in corners {
        col_min = col_min.min(col);
        col_max = col_max.max(col);
        row_min = row_min.min(row);
        row_max = row_max.max(row);
    }
    if !(col_min.is_finite() && col_max.is_finite() && row_min.is_finite() && row_max.is_finite()) {
        return None;
    }

    let (width, height) = (raster_size.0 as f64, raster_size.1 as f64);
    let col_start = (col_min + EDGE_EPSILON).floor().clamp(0.0, width);
    let col_end = (col_max - EDGE_EPSILON).ceil().clamp(0.0, width);
    let row_start = (row_min + EDGE_EPSILON).floor().clamp(0.0, height);
    let row_end = (row_max - EDGE_EPSILON).ceil().clamp(0.0, height);

    if col_end <= col_start || row_end <= row_start {
        return None;
    }

    Some(PixelWindow {
        col_off: col_start as usize,
        row_off: row_start as usize,
        width: (col_end - col_start) as usize,
        height: (row_end - row_start) as usize,
    })
}

/// Geotransform of a window whose top-left pixel is `(col_off, row_off)`.
pub fn window_transform(gt: &GeoTransform, window: &PixelWindow) -> GeoTransform {
    let (x, y) = apply(gt, window.col_off as f64, window.row_off as f64);
    [x, gt[1], gt[2], y, gt[4], gt[5]]
}

/// Geographic extent `(west, south, east, north)` of a `width` x `height` grid.
pub fn array_bounds(gt: &GeoTransform, width: usize, height: usize) -> (f64, f64, f64, f64) {
    let (w, h) = (width as f64, height as f64);
    let corners = [
        apply(gt, 0.0, 0.0),
        apply(gt, w, 0.0),
        apply(gt, 0.0, h),
        apply(gt, w, h),
    ];
    corners.iter().fold(
        (f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        |(west, south, east, north), &(x, y)| (west.min(x), south.min(y), east.max(x), north.max(y)),
    )
}
