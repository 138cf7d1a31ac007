use std::path::{Path, PathBuf};

use hardiness_map::config::{MapSettings, PipelineConfig};
use hardiness_map::grid::{BoundingBox, RasterGrid, FALLBACK_NODATA};
use hardiness_map::map::{assemble, relative_href};
use hardiness_map::processing::colorize::TRANSPARENT;
use hardiness_map::processing::stats::{percentile_range, ValueRange};
use hardiness_map::processing::{Colormap, Colorizer, Jet};
use hardiness_map::MapError;

const NODATA: f64 = -999.0;
const LOW_END: [u8; 4] = [0, 0, 127, 255];
const HIGH_END: [u8; 4] = [127, 0, 0, 255];

/// Helper function to build a grid with a unit north-up transform
fn grid(width: usize, height: usize, data: Vec<f64>, nodata: f64) -> RasterGrid {
    RasterGrid::new(width, height, data, [-115.0, 1.0, 0.0, 45.0, 0.0, -1.0], nodata)
}

/// The 3x3 temperature block used across the scenario tests
fn scenario_values() -> Vec<f64> {
    vec![-25.0, -15.0, -15.0, -15.0, 0.0, 0.0, 10.0, 10.0, 12.0]
}

fn default_colorizer() -> Colorizer<Jet> {
    let settings = PipelineConfig::default().colorize;
    Colorizer::jet(settings.low_percentile, settings.high_percentile)
}

/// Percentiles interpolate linearly between neighbouring ranks
#[test]
fn test_percentile_range_interpolates() {
    let range = percentile_range(scenario_values(), 2.0, 98.0).unwrap();

    // rank 0.16 between -25 and -15, rank 7.84 between 10 and 12
    assert!((range.vmin - (-23.4)).abs() < 1e-9, "vmin = {}", range.vmin);
    assert!((range.vmax - 11.68).abs() < 1e-9, "vmax = {}", range.vmax);
}

#[test]
fn test_percentile_range_empty() {
    assert!(percentile_range(Vec::new(), 2.0, 98.0).is_none());
}

/// Rescaled values always land in [0, 1]
#[test]
fn test_normalize_is_clamped() {
    let range = ValueRange { vmin: -20.0, vmax: 10.0 };
    for value in [-500.0, -20.0, -5.0, 10.0, 500.0] {
        let t = range.normalize(value);
        assert!((0.0..=1.0).contains(&t), "{} -> {}", value, t);
    }
    assert_eq!(range.normalize(-500.0), 0.0);
    assert_eq!(range.normalize(500.0), 1.0);
    assert!((range.normalize(-5.0) - 0.5).abs() < 1e-12);
}

/// Scenario block: 3x3 opaque, min painted low-end, max painted high-end
#[test]
fn test_scenario_colors() {
    let colorized = default_colorizer().colorize(&grid(3, 3, scenario_values(), NODATA));
    let image = &colorized.image;

    assert_eq!((image.width, image.height), (3, 3));
    assert!(image.pixels().all(|p| p[3] == 255), "every cell should be opaque");
    assert_eq!(image.pixel(0, 0), LOW_END);
    assert_eq!(image.pixel(2, 2), HIGH_END);
}

/// No-data and NaN cells are fully transparent whatever their neighbours
#[test]
fn test_nodata_cells_are_transparent() {
    let mut data = vec![NODATA; 25];
    for (i, value) in scenario_values().into_iter().enumerate() {
        data[(i / 3 + 1) * 5 + (i % 3 + 1)] = value;
    }
    data[0] = f64::NAN;

    let source = grid(5, 5, data.clone(), NODATA);
    let colorized = default_colorizer().colorize(&source);

    for (value, pixel) in data.iter().zip(colorized.image.pixels()) {
        if source.is_nodata(*value) {
            assert_eq!(pixel, TRANSPARENT);
        } else {
            assert_eq!(pixel[3], 255);
        }
    }
    assert_eq!(colorized.image.pixel(1, 1), LOW_END);
    assert_eq!(colorized.image.pixel(3, 3), HIGH_END);
}

/// Identical valid values must not divide by zero and share one color
#[test]
fn test_degenerate_range_is_uniform() {
    let colorized = default_colorizer().colorize(&grid(2, 2, vec![7.0, 7.0, NODATA, 7.0], NODATA));
    let range = colorized.range.unwrap();
    assert!(range.is_degenerate());

    let opaque: Vec<[u8; 4]> = colorized.image.pixels().filter(|p| p[3] == 255).collect();
    assert_eq!(opaque.len(), 3);
    assert!(opaque.iter().all(|p| *p == LOW_END));
    assert_eq!(colorized.image.pixel(0, 1), TRANSPARENT);
}

/// Fallback sentinel is honoured like any declared no-data value
#[test]
fn test_fallback_sentinel_masks_cells() {
    let data = vec![FALLBACK_NODATA, -10.0, 0.0, 10.0];
    let colorized = default_colorizer().colorize(&grid(2, 2, data, FALLBACK_NODATA));

    assert_eq!(colorized.image.pixel(0, 0), TRANSPARENT);
    // the sentinel must not drag the stretch down
    assert!(colorized.range.unwrap().vmin > -11.0);
}

#[test]
fn test_all_nodata_is_transparent() {
    let colorized = default_colorizer().colorize(&grid(2, 1, vec![NODATA, f64::NAN], NODATA));
    assert!(colorized.range.is_none());
    assert!(colorized.image.pixels().all(|p| p == TRANSPARENT));
}

/// A single outlier must not compress the rest of the gradient
#[test]
fn test_outlier_does_not_wash_out_gradient() {
    let mut data: Vec<f64> = (0..99).map(|v| v as f64).collect();
    data.push(10_000.0);
    let colorized = default_colorizer().colorize(&grid(10, 10, data, NODATA));

    let range = colorized.range.unwrap();
    assert!(range.vmax < 100.0, "vmax {} should ignore the outlier", range.vmax);
    // mid value sits mid gradient, not at the low end
    assert_ne!(colorized.image.pixel(0, 5), LOW_END);
    assert_eq!(colorized.image.pixel(9, 9), HIGH_END);
}

/// Gradient ends are distinct: blue dominates the low end, red the high end
#[test]
fn test_gradient_ends_are_distinct() {
    let jet = Jet::new();
    let low = jet.rgb(0.0);
    let high = jet.rgb(1.0);

    assert_ne!(low, high);
    assert!(low[2] > low[0]);
    assert!(high[0] > high[2]);

    // red never decreases before the dark red tail
    let reds: Vec<u8> = (0..=88).map(|i| jet.rgb(i as f64 / 100.0)[0]).collect();
    assert!(reds.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_relative_href() {
    assert_eq!(relative_href(Path::new("overlay.png"), Path::new("index.html")), "overlay.png");
    assert_eq!(
        relative_href(Path::new("/srv/site/img/overlay.png"), Path::new("/srv/site/index.html")),
        "img/overlay.png"
    );
    assert_eq!(
        relative_href(Path::new("/data/overlay.png"), Path::new("/srv/site/index.html")),
        "../../data/overlay.png"
    );
    // sibling directories climb out of the page directory
    assert_eq!(
        relative_href(Path::new("out/overlay.png"), Path::new("site/index.html")),
        "../out/overlay.png"
    );
}

/// Helper function to resolve `..` segments without touching the filesystem
fn resolve(base: &Path, href: &str) -> PathBuf {
    let mut resolved = base.to_path_buf();
    for segment in href.split('/') {
        match segment {
            ".." => {
                resolved.pop();
            }
            "." | "" => {}
            name => resolved.push(name),
        }
    }
    resolved
}

/// An absolute PNG with a page given relative to the working directory
#[test]
fn test_relative_href_mixed_paths() {
    let href = relative_href(Path::new("/tmp/overlay.png"), Path::new("index.html"));
    assert!(!href.starts_with('/'), "href {} must stay relative", href);

    let cwd = std::env::current_dir().unwrap();
    assert_eq!(resolve(&cwd, &href), PathBuf::from("/tmp/overlay.png"));
}

/// The assembled page carries every element of the map
#[test]
fn test_map_document_html() {
    let bounds = BoundingBox {
        south: 42.0,
        west: -117.25,
        north: 49.0,
        east: -111.0,
    };
    let settings = MapSettings::default();
    let document = assemble(Path::new("overlay.png"), Path::new("index.html"), bounds, &settings);
    let html = document.render().unwrap();

    assert!(html.contains(r#"L.imageOverlay("overlay.png", [[42.0,-117.25],[49.0,-111.0]], {"opacity":0.5})"#));
    assert!(html.contains(r#"var map = L.map("map", {"center":[44.0682,-114.742],"zoom":6});"#));
    assert!(html.contains("L.Control.geocoder("));
    assert!(html.contains(r#""position":"topleft""#));
    assert!(html.contains("map.setView(e.geocode.center, 8)"));
    assert!(html.contains(r#"L.control.layers({"OpenStreetMap": tile_layer_0, "Esri World Street Map": tile_layer_1}, {"Idaho Climate Overlay": image_overlay_0})"#));

    // OpenStreetMap is added first so Esri ends up on top
    let osm = html.find("var tile_layer_0").unwrap();
    let esri = html.find("var tile_layer_1").unwrap();
    assert!(osm < esri);
    assert!(html[esri..].contains("arcgisonline"));

    assert!(html.contains("z-index: 9999"));
    assert!(html.contains("Mean Annual Extreme Low Temperature (F)"));
    assert_eq!(html.matches("display: inline-block;").count(), 5);
}

#[test]
fn test_legend_text_is_escaped() {
    let mut settings = MapSettings::default();
    settings.legend_title = "<script>alert(1)</script>".to_string();
    let bounds = BoundingBox { south: 0.0, west: 0.0, north: 1.0, east: 1.0 };
    let html = assemble(Path::new("a.png"), Path::new("b.html"), bounds, &settings)
        .render()
        .unwrap();

    assert!(!html.contains("<script>alert(1)</script>"));
    assert!(html.contains("&lt;script&gt;"));
}

#[test]
fn test_error_messages_name_stage_and_path() {
    let err = MapError::ClipEmpty {
        raster: "temps.tif".into(),
        boundaries: "counties.shp".into(),
    };
    assert_eq!(err.stage(), "raster clipper");
    let message = err.to_string();
    assert!(message.contains("temps.tif"));
    assert!(message.contains("counties.shp"));
}
