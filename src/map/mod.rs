// src/map/mod.rs
//! Leaflet web map assembly.

pub mod document;
pub mod html;
pub mod legend;

use std::env;
use std::path::Path;

use pathdiff::diff_paths;

pub use document::{GeocoderControl, ImageOverlay, MapDocument, MapView, TileLayer};
pub use legend::Legend;

use crate::config::MapSettings;
use crate::grid::BoundingBox;

/// Href of `target` as seen from a page at `page`.
///
/// Mixed absolute/relative pairs are resolved against the working directory
/// first so the result is always a relative path.
pub fn relative_href(target: &Path, page: &Path) -> String {
    let page_dir = page.parent().unwrap_or_else(|| Path::new(""));

    let path = if target.is_absolute() == page_dir.is_absolute() {
        diff_paths(target, page_dir)
    } else {
        env::current_dir()
            .ok()
            .and_then(|cwd| diff_paths(cwd.join(target), cwd.join(page_dir)))
    }
    .unwrap_or_else(|| target.to_path_buf());

    let rendered = path.display().to_string();
    if cfg!(windows) {
        rendered.replace('\\', "/")
    } else {
        rendered
    }
}

/// Build the hardiness map: basemaps, geocoder, the PNG overlay anchored to
/// `bounds`, the legend and a layer switcher.
pub fn assemble(png_path: &Path, html_path: &Path, bounds: BoundingBox, settings: &MapSettings) -> MapDocument {
    let mut document = MapDocument::new(
        &settings.title,
        MapView {
            center: settings.center,
            zoom: settings.zoom,
        },
    );

    for tile in &settings.tile_layers {
        document.add_tile_layer(TileLayer {
            name: tile.name.clone(),
            url: tile.url.clone(),
            attribution: tile.attribution.clone(),
            max_zoom: tile.max_zoom,
        });
    }

    document
        .set_geocoder(GeocoderControl {
            position: settings.geocoder_position.clone(),
            zoom: settings.geocoder_zoom,
        })
        .add_overlay(ImageOverlay {
            name: settings.overlay_name.clone(),
            image_url: relative_href(png_path, html_path),
            bounds,
            opacity: settings.overlay_opacity,
        })
        .set_legend(Legend::new(&settings.legend_title, settings.legend_bins.clone()))
        .with_layer_control();

    document
}
