// src/map/document.rs
use std::fs;
use std::path::Path;

use itertools::Itertools;
use serde::Serialize;
use tracing::info;

use super::html::{escape, js_literal};
use super::legend::Legend;
use crate::error::{MapError, MapResult};
use crate::grid::BoundingBox;
use crate::utils::fs::replace_file;

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";
const GEOCODER_CSS: &str = "https://unpkg.com/leaflet-control-geocoder@2.4.0/dist/Control.Geocoder.css";
const GEOCODER_JS: &str = "https://unpkg.com/leaflet-control-geocoder@2.4.0/dist/Control.Geocoder.js";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub center: [f64; 2],
    pub zoom: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TileLayer {
    pub name: String,
    pub url: String,
    pub attribution: String,
    pub max_zoom: u8,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TileLayerOptions<'a> {
    attribution: &'a str,
    max_zoom: u8,
}

/// Address search box; a selected result recenters the map at `zoom`.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocoderControl {
    pub position: String,
    pub zoom: u8,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeocoderOptions<'a> {
    position: &'a str,
    default_mark_geocode: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageOverlay {
    pub name: String,
    /// URL of the image as seen from the HTML document.
    pub image_url: String,
    pub bounds: BoundingBox,
    pub opacity: f64,
}

#[derive(Serialize)]
struct ImageOverlayOptions {
    opacity: f64,
}

/// In-memory Leaflet map, rendered once to a standalone HTML page.
#[derive(Debug, Clone, PartialEq)]
pub struct MapDocument {
    pub title: String,
    pub view: MapView,
    pub tile_layers: Vec<TileLayer>,
    pub geocoder: Option<GeocoderControl>,
    pub overlays: Vec<ImageOverlay>,
    pub legend: Option<Legend>,
    pub layer_control: bool,
}

impl MapDocument {
    /// Empty map with no basemap selected.
    pub fn new(title: impl Into<String>, view: MapView) -> Self {
        Self {
            title: title.into(),
            view,
            tile_layers: Vec::new(),
            geocoder: None,
            overlays: Vec::new(),
            legend: None,
            layer_control: false,
        }
    }

    pub fn add_tile_layer(&mut self, layer: TileLayer) -> &mut Self {
        self.tile_layers.push(layer);
        self
    }

    pub fn set_geocoder(&mut self, geocoder: GeocoderControl) -> &mut Self {
        self.geocoder = Some(geocoder);
        self
    }

    pub fn add_overlay(&mut self, overlay: ImageOverlay) -> &mut Self {
        self.overlays.push(overlay);
        self
    }

    pub fn set_legend(&mut self, legend: Legend) -> &mut Self {
        self.legend = Some(legend);
        self
    }

    pub fn with_layer_control(&mut self) -> &mut Self {
        self.layer_control = true;
        self
    }

    fn script(&self) -> serde_json::Result<String> {
        let mut lines = Vec::new();

        lines.push(format!(
            "var map = L.map(\"map\", {});",
            js_literal(&self.view)?
        ));

        for (i, layer) in self.tile_layers.iter().enumerate() {
            let options = TileLayerOptions {
                attribution: &layer.attribution,
                max_zoom: layer.max_zoom,
            };
            lines.push(format!(
                "var tile_layer_{} = L.tileLayer({}, {}).addTo(map);",
                i,
                js_literal(&layer.url)?,
                js_literal(&options)?
            ));
        }

        if let Some(geocoder) = &self.geocoder {
            let options = GeocoderOptions {
                position: &geocoder.position,
                default_mark_geocode: false,
            };
            lines.push(format!(
                "L.Control.geocoder({}).on(\"markgeocode\", function (e) {{ map.setView(e.geocode.center, {}); }}).addTo(map);",
                js_literal(&options)?,
                geocoder.zoom
            ));
        }

        for (i, overlay) in self.overlays.iter().enumerate() {
            lines.push(format!(
                "var image_overlay_{} = L.imageOverlay({}, {}, {}).addTo(map);",
                i,
                js_literal(&overlay.image_url)?,
                js_literal(&overlay.bounds.to_leaflet())?,
                js_literal(&ImageOverlayOptions {
                    opacity: overlay.opacity
                })?
            ));
        }

        if self.layer_control {
            let base_layers = self
                .tile_layers
                .iter()
                .enumerate()
                .map(|(i, layer)| -> serde_json::Result<String> {
                    Ok(format!("{}: tile_layer_{}", js_literal(&layer.name)?, i))
                })
                .collect::<serde_json::Result<Vec<_>>>()?
                .join(", ");
            let overlays = self
                .overlays
                .iter()
                .enumerate()
                .map(|(i, overlay)| -> serde_json::Result<String> {
                    Ok(format!("{}: image_overlay_{}", js_literal(&overlay.name)?, i))
                })
                .collect::<serde_json::Result<Vec<_>>>()?
                .join(", ");
            lines.push(format!(
                "L.control.layers({{{}}}, {{{}}}).addTo(map);",
                base_layers, overlays
            ));
        }

        Ok(lines.iter().map(|line| format!("    {}", line)).join("\n"))
    }

    /// Standalone HTML page for this map.
    pub fn render(&self) -> serde_json::Result<String> {
        let mut head = vec![
            format!("<link rel=\"stylesheet\" href=\"{}\" />", LEAFLET_CSS),
            format!("<script src=\"{}\"></script>", LEAFLET_JS),
        ];
        if self.geocoder.is_some() {
            head.push(format!("<link rel=\"stylesheet\" href=\"{}\" />", GEOCODER_CSS));
            head.push(format!("<script src=\"{}\"></script>", GEOCODER_JS));
        }

        let legend = self.legend.as_ref().map(Legend::to_html).unwrap_or_default();

        Ok(format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
    <title>{title}</title>
    {head}
    <style>
        html, body {{ width: 100%; height: 100%; margin: 0; padding: 0; }}
        #map {{ position: absolute; top: 0; bottom: 0; left: 0; right: 0; }}
    </style>
</head>
<body>
<div id="map"></div>
{legend}<script>
{script}
</script>
</body>
</html>
"#,
            title = escape(&self.title),
            head = head.join("\n    "),
            legend = legend,
            script = self.script()?,
        ))
    }

    /// Render and write the page to `path`, replacing any previous file.
    pub fn save(&self, path: &Path) -> MapResult<()> {
        let html = self.render().map_err(|e| MapError::write(path, e))?;
        replace_file(path, |staging| fs::write(staging, html.as_bytes())).map_err(|e| MapError::write(path, e))?;
        info!("Saved map to {}", path.display());
        Ok(())
    }
}
