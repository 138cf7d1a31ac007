// src/config.rs
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{MapError, MapResult};

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct PipelineConfig {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub colorize: ColorizeSettings,
    #[serde(default)]
    pub map: MapSettings,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct PathsConfig {
    #[serde(default = "default_raster")]
    pub raster: PathBuf,
    #[serde(default = "default_boundaries")]
    pub boundaries: PathBuf,
    #[serde(default = "default_png")]
    pub png: PathBuf,
    #[serde(default = "default_html")]
    pub html: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            raster: default_raster(),
            boundaries: default_boundaries(),
            png: default_png(),
            html: default_html(),
        }
    }
}

fn default_raster() -> PathBuf {
    PathBuf::from("Contiguous US/2023ConusNAD83_Clip.tif")
}

fn default_boundaries() -> PathBuf {
    PathBuf::from("Idaho_Counties/Idaho_Counties.shp")
}

fn default_png() -> PathBuf {
    PathBuf::from("idaho_colormap_transparent.png")
}

fn default_html() -> PathBuf {
    PathBuf::from("index.html")
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ColorizeSettings {
    #[serde(default = "default_low_percentile")]
    pub low_percentile: f64,
    #[serde(default = "default_high_percentile")]
    pub high_percentile: f64,
}

impl Default for ColorizeSettings {
    fn default() -> Self {
        Self {
            low_percentile: default_low_percentile(),
            high_percentile: default_high_percentile(),
        }
    }
}

fn default_low_percentile() -> f64 {
    2.0
}

fn default_high_percentile() -> f64 {
    98.0
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct TileLayerSettings {
    pub name: String,
    pub url: String,
    pub attribution: String,
    #[serde(default = "default_max_zoom")]
    pub max_zoom: u8,
}

fn default_max_zoom() -> u8 {
    18
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct LegendBin {
    pub label: String,
    /// Any CSS color.
    pub color: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct MapSettings {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_center")]
    pub center: [f64; 2],
    #[serde(default = "default_zoom")]
    pub zoom: u8,
    /// Added in order; the last one is drawn on top.
    #[serde(default = "default_tile_layers")]
    pub tile_layers: Vec<TileLayerSettings>,
    #[serde(default = "default_geocoder_position")]
    pub geocoder_position: String,
    #[serde(default = "default_geocoder_zoom")]
    pub geocoder_zoom: u8,
    #[serde(default = "default_overlay_name")]
    pub overlay_name: String,
    #[serde(default = "default_overlay_opacity")]
    pub overlay_opacity: f64,
    #[serde(default = "default_legend_title")]
    pub legend_title: String,
    #[serde(default = "default_legend_bins")]
    pub legend_bins: Vec<LegendBin>,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            title: default_title(),
            center: default_center(),
            zoom: default_zoom(),
            tile_layers: default_tile_layers(),
            geocoder_position: default_geocoder_position(),
            geocoder_zoom: default_geocoder_zoom(),
            overlay_name: default_overlay_name(),
            overlay_opacity: default_overlay_opacity(),
            legend_title: default_legend_title(),
            legend_bins: default_legend_bins(),
        }
    }
}

fn default_title() -> String {
    "Idaho Mean Annual Extreme Low Temperature".to_string()
}

fn default_center() -> [f64; 2] {
    [44.0682, -114.742]
}

fn default_zoom() -> u8 {
    6
}

fn default_tile_layers() -> Vec<TileLayerSettings> {
    vec![
        TileLayerSettings {
            name: "OpenStreetMap".to_string(),
            url: "https://tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution: "&copy; OpenStreetMap contributors".to_string(),
            max_zoom: 19,
        },
        TileLayerSettings {
            name: "Esri World Street Map".to_string(),
            url: "https://server.arcgisonline.com/ArcGIS/rest/services/World_Street_Map/MapServer/tile/{z}/{y}/{x}"
                .to_string(),
            attribution: "Tiles &copy; Esri".to_string(),
            max_zoom: default_max_zoom(),
        },
    ]
}

fn default_geocoder_position() -> String {
    "topleft".to_string()
}

fn default_geocoder_zoom() -> u8 {
    8
}

fn default_overlay_name() -> String {
    "Idaho Climate Overlay".to_string()
}

fn default_overlay_opacity() -> f64 {
    0.5
}

fn default_legend_title() -> String {
    "Mean Annual Extreme Low Temperature (F)".to_string()
}

fn default_legend_bins() -> Vec<LegendBin> {
    [
        ("-20 and below", "rgba(0, 0, 255, 0.5)"),
        ("-20 to -10", "rgba(0, 255, 200, 0.5)"),
        ("-10 to -5", "rgba(255, 230, 0, 0.5)"),
        ("-5 to 5", "rgba(255, 100, 0, 0.5)"),
        ("5 to 10", "rgba(220, 50, 50, 0.7)"),
    ]
    .into_iter()
    .map(|(label, color)| LegendBin {
        label: label.to_string(),
        color: color.to_string(),
    })
    .collect()
}

impl PipelineConfig {
    /// Read a JSON config; missing fields take their defaults.
    pub fn from_file(path: &Path) -> MapResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| MapError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        serde_json::from_str(&content).map_err(|e| MapError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}
