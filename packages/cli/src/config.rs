use anyhow::{Context, Result};
use geomark_collection::{Coordinate, MarkerTemplate, DEFAULT_MARKER_ICON, DEFAULT_MARKER_INFO};
use geomark_editor::{ControllerOptions, DEFAULT_POPUP_FALLBACK};
use geomark_surface::headless::{
    SurfaceOptions, DEFAULT_FIT_PADDING, DEFAULT_HEIGHT, DEFAULT_HIT_TOLERANCE, DEFAULT_WIDTH,
    DEFAULT_ZOOM,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_NAME: &str = "geomark.config.json";

/// Geomark configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Properties stamped on placed markers
    #[serde(default)]
    pub marker: MarkerConfig,

    /// Popup text for markers without an `info` property
    #[serde(default = "default_popup_fallback")]
    pub popup_fallback: String,

    #[serde(default)]
    pub viewport: ViewportConfig,

    /// Click radius in pixels for hit-testing
    #[serde(default = "default_hit_tolerance")]
    pub hit_tolerance: f64,

    /// Padding in pixels when fitting the view to a collection
    #[serde(default = "default_fit_padding")]
    pub fit_padding: f64,

    /// File extensions accepted for loading
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerConfig {
    #[serde(default = "default_icon")]
    pub icon: String,

    #[serde(default = "default_info")]
    pub info: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportConfig {
    #[serde(default = "default_width")]
    pub width: f64,

    #[serde(default = "default_height")]
    pub height: f64,

    #[serde(default = "default_zoom")]
    pub zoom: f64,

    /// `[lon, lat]`
    #[serde(default)]
    pub center: [f64; 2],
}

fn default_popup_fallback() -> String {
    DEFAULT_POPUP_FALLBACK.to_string()
}

fn default_hit_tolerance() -> f64 {
    DEFAULT_HIT_TOLERANCE
}

fn default_fit_padding() -> f64 {
    DEFAULT_FIT_PADDING
}

fn default_extensions() -> Vec<String> {
    vec![".geojson".to_string()]
}

fn default_icon() -> String {
    DEFAULT_MARKER_ICON.to_string()
}

fn default_info() -> String {
    DEFAULT_MARKER_INFO.to_string()
}

fn default_width() -> f64 {
    DEFAULT_WIDTH
}

fn default_height() -> f64 {
    DEFAULT_HEIGHT
}

fn default_zoom() -> f64 {
    DEFAULT_ZOOM
}

impl Config {
    /// Load `explicit` if given, otherwise `geomark.config.json` in `cwd`
    /// when it exists, otherwise the defaults
    pub fn load(cwd: &Path, explicit: Option<&Path>) -> Result<Self> {
        let config_path = match explicit {
            Some(path) => cwd.join(path),
            None => {
                let path = cwd.join(DEFAULT_CONFIG_NAME);
                if !path.exists() {
                    return Ok(Config::default());
                }
                path
            }
        };

        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Cannot read config {}", config_path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config {}", config_path.display()))?;
        Ok(config)
    }

    /// Whether `path` passes the extension filter
    pub fn accepts(&self, path: &Path) -> bool {
        let name = match path.file_name() {
            Some(name) => name.to_string_lossy().to_lowercase(),
            None => return false,
        };
        self.extensions
            .iter()
            .any(|ext| name.ends_with(&ext.to_lowercase()))
    }

    pub fn marker_template(&self) -> MarkerTemplate {
        MarkerTemplate::new(&self.marker.icon, &self.marker.info)
    }

    pub fn controller_options(&self) -> ControllerOptions {
        ControllerOptions {
            markers: self.marker_template(),
            popup_fallback: self.popup_fallback.clone(),
        }
    }

    pub fn surface_options(&self) -> SurfaceOptions {
        let [lon, lat] = self.viewport.center;
        SurfaceOptions {
            width: self.viewport.width,
            height: self.viewport.height,
            center: Coordinate::new(lon, lat),
            zoom: self.viewport.zoom,
            hit_tolerance: self.hit_tolerance,
            fit_padding: self.fit_padding,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            marker: MarkerConfig::default(),
            popup_fallback: default_popup_fallback(),
            viewport: ViewportConfig::default(),
            hit_tolerance: default_hit_tolerance(),
            fit_padding: default_fit_padding(),
            extensions: default_extensions(),
        }
    }
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            icon: default_icon(),
            info: default_info(),
        }
    }
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            zoom: default_zoom(),
            center: [0.0, 0.0],
        }
    }
}
