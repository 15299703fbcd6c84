//! Point markers placed by the editor.

use serde_json::Value;

use crate::id_generator::IdGenerator;
use crate::model::{Coordinate, Feature, Geometry, Properties};

pub const DEFAULT_MARKER_ICON: &str = "red-circle";
pub const DEFAULT_MARKER_INFO: &str = "New Icon";

/// Seed for ids of features created in a session, distinct from any file
const MARKER_SOURCE: &str = "geomark://markers";

/// Classification and placeholder properties of point markers
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerTemplate {
    pub icon: String,
    pub info: String,
}

impl MarkerTemplate {
    pub fn new(icon: impl Into<String>, info: impl Into<String>) -> Self {
        Self {
            icon: icon.into(),
            info: info.into(),
        }
    }

    /// Is `feature` a point marker of this kind
    pub fn matches(&self, feature: &Feature) -> bool {
        feature.property_str("icon") == Some(self.icon.as_str())
    }

    pub fn properties(&self) -> Properties {
        let mut properties = Properties::new();
        properties.insert("icon".to_string(), Value::String(self.icon.clone()));
        properties.insert("info".to_string(), Value::String(self.info.clone()));
        properties
    }
}

impl Default for MarkerTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_MARKER_ICON, DEFAULT_MARKER_INFO)
    }
}

/// Builds marker features with fresh ids
#[derive(Debug, Clone)]
pub struct MarkerFactory {
    template: MarkerTemplate,
    ids: IdGenerator,
}

impl MarkerFactory {
    pub fn new(template: MarkerTemplate) -> Self {
        Self {
            template,
            ids: IdGenerator::new(MARKER_SOURCE),
        }
    }

    pub fn template(&self) -> &MarkerTemplate {
        &self.template
    }

    /// A new marker at `at`. Its id doubles as the GeoJSON `id` member.
    pub fn create(&mut self, at: Coordinate) -> Feature {
        let id = self.ids.new_id();
        let external_id = Value::String(id.to_string());
        Feature::new(id, Some(Geometry::Point(at)), self.template.properties())
            .with_external_id(external_id)
    }
}

impl Default for MarkerFactory {
    fn default() -> Self {
        Self::new(MarkerTemplate::default())
    }
}
