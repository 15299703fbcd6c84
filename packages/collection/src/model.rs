//! # GeoJSON Data Model
//!
//! Features created in the editor carry a typed `Point` geometry. Anything
//! read from a document keeps its original JSON so it serializes back
//! without being reshaped.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

/// Property mapping of a feature
pub type Properties = Map<String, Value>;

/// Geographic position in degrees (EPSG:4326)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinate {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from([lon, lat]: [f64; 2]) -> Self {
        Self { lon, lat }
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(c: Coordinate) -> Self {
        [c.lon, c.lat]
    }
}

/// Session-stable handle for a feature
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureId(String);

impl FeatureId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Feature geometry
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// Plain two-dimensional point
    Point(Coordinate),

    /// Any other validated GeoJSON geometry, kept as read
    Other(Value),
}

impl Geometry {
    pub fn type_name(&self) -> &str {
        match self {
            Geometry::Point(_) => "Point",
            Geometry::Other(value) => value
                .get("type")
                .and_then(Value::as_str)
                .unwrap_or("Unknown"),
        }
    }

    /// Location of a point geometry, including points kept as raw JSON
    /// (e.g. with an altitude or a bbox)
    pub fn as_point(&self) -> Option<Coordinate> {
        match self {
            Geometry::Point(c) => Some(*c),
            Geometry::Other(value) => {
                if value.get("type").and_then(Value::as_str) != Some("Point") {
                    return None;
                }
                value.get("coordinates").and_then(position)
            }
        }
    }

    /// Every position in the geometry, in document order
    pub fn positions(&self) -> Vec<Coordinate> {
        let mut out = Vec::new();
        match self {
            Geometry::Point(c) => out.push(*c),
            Geometry::Other(value) => collect_positions(value, &mut out),
        }
        out
    }
}

fn position(value: &Value) -> Option<Coordinate> {
    let arr = value.as_array()?;
    let lon = arr.first()?.as_f64()?;
    let lat = arr.get(1)?.as_f64()?;
    Some(Coordinate::new(lon, lat))
}

fn collect_positions(value: &Value, out: &mut Vec<Coordinate>) {
    if let Some(geometries) = value.get("geometries").and_then(Value::as_array) {
        for g in geometries {
            collect_positions(g, out);
        }
    } else if let Some(coords) = value.get("coordinates") {
        collect_nested(coords, out);
    }
}

fn collect_nested(value: &Value, out: &mut Vec<Coordinate>) {
    if let Some(c) = position(value) {
        out.push(c);
    } else if let Some(arr) = value.as_array() {
        for v in arr {
            collect_nested(v, out);
        }
    }
}

impl Serialize for Geometry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Geometry::Point(c) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "Point")?;
                map.serialize_entry("coordinates", c)?;
                map.end()
            }
            Geometry::Other(value) => value.serialize(serializer),
        }
    }
}

/// A single geometry + property record
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub id: FeatureId,

    /// GeoJSON `id` member written back on serialization
    pub external_id: Option<Value>,

    pub geometry: Option<Geometry>,

    pub properties: Properties,

    /// Members other than type/id/geometry/properties
    pub foreign_members: Map<String, Value>,
}

impl Feature {
    pub fn new(id: FeatureId, geometry: Option<Geometry>, properties: Properties) -> Self {
        Self {
            id,
            external_id: None,
            geometry,
            properties,
            foreign_members: Map::new(),
        }
    }

    pub fn with_external_id(mut self, external_id: Value) -> Self {
        self.external_id = Some(external_id);
        self
    }

    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    pub fn property_str(&self, name: &str) -> Option<&str> {
        self.properties.get(name).and_then(Value::as_str)
    }

    pub fn location(&self) -> Option<Coordinate> {
        self.geometry.as_ref().and_then(Geometry::as_point)
    }
}

impl Serialize for Feature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", "Feature")?;
        if let Some(id) = &self.external_id {
            map.serialize_entry("id", id)?;
        }
        map.serialize_entry("geometry", &self.geometry)?;
        map.serialize_entry("properties", &self.properties)?;
        for (key, value) in &self.foreign_members {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Ordered feature sequence plus pass-through top-level members
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
    pub foreign_members: Map<String, Value>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            features,
            foreign_members: Map::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Feature> {
        self.features.iter()
    }

    pub fn get(&self, id: &FeatureId) -> Option<&Feature> {
        self.features.iter().find(|f| &f.id == id)
    }

    pub fn contains(&self, id: &FeatureId) -> bool {
        self.get(id).is_some()
    }
}

impl Serialize for FeatureCollection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", "FeatureCollection")?;
        for (key, value) in &self.foreign_members {
            map.serialize_entry(key, value)?;
        }
        map.serialize_entry("features", &self.features)?;
        map.end()
    }
}
