//! # GeoJSON Parser
//!
//! Validates a document as a GeoJSON `FeatureCollection` and converts it
//! into the session model. Every feature gets a fresh `FeatureId` from an
//! [`IdGenerator`] seeded with the source name. Geometries are validated
//! but kept as read.

use serde_json::{Map, Value};

use crate::error::{ParseError, ParseResult};
use crate::id_generator::IdGenerator;
use crate::model::{Feature, FeatureCollection, Geometry, Properties};

/// Parse raw text as a feature collection
pub fn parse_collection(raw: &str, source: &str) -> ParseResult<FeatureCollection> {
    let value: Value = serde_json::from_str(raw)?;
    Parser::new(source).parse_value(value)
}

pub struct Parser {
    ids: IdGenerator,
}

impl Parser {
    pub fn new(source: &str) -> Self {
        Self {
            ids: IdGenerator::new(source),
        }
    }

    pub fn parse_value(&mut self, value: Value) -> ParseResult<FeatureCollection> {
        let mut object = match value {
            Value::Object(object) => object,
            other => return Err(ParseError::not_a_feature_collection(json_kind(&other))),
        };

        match object.remove("type") {
            Some(Value::String(t)) if t == "FeatureCollection" => {}
            Some(Value::String(t)) => return Err(ParseError::not_a_feature_collection(t)),
            Some(other) => return Err(ParseError::not_a_feature_collection(json_kind(&other))),
            None => return Err(ParseError::not_a_feature_collection("an object without \"type\"")),
        }

        let raw_features = match object.remove("features") {
            Some(Value::Array(features)) => features,
            _ => return Err(ParseError::MissingFeatures),
        };

        let features = raw_features
            .into_iter()
            .enumerate()
            .map(|(index, value)| self.parse_feature(index, value))
            .collect::<ParseResult<Vec<_>>>()?;

        Ok(FeatureCollection {
            features,
            foreign_members: object,
        })
    }

    fn parse_feature(&mut self, index: usize, value: Value) -> ParseResult<Feature> {
        let mut object = match value {
            Value::Object(object) => object,
            other => {
                return Err(ParseError::invalid_feature(
                    index,
                    format!("expected an object, found {}", json_kind(&other)),
                ))
            }
        };

        match object.remove("type") {
            Some(Value::String(t)) if t == "Feature" => {}
            Some(Value::String(t)) => {
                return Err(ParseError::invalid_feature(
                    index,
                    format!("expected type \"Feature\", found \"{}\"", t),
                ))
            }
            _ => return Err(ParseError::invalid_feature(index, "missing \"type\"")),
        }

        let external_id = match object.remove("id") {
            None => None,
            Some(id @ (Value::String(_) | Value::Number(_))) => Some(id),
            Some(other) => {
                return Err(ParseError::invalid_feature(
                    index,
                    format!("\"id\" must be a string or number, found {}", json_kind(&other)),
                ))
            }
        };

        let geometry = match object.remove("geometry") {
            None | Some(Value::Null) => None,
            Some(value) => Some(parse_geometry(index, value)?),
        };

        let properties: Properties = match object.remove("properties") {
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(properties)) => properties,
            Some(other) => {
                return Err(ParseError::invalid_feature(
                    index,
                    format!("\"properties\" must be an object, found {}", json_kind(&other)),
                ))
            }
        };

        Ok(Feature {
            id: self.ids.new_id(),
            external_id,
            geometry,
            properties,
            foreign_members: object,
        })
    }
}

fn parse_geometry(index: usize, value: Value) -> ParseResult<Geometry> {
    validate_geometry(&value).map_err(|message| ParseError::invalid_geometry(index, message))?;
    Ok(Geometry::Other(value))
}

fn validate_geometry(value: &Value) -> Result<(), String> {
    let object = value
        .as_object()
        .ok_or_else(|| format!("expected an object, found {}", json_kind(value)))?;

    let kind = object
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| "missing \"type\"".to_string())?;

    let depth = match kind {
        "Point" => 0,
        "MultiPoint" | "LineString" => 1,
        "MultiLineString" | "Polygon" => 2,
        "MultiPolygon" => 3,
        "GeometryCollection" => {
            let geometries = object
                .get("geometries")
                .and_then(Value::as_array)
                .ok_or_else(|| "GeometryCollection without \"geometries\" array".to_string())?;
            return geometries.iter().try_for_each(validate_geometry);
        }
        other => return Err(format!("unknown geometry type \"{}\"", other)),
    };

    let coordinates = object
        .get("coordinates")
        .ok_or_else(|| format!("{} without \"coordinates\"", kind))?;
    validate_coordinates(coordinates, depth).map_err(|message| format!("{}: {}", kind, message))
}

fn validate_coordinates(value: &Value, depth: usize) -> Result<(), String> {
    let arr = value
        .as_array()
        .ok_or_else(|| format!("expected an array, found {}", json_kind(value)))?;

    if depth == 0 {
        if arr.len() < 2 || !arr.iter().all(Value::is_number) {
            return Err("a position needs at least two numbers".to_string());
        }
        return Ok(());
    }

    arr.iter()
        .try_for_each(|inner| validate_coordinates(inner, depth - 1))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
