use crate::model::FeatureCollection;

/// Serialize a collection back to compact GeoJSON text
pub fn serialize(collection: &FeatureCollection) -> Result<String, serde_json::Error> {
    serde_json::to_string(collection)
}

/// Serialize a collection to indented GeoJSON text
pub fn serialize_pretty(collection: &FeatureCollection) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(collection)
}
