use thiserror::Error;

pub type ParseResult<T> = Result<T, ParseError>;

/// Reasons a document is rejected as a GeoJSON feature collection
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Invalid JSON at {line}:{column}: {message}")]
    InvalidJson {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Expected a FeatureCollection, found {found}")]
    NotAFeatureCollection { found: String },

    #[error("FeatureCollection has no \"features\" array")]
    MissingFeatures,

    #[error("Invalid feature at index {index}: {message}")]
    InvalidFeature { index: usize, message: String },

    #[error("Invalid geometry in feature {index}: {message}")]
    InvalidGeometry { index: usize, message: String },
}

impl ParseError {
    pub fn not_a_feature_collection(found: impl Into<String>) -> Self {
        Self::NotAFeatureCollection {
            found: found.into(),
        }
    }

    pub fn invalid_feature(index: usize, message: impl Into<String>) -> Self {
        Self::InvalidFeature {
            index,
            message: message.into(),
        }
    }

    pub fn invalid_geometry(index: usize, message: impl Into<String>) -> Self {
        Self::InvalidGeometry {
            index,
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(e: serde_json::Error) -> Self {
        Self::InvalidJson {
            line: e.line(),
            column: e.column(),
            message: e.to_string(),
        }
    }
}
