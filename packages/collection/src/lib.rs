//! # Geomark Collection
//!
//! GeoJSON feature collections as the editor sees them: parsing with
//! validation, a typed model that passes unknown members through, pure
//! append/remove operations and the point-marker classification.

pub mod error;
pub mod id_generator;
pub mod marker;
pub mod model;
pub mod ops;
pub mod parser;
pub mod serializer;

pub use error::{ParseError, ParseResult};
pub use id_generator::{source_seed, IdGenerator};
pub use marker::{MarkerFactory, MarkerTemplate, DEFAULT_MARKER_ICON, DEFAULT_MARKER_INFO};
pub use model::{Coordinate, Feature, FeatureCollection, FeatureId, Geometry, Properties};
pub use ops::{with_appended, with_removed};
pub use parser::{parse_collection, Parser};
pub use serializer::{serialize, serialize_pretty};
