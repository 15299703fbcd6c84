//! Error types for the editor

use geomark_collection::ParseError;
use thiserror::Error;

use crate::mode::Mode;

/// An operation was invoked in a mode that does not allow it
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{operation} is not allowed in {mode} mode")]
pub struct InvalidModeOperation {
    pub operation: &'static str,
    pub mode: Mode,
}

/// Failures reported to the caller of a controller operation
#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
}
