//! Editor modes

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Committed collection on display, clicks inspect markers
    #[default]
    View,
    /// Clicks place the pending marker
    Edit,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::View => "view",
            Mode::Edit => "edit",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
