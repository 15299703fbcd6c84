//! # Feature Collection Store
//!
//! Holds the committed collection (last load or save) and the working
//! collection shown while editing.
//!
//! ## Lifecycle
//!
//! ```text
//! load ──▶ committed ══ working ──append/remove pending──▶ working'
//!              ▲                                              │
//!              └──────────── promote_working (save) ──────────┘
//! ```
//!
//! Every change goes through the pure operations in `geomark_collection::ops`
//! and lands with a single assignment.

use geomark_collection::{
    parse_collection, with_appended, with_removed, Feature, FeatureCollection, FeatureId,
    ParseError,
};

#[derive(Debug, Clone, Default)]
pub struct FeatureCollectionStore {
    committed: Option<FeatureCollection>,
    working: Option<FeatureCollection>,
}

impl FeatureCollectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `raw` and make it both the committed and the working collection.
    /// On failure nothing changes.
    pub fn load(&mut self, raw: &str, source: &str) -> Result<&FeatureCollection, ParseError> {
        let collection = parse_collection(raw, source)?;
        self.working = Some(collection.clone());
        Ok(self.committed.insert(collection))
    }

    pub fn committed(&self) -> Option<&FeatureCollection> {
        self.committed.as_ref()
    }

    pub fn working(&self) -> Option<&FeatureCollection> {
        self.working.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.committed.is_some()
    }

    /// Working collection differs from the committed one
    pub fn has_unsaved_changes(&self) -> bool {
        self.working != self.committed
    }

    /// Append to the working collection. Returns false when nothing is loaded.
    pub fn append_working(&mut self, feature: Feature) -> bool {
        match &self.working {
            Some(working) => {
                self.working = Some(with_appended(working, feature));
                true
            }
            None => false,
        }
    }

    /// Remove from the working collection. Returns whether a feature was removed.
    pub fn remove_working(&mut self, id: &FeatureId) -> bool {
        match &self.working {
            Some(working) if working.contains(id) => {
                self.working = Some(with_removed(working, id));
                true
            }
            _ => false,
        }
    }

    /// Working := committed
    pub fn reset_working(&mut self) {
        self.working = self.committed.clone();
    }

    /// Committed := working. Returns whether the committed collection changed.
    pub fn promote_working(&mut self) -> bool {
        if self.working == self.committed {
            return false;
        }
        self.committed = self.working.clone();
        true
    }
}
