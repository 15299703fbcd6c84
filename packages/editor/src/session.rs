//! # Edit Session
//!
//! Tracks the current [`Mode`] and the single pending (unsaved) feature.
//!
//! ```text
//!            start_edit
//!   View ─────────────────▶ Edit ──┐ place_feature
//!    ▲                        │ ◀──┘ (replaces pending)
//!    └── revert_to_view ──────┤
//!    └── commit ──────────────┘
//! ```
//!
//! The session never touches collections. The caller folds the pending
//! feature into the committed collection before calling [`EditSession::commit`].

use geomark_collection::{Coordinate, Feature, MarkerFactory, MarkerTemplate};

use crate::errors::InvalidModeOperation;
use crate::mode::Mode;

/// Mode plus at most one pending feature
#[derive(Debug, Clone)]
pub struct EditSession {
    mode: Mode,
    pending: Option<Feature>,
    markers: MarkerFactory,
}

/// Result of placing a feature
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    /// The new pending feature
    pub placed: Feature,

    /// Previous pending feature, which the caller must evict from any layer
    pub evicted: Option<Feature>,
}

impl EditSession {
    pub fn new(markers: MarkerFactory) -> Self {
        Self {
            mode: Mode::View,
            pending: None,
            markers,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn pending(&self) -> Option<&Feature> {
        self.pending.as_ref()
    }

    pub fn marker_template(&self) -> &MarkerTemplate {
        self.markers.template()
    }

    /// Enter edit mode. An existing pending feature is kept.
    pub fn start_edit(&mut self) {
        self.mode = Mode::Edit;
    }

    /// Create a marker at `at` and make it the pending feature
    pub fn place_feature(&mut self, at: Coordinate) -> Result<Placement, InvalidModeOperation> {
        if self.mode != Mode::Edit {
            return Err(InvalidModeOperation {
                operation: "place_feature",
                mode: self.mode,
            });
        }

        let placed = self.markers.create(at);
        let evicted = self.pending.replace(placed.clone());
        Ok(Placement { placed, evicted })
    }

    /// Back to view mode, dropping the pending feature
    pub fn revert_to_view(&mut self) -> Option<Feature> {
        self.mode = Mode::View;
        self.pending.take()
    }

    /// Back to view mode after the pending feature has been committed
    pub fn commit(&mut self) -> Option<Feature> {
        self.mode = Mode::View;
        self.pending.take()
    }

    /// Drop the pending feature without leaving the current mode
    pub fn discard_pending(&mut self) -> Option<Feature> {
        self.pending.take()
    }

    /// Put `feature` in the pending slot regardless of mode
    #[cfg(test)]
    pub(crate) fn set_pending_unchecked(&mut self, feature: Feature) {
        self.pending = Some(feature);
    }

    /// Pending feature present ⇒ edit mode
    pub fn invariant_holds(&self) -> bool {
        self.pending.is_none() || self.mode == Mode::Edit
    }
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new(MarkerFactory::default())
    }
}
