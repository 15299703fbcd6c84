//! # Geomark Editor
//!
//! View/edit state machine for a single map of GeoJSON features.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ collection: GeoJSON text → FeatureCollection│
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: ModeController                      │
//! │  - FeatureCollectionStore (committed/working)│
//! │  - EditSession (mode + pending feature)     │
//! │  - click routing (place / inspect)          │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ MapSurface: layers, hit-testing, popup      │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Committed collection is the source of truth**: working collection is
//!    derived from it plus at most one pending feature
//! 2. **View mode has no pending feature**: leaving edit mode either commits
//!    or discards it
//! 3. **Saving is one assignment**: committed is never partially updated
//! 4. **Wrong-mode calls are no-ops**: they are logged, not surfaced
//!
//! ## Usage
//!
//! ```rust,ignore
//! use geomark_editor::{ControllerOptions, ModeController};
//!
//! let mut controller = ModeController::new(surface, ControllerOptions::default());
//! controller.load(&raw, "parks.geojson")?;
//!
//! controller.enter_edit();
//! let subscription = controller.subscription().unwrap().id;
//! controller.handle_click(subscription, click);
//!
//! controller.save();
//! ```

mod controller;
mod errors;
mod mode;
mod session;
mod store;
mod surface;

pub use controller::{
    ClickOutcome, ControllerOptions, ControllerSnapshot, ModeController, SaveOutcome,
    DEFAULT_POPUP_FALLBACK,
};
pub use errors::{EditorError, InvalidModeOperation};
pub use mode::Mode;
pub use session::{EditSession, Placement};
pub use store::FeatureCollectionStore;
pub use surface::{
    ClickEvent, ClickRoute, ClickSubscription, LayerRole, MapSurface, Pixel, Popup,
    SubscriptionId,
};

// Re-export collection types for convenience
pub use geomark_collection::{Coordinate, Feature, FeatureCollection, FeatureId, MarkerTemplate};
