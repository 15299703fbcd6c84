//! # Mode Controller
//!
//! Drives the edit session and the collection store in response to user
//! actions, then pushes the result to the [`MapSurface`].
//!
//! Every trigger first brings session and store to their final state and
//! only then talks to the surface, so the surface never observes a
//! half-applied transition.

use geomark_collection::{Feature, FeatureCollection, FeatureId, MarkerFactory, MarkerTemplate};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::errors::EditorError;
use crate::mode::Mode;
use crate::session::EditSession;
use crate::store::FeatureCollectionStore;
use crate::surface::{
    ClickEvent, ClickRoute, ClickSubscription, LayerRole, MapSurface, Pixel, Popup,
    SubscriptionId,
};

pub const DEFAULT_POPUP_FALLBACK: &str = "Hello World";

/// Controller settings
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerOptions {
    pub markers: MarkerTemplate,

    /// Popup text for markers without an `info` property
    pub popup_fallback: String,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            markers: MarkerTemplate::default(),
            popup_fallback: DEFAULT_POPUP_FALLBACK.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// No collection loaded, nothing happened
    NothingLoaded,
    /// Back in view mode, committed collection already matched
    Unchanged,
    /// Committed collection replaced by the working collection
    Committed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    /// A new pending marker was placed
    Placed {
        feature: FeatureId,
        evicted: Option<FeatureId>,
    },
    PopupShown(Popup),
    PopupCleared,
    /// Stale subscription, or nothing to place into
    Ignored,
}

/// Point-in-time view of the controller, for rendering and reporting
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControllerSnapshot {
    pub mode: Mode,
    pub pending: Option<FeatureId>,
    pub committed: Option<FeatureCollection>,
    pub working: Option<FeatureCollection>,
    pub popup: Option<Popup>,
}

/// Owns the session, the store and the surface for one map view
pub struct ModeController<S: MapSurface> {
    store: FeatureCollectionStore,
    session: EditSession,
    surface: S,
    subscription: Option<ClickSubscription>,
    popup: Option<Popup>,
    popup_fallback: String,
}

impl<S: MapSurface> ModeController<S> {
    pub fn new(surface: S, options: ControllerOptions) -> Self {
        let mut controller = Self {
            store: FeatureCollectionStore::new(),
            session: EditSession::new(MarkerFactory::new(options.markers)),
            surface,
            subscription: None,
            popup: None,
            popup_fallback: options.popup_fallback,
        };
        controller.route_clicks(ClickRoute::Inspect);
        controller
    }

    /// Load a document. On a parse error nothing changes.
    pub fn load(&mut self, raw: &str, source: &str) -> Result<(), EditorError> {
        let count = self.store.load(raw, source)?.len();
        info!(source, features = count, "loaded feature collection");

        if let Some(dropped) = self.session.discard_pending() {
            debug!(feature = %dropped.id, "pending feature dropped by load");
        }
        self.clear_popup();

        if let (Some(committed), Some(working)) = (self.store.committed(), self.store.working()) {
            self.surface.render(LayerRole::Base, committed);
            self.surface.render(LayerRole::Edit, working);
            self.surface.fit_to_extent(committed);
        }
        Ok(())
    }

    /// Switch to edit mode. Idempotent.
    pub fn enter_edit(&mut self) {
        if self.session.mode() == Mode::Edit {
            debug!("already in edit mode");
            return;
        }

        let stray = self.session.discard_pending();
        if let Some(stray) = &stray {
            warn!(feature = %stray.id, "pending feature found in view mode, discarding");
            self.store.remove_working(&stray.id);
        }
        self.session.start_edit();
        debug!("entered edit mode");

        if let Some(stray) = stray {
            self.surface.remove_feature(LayerRole::Edit, &stray.id);
        }
        self.clear_popup();
        self.route_clicks(ClickRoute::Place);
    }

    /// Handle a click delivered for `subscription`
    pub fn handle_click(&mut self, subscription: SubscriptionId, event: ClickEvent) -> ClickOutcome {
        match self.subscription {
            Some(active) if active.id == subscription => {}
            _ => {
                debug!(?subscription, "click from inactive subscription ignored");
                return ClickOutcome::Ignored;
            }
        }

        match self.session.mode() {
            Mode::Edit => self.place_at(event),
            Mode::View => self.inspect_at(event.pixel),
        }
    }

    /// Commit the working collection and return to view mode
    pub fn save(&mut self) -> SaveOutcome {
        if !self.store.is_loaded() {
            debug!("save ignored, no collection loaded");
            return SaveOutcome::NothingLoaded;
        }

        let changed = self.store.promote_working();
        let promoted = self.session.commit();
        self.route_clicks(ClickRoute::Inspect);

        if !changed {
            debug!("save with no changes");
            return SaveOutcome::Unchanged;
        }

        info!(
            feature = promoted.as_ref().map(|f| f.id.as_str()),
            "committed working collection"
        );
        if let Some(committed) = self.store.committed() {
            self.surface.render(LayerRole::Base, committed);
        }
        SaveOutcome::Committed
    }

    /// Discard unsaved edits and return to view mode
    pub fn return_to_view(&mut self) -> Option<FeatureId> {
        let discarded = self.session.revert_to_view();
        self.store.reset_working();
        self.route_clicks(ClickRoute::Inspect);

        let id = discarded.map(|f| f.id);
        if let Some(id) = &id {
            debug!(feature = %id, "discarded pending feature");
            self.surface.remove_feature(LayerRole::Edit, id);
        }
        id
    }

    pub fn mode(&self) -> Mode {
        self.session.mode()
    }

    pub fn pending(&self) -> Option<&Feature> {
        self.session.pending()
    }

    pub fn committed(&self) -> Option<&FeatureCollection> {
        self.store.committed()
    }

    pub fn working(&self) -> Option<&FeatureCollection> {
        self.store.working()
    }

    pub fn popup(&self) -> Option<&Popup> {
        self.popup.as_ref()
    }

    pub fn subscription(&self) -> Option<ClickSubscription> {
        self.subscription
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.store.has_unsaved_changes()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn snapshot(&self) -> ControllerSnapshot {
        ControllerSnapshot {
            mode: self.mode(),
            pending: self.pending().map(|f| f.id.clone()),
            committed: self.committed().cloned(),
            working: self.working().cloned(),
            popup: self.popup.clone(),
        }
    }

    fn place_at(&mut self, event: ClickEvent) -> ClickOutcome {
        if !self.store.is_loaded() {
            debug!("click ignored, no collection loaded");
            return ClickOutcome::Ignored;
        }

        let placement = match self.session.place_feature(event.geo) {
            Ok(placement) => placement,
            Err(e) => {
                debug!(error = %e, "click ignored");
                return ClickOutcome::Ignored;
            }
        };

        if let Some(evicted) = &placement.evicted {
            self.store.remove_working(&evicted.id);
        }
        self.store.append_working(placement.placed.clone());

        if let Some(evicted) = &placement.evicted {
            self.surface.remove_feature(LayerRole::Edit, &evicted.id);
        }
        self.surface.add_feature(LayerRole::Edit, &placement.placed);

        debug!(
            feature = %placement.placed.id,
            lon = event.geo.lon,
            lat = event.geo.lat,
            "placed pending feature"
        );
        ClickOutcome::Placed {
            feature: placement.placed.id,
            evicted: placement.evicted.map(|f| f.id),
        }
    }

    fn inspect_at(&mut self, pixel: Pixel) -> ClickOutcome {
        let template = self.session.marker_template();
        let popup = self
            .surface
            .hit_test(pixel)
            .into_iter()
            .next()
            .filter(|feature| template.matches(feature))
            .and_then(|feature| {
                let position = feature.location()?;
                let content = feature
                    .property_str("info")
                    .unwrap_or(&self.popup_fallback)
                    .to_string();
                Some(Popup {
                    feature: feature.id,
                    content,
                    position,
                })
            });

        match popup {
            Some(popup) => {
                self.surface.show_popup(&popup);
                self.popup = Some(popup.clone());
                ClickOutcome::PopupShown(popup)
            }
            None => {
                self.clear_popup();
                ClickOutcome::PopupCleared
            }
        }
    }

    fn clear_popup(&mut self) {
        if self.popup.take().is_some() {
            self.surface.hide_popup();
        }
    }

    fn route_clicks(&mut self, route: ClickRoute) {
        if let Some(active) = self.subscription {
            if active.route == route {
                return;
            }
            self.surface.unsubscribe_clicks(active.id);
        }
        let id = self.surface.subscribe_clicks(route);
        self.subscription = Some(ClickSubscription { id, route });
    }
}

impl<S: MapSurface> Drop for ModeController<S> {
    fn drop(&mut self) {
        if let Some(active) = self.subscription.take() {
            self.surface.unsubscribe_clicks(active.id);
        }
    }
}
