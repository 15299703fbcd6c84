//! # Headless Surface
//!
//! In-memory [`MapSurface`] that keeps both layers, the viewport, the click
//! registrations and the popup, without drawing anything. Hit-testing works
//! on point features in screen space, the edit layer above the base layer.

use std::collections::BTreeMap;

use geomark_collection::{Coordinate, Feature, FeatureCollection, FeatureId};
use geomark_editor::{ClickEvent, ClickRoute, LayerRole, MapSurface, Pixel, Popup, SubscriptionId};
use serde::Serialize;
use tracing::{debug, trace};

use crate::extent::Extent;
use crate::viewport::Viewport;

pub const DEFAULT_WIDTH: f64 = 1000.0;
pub const DEFAULT_HEIGHT: f64 = 510.0;
pub const DEFAULT_ZOOM: f64 = 2.0;
pub const DEFAULT_HIT_TOLERANCE: f64 = 6.0;
pub const DEFAULT_FIT_PADDING: f64 = 20.0;

#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceOptions {
    pub width: f64,
    pub height: f64,
    pub center: Coordinate,
    pub zoom: f64,

    /// Pixel radius around a click that still counts as a hit
    pub hit_tolerance: f64,

    /// Pixels kept free on each side when fitting to an extent
    pub fit_padding: f64,
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            center: Coordinate::new(0.0, 0.0),
            zoom: DEFAULT_ZOOM,
            hit_tolerance: DEFAULT_HIT_TOLERANCE,
            fit_padding: DEFAULT_FIT_PADDING,
        }
    }
}

/// Everything the controller asked the surface to do, in order
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum SurfaceEvent {
    Rendered { role: LayerRole, features: usize },
    Subscribed { id: SubscriptionId, route: ClickRoute },
    Unsubscribed { id: SubscriptionId },
    Added { role: LayerRole, feature: FeatureId },
    Removed { role: LayerRole, feature: FeatureId },
    Fitted { center: Coordinate, zoom: f64 },
    PopupShown { popup: Popup },
    PopupHidden,
}

#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    viewport: Viewport,
    hit_tolerance: f64,
    fit_padding: f64,
    base: Vec<Feature>,
    edit: Vec<Feature>,
    subscriptions: BTreeMap<SubscriptionId, ClickRoute>,
    next_subscription: u64,
    popup: Option<Popup>,
    events: Vec<SurfaceEvent>,
}

impl HeadlessSurface {
    pub fn new(options: SurfaceOptions) -> Self {
        Self {
            viewport: Viewport::from_zoom(options.center, options.zoom, options.width, options.height),
            hit_tolerance: options.hit_tolerance,
            fit_padding: options.fit_padding,
            base: Vec::new(),
            edit: Vec::new(),
            subscriptions: BTreeMap::new(),
            next_subscription: 1,
            popup: None,
            events: Vec::new(),
        }
    }

    /// Simulate a click at `pixel`. Returns one event per active
    /// subscription, for the caller to hand back to the controller.
    pub fn click(&self, pixel: Pixel) -> Vec<(SubscriptionId, ClickEvent)> {
        let event = ClickEvent {
            geo: self.viewport.pixel_to_coordinate(pixel),
            pixel,
        };
        trace!(x = pixel.x, y = pixel.y, "click");
        self.subscriptions.keys().map(|id| (*id, event)).collect()
    }

    /// Simulate a click on the screen position of `coordinate`. The event
    /// carries `coordinate` itself, not the pixel mapped back.
    pub fn click_at(&self, coordinate: Coordinate) -> Vec<(SubscriptionId, ClickEvent)> {
        let event = ClickEvent {
            geo: coordinate,
            pixel: self.pixel_of(coordinate),
        };
        self.subscriptions.keys().map(|id| (*id, event)).collect()
    }

    pub fn pixel_of(&self, coordinate: Coordinate) -> Pixel {
        self.viewport.coordinate_to_pixel(coordinate)
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn layer(&self, role: LayerRole) -> &[Feature] {
        match role {
            LayerRole::Base => &self.base,
            LayerRole::Edit => &self.edit,
        }
    }

    pub fn popup(&self) -> Option<&Popup> {
        self.popup.as_ref()
    }

    pub fn subscriptions(&self) -> impl Iterator<Item = (SubscriptionId, ClickRoute)> + '_ {
        self.subscriptions.iter().map(|(id, route)| (*id, *route))
    }

    pub fn events(&self) -> &[SurfaceEvent] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<SurfaceEvent> {
        std::mem::take(&mut self.events)
    }

    fn layer_mut(&mut self, role: LayerRole) -> &mut Vec<Feature> {
        match role {
            LayerRole::Base => &mut self.base,
            LayerRole::Edit => &mut self.edit,
        }
    }
}

impl Default for HeadlessSurface {
    fn default() -> Self {
        Self::new(SurfaceOptions::default())
    }
}

impl MapSurface for HeadlessSurface {
    fn render(&mut self, role: LayerRole, collection: &FeatureCollection) {
        *self.layer_mut(role) = collection.features.clone();
        debug!(?role, features = collection.len(), "layer rendered");
        self.events.push(SurfaceEvent::Rendered {
            role,
            features: collection.len(),
        });
    }

    fn subscribe_clicks(&mut self, route: ClickRoute) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscriptions.insert(id, route);
        self.events.push(SurfaceEvent::Subscribed { id, route });
        id
    }

    fn unsubscribe_clicks(&mut self, id: SubscriptionId) {
        if self.subscriptions.remove(&id).is_some() {
            self.events.push(SurfaceEvent::Unsubscribed { id });
        }
    }

    fn hit_test(&self, pixel: Pixel) -> Vec<Feature> {
        let mut hits: Vec<Feature> = Vec::new();

        for feature in self.edit.iter().rev().chain(self.base.iter().rev()) {
            // Only points are hit. A line or polygon above a marker does not
            // shadow it, so clicking there still opens the marker's popup.
            let Some(location) = feature.location() else {
                continue;
            };
            if self.viewport.coordinate_to_pixel(location).distance(pixel) > self.hit_tolerance {
                continue;
            }
            // Committed features are drawn on both layers
            if hits.iter().any(|hit| hit.id == feature.id) {
                continue;
            }
            hits.push(feature.clone());
        }

        hits
    }

    fn add_feature(&mut self, role: LayerRole, feature: &Feature) {
        self.layer_mut(role).push(feature.clone());
        self.events.push(SurfaceEvent::Added {
            role,
            feature: feature.id.clone(),
        });
    }

    fn remove_feature(&mut self, role: LayerRole, id: &FeatureId) {
        self.layer_mut(role).retain(|feature| &feature.id != id);
        self.events.push(SurfaceEvent::Removed {
            role,
            feature: id.clone(),
        });
    }

    fn fit_to_extent(&mut self, collection: &FeatureCollection) {
        let Some(extent) = Extent::of_collection(collection) else {
            debug!("nothing to fit, viewport unchanged");
            return;
        };

        self.viewport.fit(&extent, self.fit_padding);
        let center = self.viewport.center_coordinate();
        let zoom = self.viewport.zoom();
        debug!(lon = center.lon, lat = center.lat, zoom, "viewport fitted");
        self.events.push(SurfaceEvent::Fitted { center, zoom });
    }

    fn show_popup(&mut self, popup: &Popup) {
        self.popup = Some(popup.clone());
        self.events.push(SurfaceEvent::PopupShown {
            popup: popup.clone(),
        });
    }

    fn hide_popup(&mut self) {
        self.popup = None;
        self.events.push(SurfaceEvent::PopupHidden);
    }
}
