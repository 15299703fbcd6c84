//! # Map Surface
//!
//! What the controller needs from whatever draws the map. The controller
//! only ever talks to this trait, so it can be driven in tests or by the
//! headless surface without a renderer.

use geomark_collection::{Coordinate, Feature, FeatureCollection, FeatureId};
use serde::{Deserialize, Serialize};

/// Which layer a collection is drawn as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerRole {
    /// The committed collection
    Base,
    /// The working collection, including the pending marker
    Edit,
}

/// Screen position in pixels, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pixel {
    pub x: f64,
    pub y: f64,
}

impl Pixel {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Pixel) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A single user click
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickEvent {
    pub geo: Coordinate,
    pub pixel: Pixel,
}

/// How a click subscription is used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClickRoute {
    /// Place the pending marker (edit mode)
    Place,
    /// Hit-test markers and show their popup (view mode)
    Inspect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubscriptionId(pub u64);

/// Active click registration held by a controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickSubscription {
    pub id: SubscriptionId,
    pub route: ClickRoute,
}

/// Descriptive content shown next to an inspected marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Popup {
    pub feature: FeatureId,
    pub content: String,
    pub position: Coordinate,
}

/// Rendering capability consumed by the controller
pub trait MapSurface {
    /// Draw `collection` as the layer for `role`, replacing what was there
    fn render(&mut self, role: LayerRole, collection: &FeatureCollection);

    /// Start delivering clicks for `route`
    fn subscribe_clicks(&mut self, route: ClickRoute) -> SubscriptionId;

    /// Stop delivering clicks for `id`
    fn unsubscribe_clicks(&mut self, id: SubscriptionId);

    /// Features under `pixel`, topmost first
    fn hit_test(&self, pixel: Pixel) -> Vec<Feature>;

    fn add_feature(&mut self, role: LayerRole, feature: &Feature);

    fn remove_feature(&mut self, role: LayerRole, id: &FeatureId);

    /// Frame the viewport around `collection`
    fn fit_to_extent(&mut self, collection: &FeatureCollection);

    fn show_popup(&mut self, popup: &Popup);

    fn hide_popup(&mut self);
}
