//! Recording `MapSurface` for controller tests
#![allow(dead_code)]

use geomark_editor::{
    ClickRoute, Feature, FeatureCollection, FeatureId, LayerRole, MapSurface, Pixel, Popup,
    SubscriptionId,
};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Render(LayerRole, Vec<FeatureId>),
    Subscribe(ClickRoute, SubscriptionId),
    Unsubscribe(SubscriptionId),
    Add(LayerRole, FeatureId),
    Remove(LayerRole, FeatureId),
    Fit(usize),
    ShowPopup(FeatureId),
    HidePopup,
}

pub type CallLog = Rc<RefCell<Vec<Call>>>;

/// Records every call; hit-test answers come from `hits`
#[derive(Default)]
pub struct RecordingSurface {
    pub log: CallLog,
    pub hits: Vec<(Pixel, Vec<Feature>)>,
    next_subscription: u64,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.log.borrow().clone()
    }

    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }

    fn record(&self, call: Call) {
        self.log.borrow_mut().push(call);
    }
}

impl MapSurface for RecordingSurface {
    fn render(&mut self, role: LayerRole, collection: &FeatureCollection) {
        let ids = collection.iter().map(|f| f.id.clone()).collect();
        self.record(Call::Render(role, ids));
    }

    fn subscribe_clicks(&mut self, route: ClickRoute) -> SubscriptionId {
        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);
        self.record(Call::Subscribe(route, id));
        id
    }

    fn unsubscribe_clicks(&mut self, id: SubscriptionId) {
        self.record(Call::Unsubscribe(id));
    }

    fn hit_test(&self, pixel: Pixel) -> Vec<Feature> {
        self.hits
            .iter()
            .find(|(p, _)| *p == pixel)
            .map(|(_, features)| features.clone())
            .unwrap_or_default()
    }

    fn add_feature(&mut self, role: LayerRole, feature: &Feature) {
        self.record(Call::Add(role, feature.id.clone()));
    }

    fn remove_feature(&mut self, role: LayerRole, id: &FeatureId) {
        self.record(Call::Remove(role, id.clone()));
    }

    fn fit_to_extent(&mut self, collection: &FeatureCollection) {
        self.record(Call::Fit(collection.len()));
    }

    fn show_popup(&mut self, popup: &Popup) {
        self.record(Call::ShowPopup(popup.feature.clone()));
    }

    fn hide_popup(&mut self) {
        self.record(Call::HidePopup);
    }
}
