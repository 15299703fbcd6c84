//! Integration tests for editor crate

mod support;

use geomark_collection::with_appended;
use geomark_editor::{
    ClickEvent, ClickOutcome, ClickRoute, ControllerOptions, Coordinate, EditorError, LayerRole,
    Mode, ModeController, Pixel, SaveOutcome, SubscriptionId,
};
use serde_json::json;
use support::{Call, RecordingSurface};

const EMPTY: &str = r#"{"type":"FeatureCollection","features":[]}"#;

const ONE_ROAD: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {
            "type": "Feature",
            "id": "A",
            "geometry": { "type": "LineString", "coordinates": [[0, 0], [1, 1]] },
            "properties": { "name": "Main St" }
        }
    ]
}"#;

const WITH_MARKER: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {
            "type": "Feature",
            "geometry": { "type": "Polygon", "coordinates": [[[0, 0], [2, 0], [2, 2], [0, 0]]] },
            "properties": { "name": "Park" }
        },
        {
            "type": "Feature",
            "geometry": { "type": "Point", "coordinates": [12.5, 41.9] },
            "properties": { "icon": "red-circle", "info": "Fountain" }
        }
    ]
}"#;

fn controller() -> ModeController<RecordingSurface> {
    ModeController::new(RecordingSurface::new(), ControllerOptions::default())
}

fn active(controller: &ModeController<RecordingSurface>) -> SubscriptionId {
    controller.subscription().expect("controller always holds a subscription").id
}

fn click_geo(lon: f64, lat: f64) -> ClickEvent {
    ClickEvent {
        geo: Coordinate::new(lon, lat),
        pixel: Pixel::new(0.0, 0.0),
    }
}

fn click_pixel(x: f64, y: f64) -> ClickEvent {
    ClickEvent {
        geo: Coordinate::new(0.0, 0.0),
        pixel: Pixel::new(x, y),
    }
}

#[test]
fn test_place_twice_then_commit() {
    let mut controller = controller();
    controller.load(EMPTY, "empty.geojson").unwrap();

    controller.enter_edit();
    assert_eq!(controller.mode(), Mode::Edit);

    let first = controller.handle_click(active(&controller), click_geo(10.0, 20.0));
    let first_id = match first {
        ClickOutcome::Placed { feature, evicted: None } => feature,
        other => panic!("Expected placement, got {:?}", other),
    };
    assert_eq!(
        controller.pending().and_then(|f| f.location()),
        Some(Coordinate::new(10.0, 20.0))
    );
    assert_eq!(controller.working().unwrap().len(), 1);

    controller.surface().clear();
    let second = controller.handle_click(active(&controller), click_geo(30.0, 40.0));
    let second_id = match second {
        ClickOutcome::Placed { feature, evicted } => {
            assert_eq!(evicted.as_ref(), Some(&first_id));
            feature
        }
        other => panic!("Expected placement, got {:?}", other),
    };

    // Old marker leaves the layer before the new one arrives
    assert_eq!(
        controller.surface().calls(),
        vec![
            Call::Remove(LayerRole::Edit, first_id.clone()),
            Call::Add(LayerRole::Edit, second_id.clone()),
        ]
    );

    let working = controller.working().unwrap();
    assert_eq!(working.len(), 1);
    assert_eq!(working.features[0].id, second_id);
    assert_eq!(controller.committed().unwrap().len(), 0);

    assert_eq!(controller.save(), SaveOutcome::Committed);
    assert_eq!(controller.mode(), Mode::View);
    assert!(controller.pending().is_none());

    let committed = controller.committed().unwrap();
    assert_eq!(committed.len(), 1);
    assert_eq!(committed.features[0].id, second_id);
    assert_eq!(
        committed.features[0].location(),
        Some(Coordinate::new(30.0, 40.0))
    );
    assert_eq!(controller.working(), controller.committed());
}

#[test]
fn test_return_to_view_discards_pending() {
    let mut controller = controller();
    controller.load(ONE_ROAD, "road.geojson").unwrap();
    let before = controller.committed().cloned().unwrap();

    controller.enter_edit();
    controller.handle_click(active(&controller), click_geo(5.0, 5.0));
    assert_eq!(controller.working().unwrap().len(), 2);
    let pending = controller.pending().unwrap().id.clone();

    controller.surface().clear();
    assert_eq!(controller.return_to_view(), Some(pending.clone()));

    assert_eq!(controller.mode(), Mode::View);
    assert!(controller.pending().is_none());
    assert_eq!(controller.working(), Some(&before));
    assert_eq!(controller.committed(), Some(&before));
    assert!(controller
        .surface()
        .calls()
        .contains(&Call::Remove(LayerRole::Edit, pending)));
}

#[test]
fn test_view_mode_hit_test_shows_and_clears_popup() {
    let mut controller = controller();
    controller.load(WITH_MARKER, "rome.geojson").unwrap();

    let committed = controller.committed().unwrap().clone();
    let park = committed.features[0].clone();
    let marker = committed.features[1].clone();
    controller.surface_mut().hits = vec![
        (Pixel::new(120.0, 80.0), vec![marker.clone(), park.clone()]),
        (Pixel::new(40.0, 40.0), vec![park.clone()]),
    ];

    let outcome = controller.handle_click(active(&controller), click_pixel(120.0, 80.0));
    let popup = match outcome {
        ClickOutcome::PopupShown(popup) => popup,
        other => panic!("Expected popup, got {:?}", other),
    };
    assert_eq!(popup.feature, marker.id);
    assert_eq!(popup.content, "Fountain");
    assert_eq!(popup.position, Coordinate::new(12.5, 41.9));
    assert_eq!(controller.popup(), Some(&popup));

    // Non-marker under the cursor clears it
    assert_eq!(
        controller.handle_click(active(&controller), click_pixel(40.0, 40.0)),
        ClickOutcome::PopupCleared
    );
    assert!(controller.popup().is_none());

    // So does a miss
    controller.handle_click(active(&controller), click_pixel(120.0, 80.0));
    assert_eq!(
        controller.handle_click(active(&controller), click_pixel(500.0, 500.0)),
        ClickOutcome::PopupCleared
    );
    assert!(controller.popup().is_none());
    assert_eq!(controller.committed(), Some(&committed));
}

#[test]
fn test_popup_fallback_for_marker_without_info() {
    let raw = json!({
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "geometry": { "type": "Point", "coordinates": [1, 1] },
            "properties": { "icon": "red-circle" }
        }]
    })
    .to_string();

    let mut controller = controller();
    controller.load(&raw, "bare.geojson").unwrap();
    let marker = controller.committed().unwrap().features[0].clone();
    controller.surface_mut().hits = vec![(Pixel::new(1.0, 1.0), vec![marker])];

    match controller.handle_click(active(&controller), click_pixel(1.0, 1.0)) {
        ClickOutcome::PopupShown(popup) => assert_eq!(popup.content, "Hello World"),
        other => panic!("Expected popup, got {:?}", other),
    }
}

#[test]
fn test_malformed_load_changes_nothing() {
    let mut controller = controller();
    controller.load(ONE_ROAD, "road.geojson").unwrap();
    controller.enter_edit();
    controller.handle_click(active(&controller), click_geo(1.0, 1.0));
    let before = controller.snapshot();
    controller.surface().clear();

    let err = controller.load(r#"{"type":"Feature"}"#, "bad.geojson").unwrap_err();
    assert!(matches!(err, EditorError::Parse(_)));

    assert_eq!(controller.snapshot(), before);
    assert!(controller.surface().calls().is_empty());
}

#[test]
fn test_load_renders_both_layers_and_fits() {
    let mut controller = controller();
    controller.load(ONE_ROAD, "road.geojson").unwrap();
    let ids: Vec<_> = controller.committed().unwrap().iter().map(|f| f.id.clone()).collect();

    let calls = controller.surface().calls();
    assert_eq!(
        &calls[calls.len() - 3..],
        &[
            Call::Render(LayerRole::Base, ids.clone()),
            Call::Render(LayerRole::Edit, ids),
            Call::Fit(1),
        ]
    );
}

#[test]
fn test_reload_while_editing_drops_pending() {
    let mut controller = controller();
    controller.load(ONE_ROAD, "road.geojson").unwrap();
    controller.enter_edit();
    controller.handle_click(active(&controller), click_geo(1.0, 1.0));

    controller.load(WITH_MARKER, "rome.geojson").unwrap();
    assert_eq!(controller.mode(), Mode::Edit);
    assert!(controller.pending().is_none());
    assert_eq!(controller.working(), controller.committed());
    assert_eq!(controller.committed().unwrap().len(), 2);
}

#[test]
fn test_enter_edit_twice_is_same_as_once() {
    let mut controller = controller();
    controller.load(ONE_ROAD, "road.geojson").unwrap();
    controller.enter_edit();
    controller.handle_click(active(&controller), click_geo(1.0, 1.0));

    let snapshot = controller.snapshot();
    let subscription = controller.subscription();
    controller.surface().clear();

    controller.enter_edit();
    assert_eq!(controller.snapshot(), snapshot);
    assert_eq!(controller.subscription(), subscription);
    assert!(controller.surface().calls().is_empty());
}

#[test]
fn test_subscription_follows_mode() {
    let mut controller = controller();
    let viewing = controller.subscription().unwrap();
    assert_eq!(viewing.route, ClickRoute::Inspect);

    controller.enter_edit();
    let editing = controller.subscription().unwrap();
    assert_eq!(editing.route, ClickRoute::Place);
    assert!(controller
        .surface()
        .calls()
        .contains(&Call::Unsubscribe(viewing.id)));

    // Clicks from the old registration are dropped
    controller.load(EMPTY, "empty.geojson").unwrap();
    assert_eq!(
        controller.handle_click(viewing.id, click_geo(1.0, 1.0)),
        ClickOutcome::Ignored
    );
    assert!(controller.pending().is_none());

    controller.return_to_view();
    assert_eq!(controller.subscription().unwrap().route, ClickRoute::Inspect);
}

#[test]
fn test_dropping_controller_releases_subscription() {
    let surface = RecordingSurface::new();
    let log = surface.log.clone();
    let controller = ModeController::new(surface, ControllerOptions::default());
    let id = controller.subscription().unwrap().id;

    drop(controller);
    assert_eq!(log.borrow().last(), Some(&Call::Unsubscribe(id)));
}

#[test]
fn test_clicks_without_collection_are_ignored() {
    let mut controller = controller();
    controller.enter_edit();

    assert_eq!(
        controller.handle_click(active(&controller), click_geo(1.0, 1.0)),
        ClickOutcome::Ignored
    );
    assert!(controller.pending().is_none());
    assert_eq!(controller.save(), SaveOutcome::NothingLoaded);
    assert_eq!(controller.mode(), Mode::Edit);
}

#[test]
fn test_save_without_changes() {
    let mut controller = controller();
    controller.load(ONE_ROAD, "road.geojson").unwrap();
    controller.enter_edit();

    assert_eq!(controller.save(), SaveOutcome::Unchanged);
    assert_eq!(controller.mode(), Mode::View);
    assert!(!controller.has_unsaved_changes());
}

#[test]
fn test_commit_appends_exactly_one_point() {
    let mut controller = controller();
    controller.load(ONE_ROAD, "road.geojson").unwrap();
    let before = controller.committed().cloned().unwrap();

    controller.enter_edit();
    controller.handle_click(active(&controller), click_geo(-3.5, 7.25));
    let pending = controller.pending().cloned().unwrap();
    controller.save();

    assert_eq!(controller.committed(), Some(&with_appended(&before, pending)));
    let last = controller.committed().unwrap().features.last().unwrap();
    assert_eq!(last.location(), Some(Coordinate::new(-3.5, 7.25)));
    assert_eq!(last.property("icon"), Some(&json!("red-circle")));
}

#[test]
fn test_view_clicks_never_edit() {
    let mut controller = controller();
    controller.load(WITH_MARKER, "rome.geojson").unwrap();
    let before = controller.snapshot();

    controller.handle_click(active(&controller), click_geo(3.0, 3.0));
    assert_eq!(controller.snapshot(), before);
}
