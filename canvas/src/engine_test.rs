#![allow(clippy::float_cmp)]

use serde_json::json;

use super::*;
use crate::consts::{CANVAS_HEIGHT, MIN_CANVAS_PX};
use crate::surface::{DrawOp, Recorder};

// =============================================================
// Helpers
// =============================================================

fn snapshot(value: serde_json::Value) -> Snapshot {
    Snapshot::from_value(value).unwrap()
}

fn two_scanners() -> Snapshot {
    snapshot(json!({
        "scanners": [
            { "id": "A", "position": { "x": 0, "y": 0 }, "last_rssi": -50, "estimated_distance": 4.0 },
            { "id": "B", "position": { "x": 10, "y": 0 }, "last_rssi": -60, "estimated_distance": 7.5 }
        ],
        "target": { "position": { "x": 4, "y": 3 }, "confidence": 0.9, "age_seconds": 1.0 }
    }))
}

fn far_scanner() -> Snapshot {
    snapshot(json!({
        "scanners": [ { "id": "FAR", "position": { "x": 100, "y": 100 } } ]
    }))
}

fn engine() -> Engine<Recorder> {
    let Ok(engine) = Engine::new(Recorder::new(), 932.0);
    engine
}

fn has_text(engine: &Engine<Recorder>, text: &str) -> bool {
    engine.surface().texts().contains(&text)
}

// =============================================================
// EngineCore: construction and defaults
// =============================================================

#[test]
fn core_new_is_empty() {
    let core = EngineCore::new();
    assert!(core.scanners.is_empty());
    assert!(core.target.is_none());
    assert!(!core.has_data());
    assert!(core.last_seq().is_none());
}

#[test]
fn core_default_viewport_is_room_scale() {
    let core = EngineCore::new();
    assert_eq!(core.viewport, Viewport::default());
}

// =============================================================
// EngineCore: update
// =============================================================

#[test]
fn core_update_replaces_entities_and_reframes() {
    let mut core = EngineCore::new();
    core.update(two_scanners());
    assert_eq!(core.scanners.len(), 2);
    assert_eq!(core.target, Some(Point::new(4.0, 3.0)));
    assert!(core.has_data());
    assert_eq!(core.viewport.min_x(), -2.0);
    assert_eq!(core.viewport.max_x(), 12.0);
}

#[test]
fn core_update_is_wholesale() {
    let mut core = EngineCore::new();
    core.update(two_scanners());
    core.update(far_scanner());
    assert_eq!(core.scanners.len(), 1);
    assert_eq!(core.scanners[0].id, "FAR");
    assert!(core.target.is_none());
    assert_eq!(core.viewport.min_x(), 98.0);
}

#[test]
fn core_update_with_empty_snapshot_returns_to_default() {
    let mut core = EngineCore::new();
    core.update(two_scanners());
    core.update(Snapshot::default());
    assert!(!core.has_data());
    assert_eq!(core.viewport, Viewport::default());
}

#[test]
fn core_target_only_counts_as_data() {
    let mut core = EngineCore::new();
    core.update(snapshot(json!({ "target": { "position": { "x": 1, "y": 1 } } })));
    assert!(core.has_data());
    assert_eq!(core.viewport.min_x(), -1.0);
}

// =============================================================
// EngineCore: sequencing
// =============================================================

#[test]
fn core_apply_accepts_first_snapshot() {
    let mut core = EngineCore::new();
    assert_eq!(core.apply(7, two_scanners()), UpdateOutcome::Applied);
    assert_eq!(core.last_seq(), Some(7));
}

#[test]
fn core_apply_discards_older_snapshot() {
    let mut core = EngineCore::new();
    core.apply(2, far_scanner());
    let before = core.viewport;

    assert_eq!(core.apply(1, two_scanners()), UpdateOutcome::Stale);
    assert_eq!(core.scanners[0].id, "FAR");
    assert_eq!(core.viewport, before);
    assert_eq!(core.last_seq(), Some(2));
}

#[test]
fn core_apply_discards_duplicate_sequence() {
    let mut core = EngineCore::new();
    core.apply(3, far_scanner());
    assert_eq!(core.apply(3, two_scanners()), UpdateOutcome::Stale);
}

#[test]
fn core_apply_accepts_gaps() {
    let mut core = EngineCore::new();
    core.apply(1, far_scanner());
    assert_eq!(core.apply(10, two_scanners()), UpdateOutcome::Applied);
    assert_eq!(core.scanners.len(), 2);
}

// =============================================================
// EngineCore: resize
// =============================================================

#[test]
fn core_resize_changes_only_pixel_geometry() {
    let mut core = EngineCore::new();
    core.update(two_scanners());
    let scanners = core.scanners.clone();
    let target = core.target;
    let viewport = core.viewport;

    core.resize(1232.0);

    assert_eq!(core.canvas.width(), 1200);
    assert_eq!(core.canvas.height(), CANVAS_HEIGHT);
    assert_eq!(core.scanners, scanners);
    assert_eq!(core.target, target);
    assert_eq!(core.viewport, viewport);
}

#[test]
fn core_resize_clamps_narrow_container() {
    let mut core = EngineCore::new();
    core.resize(0.0);
    assert_eq!(core.canvas.width(), MIN_CANVAS_PX);
}

// =============================================================
// Engine: rendering on every state change
// =============================================================

#[test]
fn engine_new_draws_empty_scene() {
    let engine = engine();
    assert_eq!(engine.surface().size.width(), 900);
    assert_eq!(engine.surface().ops[0], DrawOp::Clear { color: crate::consts::COLOR_BACKGROUND });
    assert!(has_text(&engine, "15.0"));
}

#[test]
fn engine_update_redraws() {
    let mut engine = engine();
    let Ok(()) = engine.update(two_scanners());
    assert!(has_text(&engine, "A"));
    assert!(has_text(&engine, "B"));
    assert!(has_text(&engine, "TARGET"));
    assert!(has_text(&engine, "-50 dBm"));
}

#[test]
fn engine_stale_apply_keeps_last_frame() {
    let mut engine = engine();
    let Ok(UpdateOutcome::Applied) = engine.apply(5, two_scanners()) else {
        panic!("expected applied");
    };
    let frame = engine.surface().ops.clone();

    let Ok(outcome) = engine.apply(4, far_scanner());
    assert_eq!(outcome, UpdateOutcome::Stale);
    assert_eq!(engine.surface().ops, frame);
    assert!(!has_text(&engine, "FAR"));
}

#[test]
fn engine_resize_redraws_held_state_at_new_size() {
    let mut engine = engine();
    let Ok(()) = engine.update(two_scanners());
    let viewport = engine.core.viewport;

    let Ok(()) = engine.on_resize(632.0);

    assert_eq!(engine.surface().size.width(), 600);
    assert_eq!(engine.core.viewport, viewport);
    assert!(has_text(&engine, "A"));
    assert!(has_text(&engine, "TARGET"));

    let a = engine.core.projection().world_to_canvas(Point::new(0.0, 0.0));
    assert!(engine.surface().ops.iter().any(|op| matches!(
        op,
        DrawOp::Text { text, at, .. } if text == "A" && at.x == a.x
    )));
}

#[test]
fn engine_render_is_idempotent() {
    let mut engine = engine();
    let Ok(()) = engine.update(two_scanners());
    let first = engine.surface().ops.clone();
    let Ok(()) = engine.render();
    assert_eq!(engine.surface().ops, first);
}

#[test]
fn engine_update_with_identical_snapshot_is_identical() {
    let mut engine = engine();
    let Ok(()) = engine.update(two_scanners());
    let first = engine.surface().ops.clone();
    let Ok(()) = engine.update(two_scanners());
    assert_eq!(engine.surface().ops, first);
}
