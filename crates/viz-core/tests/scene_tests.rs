use glam::Vec3;
use viz_core::constants::*;
use viz_core::{
    AttractorScene, CancelToken, FieldBounds, GestureController, Symbol, SymbolField, SymbolScene,
    CLOUD, TUBE,
};

const EPS: f32 = 1e-6;

#[test]
fn background_spin_turns_both_targets_together() {
    let mut scene = AttractorScene::new();
    for _ in 0..10 {
        scene.advance_frame();
    }
    assert!((scene.targets[CLOUD].rotation.y - 10.0 * BACKGROUND_SPIN).abs() < EPS);
    assert!((scene.targets[TUBE].rotation.y - 10.0 * BACKGROUND_SPIN).abs() < EPS);
    assert_eq!(scene.targets[CLOUD].rotation.x, 0.0);
}

#[test]
fn background_spin_adds_to_gesture_rotation() {
    let mut scene = AttractorScene::new();
    let mut ctrl = GestureController::new();

    ctrl.pointer_down();
    ctrl.pointer_move(glam::Vec2::ZERO, &mut scene.targets);
    ctrl.pointer_move(glam::Vec2::new(10.0, 0.0), &mut scene.targets);
    scene.advance_frame();

    let expected = 10.0 * DRAG_ROTATE_FACTOR + BACKGROUND_SPIN;
    assert!((scene.targets[CLOUD].rotation.y - expected).abs() < EPS);
    assert!((scene.targets[TUBE].rotation.y - expected).abs() < EPS);
}

#[test]
fn edges_rebuild_exactly_on_the_interval() {
    let field = SymbolField::new(SYMBOL_COUNT, FieldBounds::default(), 11);
    let mut scene = SymbolScene::new(field, LINK_DISTANCE, 4);

    for round in 0..3 {
        for _ in 0..3 {
            assert!(!scene.advance_frame(), "early rebuild in round {round}");
        }
        assert!(scene.advance_frame(), "no rebuild in round {round}");
    }
}

#[test]
fn edge_set_is_stale_between_rebuilds() {
    // Two symbols drifting apart cross the link threshold mid-interval, but
    // the edge survives until the next rebuild.
    let field = SymbolField {
        symbols: vec![
            Symbol {
                position: Vec3::ZERO,
                ..Symbol::default()
            },
            Symbol {
                position: Vec3::new(LINK_DISTANCE - 0.01, 0.0, 0.0),
                direction: Vec3::new(0.02, 0.0, 0.0),
                ..Symbol::default()
            },
        ],
        bounds: FieldBounds::default(),
    };
    let mut scene = SymbolScene::new(field, LINK_DISTANCE, 10);
    assert_eq!(scene.edges, vec![(0, 1)]);

    for _ in 0..9 {
        scene.advance_frame();
        assert_eq!(scene.edges, vec![(0, 1)]);
    }
    assert!(scene.field.symbols[1].position.x > LINK_DISTANCE);

    assert!(scene.advance_frame());
    assert!(scene.edges.is_empty());
}

#[test]
fn zero_interval_is_treated_as_every_frame() {
    let field = SymbolField::new(4, FieldBounds::default(), 1);
    let mut scene = SymbolScene::new(field, LINK_DISTANCE, 0);
    assert!(scene.advance_frame());
    assert!(scene.advance_frame());
}

#[test]
fn frame_driver_honors_the_cancel_token() {
    let token = CancelToken::new();
    let cancel_from_frame = token.clone();
    let mut count = 0;
    let ran = viz_core::drive_frames(&token, 100, || {
        count += 1;
        if count == 7 {
            cancel_from_frame.cancel();
        }
    });
    assert_eq!(ran, 7);
    assert!(token.is_cancelled());
}

#[test]
fn frame_driver_stops_at_max_frames() {
    let token = CancelToken::new();
    let mut count = 0;
    assert_eq!(viz_core::drive_frames(&token, 25, || count += 1), 25);
    assert_eq!(count, 25);
    assert!(!token.is_cancelled());
}

#[test]
fn cancelled_token_runs_no_frames() {
    let token = CancelToken::new();
    token.cancel();
    assert_eq!(viz_core::drive_frames(&token, 10, || panic!("ran")), 0);
}
