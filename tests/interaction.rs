//! Pointer state machine, selection, keyboard and zoom handling.
mod common;
use common::*;
use pretty_assertions::assert_eq;
use promptflow::interaction::DragState;
use promptflow::prelude::*;

#[test]
fn test_drag_at_half_zoom_scales_movement_inversely() {
    let (mut store, a, _) = create_pair();
    let mut viewport = Viewport::default();
    viewport.set_zoom(0.5);
    let mut ctrl = PointerInteractionController::new();

    let start = Point::new(10.0, 10.0);
    ctrl.pointer_down_on_node(&store, &viewport, &a, NodeRegion::Body, start);
    ctrl.pointer_move(&mut store, &viewport, start + Point::new(100.0, 0.0));
    assert_eq!(ctrl.pointer_up(&mut store, None), InteractionOutcome::DragEnded);

    assert_eq!(store.node(&a).unwrap().position, Point::new(200.0, 0.0));
}

#[test]
fn test_drag_keeps_grab_offset() {
    let (mut store, a, _) = create_pair();
    let viewport = Viewport::default();
    let mut ctrl = PointerInteractionController::new();

    ctrl.pointer_down_on_node(&store, &viewport, &a, NodeRegion::Body, Point::new(40.0, 25.0));
    let outcome = ctrl.pointer_move(&mut store, &viewport, Point::new(90.0, 75.0));

    assert_eq!(outcome, InteractionOutcome::NodeMoved);
    assert_eq!(store.node(&a).unwrap().position, Point::new(50.0, 50.0));
}

#[test]
fn test_dragging_node_moves_connection_anchor() {
    let (mut store, a, b) = create_pair();
    let conn = store.add_connection(&a, &b).unwrap();
    let (_, b_input) = endpoints_of(&store, &conn);
    let viewport = Viewport::default();
    let mut ctrl = PointerInteractionController::new();

    ctrl.pointer_down_on_node(&store, &viewport, &a, NodeRegion::Body, Point::ORIGIN);
    ctrl.pointer_move(&mut store, &viewport, Point::new(50.0, 50.0));

    let (a_output, b_after) = endpoints_of(&store, &conn);
    assert_eq!(a_output, Point::new(350.0, 150.0));
    assert_eq!(b_after, b_input);
}

#[test]
fn test_connection_gesture_commits_on_input_anchor() {
    let (mut store, a, b) = create_pair();
    let viewport = Viewport::default();
    let mut ctrl = PointerInteractionController::new();

    ctrl.pointer_down_on_anchor(&store, &viewport, AnchorRef::output(a.clone()), Point::new(300.0, 100.0));
    assert_eq!(
        ctrl.pointer_move(&mut store, &viewport, Point::new(380.0, 110.0)),
        InteractionOutcome::ConnectionPreview
    );
    assert!(ctrl.transient().is_some());

    let outcome = ctrl.pointer_up(&mut store, Some(AnchorRef::input(b.clone())));
    assert!(matches!(outcome, InteractionOutcome::ConnectionCreated { replaced: None, .. }));
    assert!(ctrl.is_idle());
    assert!(ctrl.transient().is_none());
    assert_eq!(store.connections()[0].source_node_id, a);
}

#[test]
fn test_connection_gesture_onto_own_input_is_rejected() {
    let (mut store, a, _) = create_pair();
    let viewport = Viewport::default();
    let mut ctrl = PointerInteractionController::new();

    ctrl.pointer_down_on_anchor(&store, &viewport, AnchorRef::output(a.clone()), Point::ORIGIN);
    let outcome = ctrl.pointer_up(&mut store, Some(AnchorRef::input(a)));

    assert_eq!(outcome, InteractionOutcome::ConnectionRejected(RejectReason::SelfLoop));
    assert!(store.connections().is_empty());
}

#[test]
fn test_off_target_release_and_escape_discard_the_gesture() {
    let (mut store, a, _) = create_pair();
    let viewport = Viewport::default();
    let mut ctrl = PointerInteractionController::new();

    ctrl.pointer_down_on_anchor(&store, &viewport, AnchorRef::output(a.clone()), Point::ORIGIN);
    assert_eq!(ctrl.pointer_up(&mut store, None), InteractionOutcome::Cancelled);

    ctrl.pointer_down_on_anchor(&store, &viewport, AnchorRef::output(a), Point::ORIGIN);
    assert_eq!(ctrl.key(&mut store, Key::Escape), InteractionOutcome::Cancelled);
    assert!(ctrl.is_idle());
    assert!(store.connections().is_empty());
}

#[test]
fn test_backspace_deletes_selected_connection() {
    let (mut store, a, b) = create_pair();
    let conn = store.add_connection(&a, &b).unwrap();
    let mut ctrl = PointerInteractionController::new();

    assert_eq!(
        ctrl.select_connection(&store, &conn),
        InteractionOutcome::SelectionChanged(Some(conn.clone()))
    );
    assert_eq!(
        ctrl.key(&mut store, Key::Backspace),
        InteractionOutcome::ConnectionDeleted(conn)
    );
    assert!(store.connections().is_empty());
    assert!(ctrl.selected_connection().is_none());
}

#[test]
fn test_delete_without_selection_does_nothing() {
    let (mut store, a, b) = create_pair();
    store.add_connection(&a, &b).unwrap();
    let mut ctrl = PointerInteractionController::new();

    assert_eq!(ctrl.key(&mut store, Key::Delete), InteractionOutcome::Ignored);
    assert_eq!(store.connections().len(), 1);
}

#[test]
fn test_escape_and_canvas_click_clear_selection() {
    let (mut store, a, b) = create_pair();
    let conn = store.add_connection(&a, &b).unwrap();
    let mut ctrl = PointerInteractionController::new();

    ctrl.select_connection(&store, &conn);
    assert_eq!(ctrl.key(&mut store, Key::Escape), InteractionOutcome::SelectionChanged(None));

    ctrl.select_connection(&store, &conn);
    assert_eq!(ctrl.click_canvas(), InteractionOutcome::SelectionChanged(None));
    assert_eq!(store.connections().len(), 1);
}

#[test]
fn test_only_one_gesture_at_a_time() {
    let (mut store, a, b) = create_pair();
    let viewport = Viewport::default();
    let mut ctrl = PointerInteractionController::new();

    ctrl.pointer_down_on_anchor(&store, &viewport, AnchorRef::output(a), Point::ORIGIN);
    let outcome = ctrl.pointer_down_on_node(&store, &viewport, &b, NodeRegion::Body, Point::ORIGIN);

    assert_eq!(outcome, InteractionOutcome::Ignored);
    assert!(matches!(ctrl.state(), DragState::DraggingConnection { .. }));
    ctrl.pointer_move(&mut store, &viewport, Point::new(500.0, 500.0));
    assert_eq!(store.node(&b).unwrap().position, Point::new(400.0, 0.0));
}

#[test]
fn test_zoom_steps_are_clamped_and_rounded() {
    let mut viewport = Viewport::default();
    assert_eq!(viewport.zoom_in(), 1.1);
    assert_eq!(viewport.zoom_in(), 1.2);
    assert_eq!(viewport.zoom_percent(), 120);

    for _ in 0..20 {
        viewport.zoom_in();
    }
    assert_eq!(viewport.zoom(), 2.0);

    for _ in 0..30 {
        viewport.zoom_out();
    }
    assert_eq!(viewport.zoom(), 0.5);
    assert_eq!(viewport.set_zoom(7.0), 2.0);
}

#[test]
fn test_canvas_conversion_respects_origin() {
    let mut viewport = Viewport::default();
    viewport.set_zoom(2.0);
    viewport.set_origin(Point::new(100.0, 50.0));

    let canvas = viewport.to_canvas(Point::new(300.0, 250.0));
    assert_eq!(canvas, Point::new(100.0, 100.0));
    assert_eq!(viewport.to_screen(canvas), Point::new(300.0, 250.0));
}

#[test]
fn test_nan_zoom_leaves_drag_positions_finite() {
    let mut editor = WorkflowEditor::default();
    let id = editor.drop_catalogue_item("clay-table").unwrap();

    assert_eq!(editor.set_zoom(f64::NAN), 1.0);
    assert_eq!(editor.render_snapshot().zoom_percent, 100);

    editor.pointer_down_on_node(&id, NodeRegion::Body, Point::new(100.0, 100.0));
    editor.pointer_move(Point::new(150.0, 150.0));
    editor.pointer_up(None);

    assert_eq!(editor.store().node(&id).unwrap().position, Point::new(150.0, 150.0));
}

#[test]
fn test_editor_with_inverted_zoom_limits_uses_defaults() {
    let mut config = EngineConfig::default();
    config.zoom.min = 2.0;
    config.zoom.max = 1.0;
    assert!(config.validate().is_err());

    let mut editor = WorkflowEditor::new(config);
    assert_eq!(editor.zoom_in(), 1.1);
    assert_eq!(editor.zoom_out(), 1.0);
    assert_eq!(editor.set_zoom(9.0), 2.0);
}

#[test]
fn test_escape_mid_drag_stops_moving_the_node() {
    let mut editor = WorkflowEditor::default();
    let id = editor.drop_catalogue_item("csv-upload").unwrap();

    editor.pointer_down_on_node(&id, NodeRegion::Body, Point::new(100.0, 100.0));
    assert_eq!(editor.pointer_move(Point::new(120.0, 110.0)), InteractionOutcome::NodeMoved);
    assert_eq!(editor.key(Key::Escape), InteractionOutcome::Cancelled);
    assert!(editor.controller().is_idle());

    assert_eq!(editor.pointer_move(Point::new(400.0, 400.0)), InteractionOutcome::Ignored);
    assert_eq!(editor.store().node(&id).unwrap().position, Point::new(120.0, 110.0));
}
