#![allow(clippy::float_cmp)]

use uuid::Uuid;

use super::*;
use crate::input::{Button, GestureState, Key, Modifiers, Tool, WheelDelta};

// =============================================================
// Helpers
// =============================================================

fn no_modifiers() -> Modifiers {
    Modifiers::default()
}

fn shift_modifier() -> Modifiers {
    Modifiers { shift: true, ..Default::default() }
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn core_with_folder(x: f64, y: f64) -> (EngineCore, EntityId) {
    let mut core = EngineCore::new();
    let board = Uuid::new_v4();
    let folder = Folder::new(board, "A", x, y);
    let id = folder.id;
    core.load_board(board, vec![folder], Vec::new(), Vec::new());
    (core, id)
}

fn has_action<F>(actions: &[Action], pred: F) -> bool
where
    F: Fn(&Action) -> bool,
{
    actions.iter().any(pred)
}

fn has_render_needed(actions: &[Action]) -> bool {
    has_action(actions, |a| matches!(a, Action::RenderNeeded))
}

fn has_selection_changed(actions: &[Action]) -> bool {
    has_action(actions, |a| matches!(a, Action::SelectionChanged))
}

// =============================================================
// Construction and data inputs
// =============================================================

#[test]
fn core_defaults() {
    let core = EngineCore::new();
    assert!(core.selection().is_empty());
    assert_eq!(core.ui.tool, Tool::Select);
    assert!(core.doc.is_empty());
    assert!(!core.gesture.is_active());
    assert_eq!(core.camera().zoom, 1.0);
}

#[test]
fn load_board_replaces_doc_and_clears_selection() {
    let (mut core, id) = core_with_folder(0.0, 0.0);
    core.ui.selection.insert(id);

    let board = Uuid::new_v4();
    let folder = Folder::new(board, "fresh", 5.0, 5.0);
    let new_id = folder.id;
    core.load_board(board, vec![folder], Vec::new(), Vec::new());

    assert_eq!(core.board_id, board);
    assert!(core.doc.folder(&id).is_none());
    assert!(core.doc.folder(&new_id).is_some());
    assert!(core.selection().is_empty());
}

#[test]
fn set_tool_cancels_active_gesture() {
    let (mut core, _) = core_with_folder(0.0, 0.0);
    core.on_pointer_down(pt(50.0, 50.0), Button::Primary, no_modifiers());
    assert!(core.gesture.is_active());

    core.set_tool(Tool::Draw);
    assert!(!core.gesture.is_active());
    assert_eq!(core.ui.tool, Tool::Draw);
}

// =============================================================
// Pointer down — Select tool
// =============================================================

#[test]
fn click_folder_selects_and_starts_drag() {
    let (mut core, id) = core_with_folder(0.0, 0.0);
    let actions = core.on_pointer_down(pt(50.0, 50.0), Button::Primary, no_modifiers());

    assert!(core.selection().contains(&id));
    assert!(matches!(core.gesture, GestureState::DraggingFolder { .. }));
    assert!(has_selection_changed(&actions));
    assert!(has_render_needed(&actions));
}

#[test]
fn click_folder_brings_it_to_front() {
    let board = Uuid::new_v4();
    let mut core = EngineCore::new();
    let mut top = Folder::new(board, "top", 300.0, 300.0);
    top.z_index = 7;
    let under = Folder::new(board, "under", 0.0, 0.0);
    let under_id = under.id;
    core.load_board(board, vec![top, under], Vec::new(), Vec::new());

    core.on_pointer_down(pt(50.0, 50.0), Button::Primary, no_modifiers());
    assert_eq!(core.doc.folder(&under_id).unwrap().z_index, 8);
}

#[test]
fn shift_click_adds_to_selection() {
    let board = Uuid::new_v4();
    let mut core = EngineCore::new();
    let a = Folder::new(board, "a", 0.0, 0.0);
    let b = Folder::new(board, "b", 500.0, 500.0);
    let a_id = a.id;
    let b_id = b.id;
    core.load_board(board, vec![a, b], Vec::new(), Vec::new());

    core.on_pointer_down(pt(50.0, 50.0), Button::Primary, no_modifiers());
    core.on_pointer_up(pt(50.0, 50.0), Button::Primary, no_modifiers());
    core.on_pointer_down(pt(550.0, 550.0), Button::Primary, shift_modifier());
    core.on_pointer_up(pt(550.0, 550.0), Button::Primary, shift_modifier());

    assert!(core.selection().contains(&a_id));
    assert!(core.selection().contains(&b_id));
}

#[test]
fn shift_click_selected_folder_deselects_it() {
    let (mut core, id) = core_with_folder(0.0, 0.0);
    core.ui.selection.insert(id);

    core.on_pointer_down(pt(50.0, 50.0), Button::Primary, shift_modifier());
    assert!(!core.selection().contains(&id));
    // Deselected on down, so no drag starts.
    assert!(!matches!(core.gesture, GestureState::DraggingFolder { .. }));
}

#[test]
fn click_empty_space_clears_selection_and_starts_marquee() {
    let (mut core, id) = core_with_folder(0.0, 0.0);
    core.ui.selection.insert(id);

    let actions = core.on_pointer_down(pt(800.0, 800.0), Button::Primary, no_modifiers());
    assert!(core.selection().is_empty());
    assert!(matches!(core.gesture, GestureState::Selecting { .. }));
    assert!(has_selection_changed(&actions));
}

// =============================================================
// Marquee selection
// =============================================================

#[test]
fn marquee_selects_intersecting_folders() {
    let board = Uuid::new_v4();
    let mut core = EngineCore::new();
    let near = Folder::new(board, "near", 0.0, 0.0);
    let far = Folder::new(board, "far", 2000.0, 2000.0);
    let near_id = near.id;
    let far_id = far.id;
    core.load_board(board, vec![near, far], Vec::new(), Vec::new());

    core.on_pointer_down(pt(600.0, 600.0), Button::Primary, no_modifiers());
    let actions = core.on_pointer_move(pt(-10.0, -10.0), no_modifiers());

    assert!(core.selection().contains(&near_id));
    assert!(!core.selection().contains(&far_id));
    assert!(has_selection_changed(&actions));
    assert!(core.marquee().is_some());

    core.on_pointer_up(pt(-10.0, -10.0), Button::Primary, no_modifiers());
    assert!(core.marquee().is_none());
    assert!(core.selection().contains(&near_id));
}

#[test]
fn shift_marquee_extends_existing_selection() {
    let board = Uuid::new_v4();
    let mut core = EngineCore::new();
    let kept = Folder::new(board, "kept", 0.0, 0.0);
    let swept = Folder::new(board, "swept", 2000.0, 2000.0);
    let kept_id = kept.id;
    let swept_id = swept.id;
    core.load_board(board, vec![kept, swept], Vec::new(), Vec::new());
    core.ui.selection.insert(kept_id);

    core.on_pointer_down(pt(1900.0, 1900.0), Button::Primary, shift_modifier());
    core.on_pointer_move(pt(2300.0, 2300.0), shift_modifier());
    core.on_pointer_up(pt(2300.0, 2300.0), Button::Primary, shift_modifier());

    assert!(core.selection().contains(&kept_id));
    assert!(core.selection().contains(&swept_id));
}

#[test]
fn marquee_rect_is_corner_normalized() {
    let mut core = EngineCore::new();
    core.on_pointer_down(pt(100.0, 100.0), Button::Primary, no_modifiers());
    core.on_pointer_move(pt(20.0, 40.0), no_modifiers());

    let (min, max) = core.marquee().unwrap();
    assert_eq!(min.x, 20.0);
    assert_eq!(min.y, 40.0);
    assert_eq!(max.x, 100.0);
    assert_eq!(max.y, 100.0);
}

// =============================================================
// Folder dragging
// =============================================================

#[test]
fn long_drag_moves_folder_at_full_strength() {
    let (mut core, id) = core_with_folder(0.0, 0.0);
    core.on_pointer_down(pt(50.0, 50.0), Button::Primary, no_modifiers());
    core.on_pointer_move(pt(100.0, 50.0), no_modifiers());

    // 50px exceeds the smoothing ramp, so the full delta applies.
    assert_eq!(core.doc.folder(&id).unwrap().x, 50.0);
    assert_eq!(core.doc.folder(&id).unwrap().y, 0.0);
}

#[test]
fn short_drag_is_damped() {
    let (mut core, id) = core_with_folder(0.0, 0.0);
    core.on_pointer_down(pt(50.0, 50.0), Button::Primary, no_modifiers());
    core.on_pointer_move(pt(60.0, 50.0), no_modifiers());

    let x = core.doc.folder(&id).unwrap().x;
    assert!(x > 3.0, "damping floor should still move the folder, got {x}");
    assert!(x < 10.0, "short move should be softened, got {x}");
}

#[test]
fn drag_release_emits_folder_moved_with_position_and_z() {
    let (mut core, id) = core_with_folder(0.0, 0.0);
    core.on_pointer_down(pt(50.0, 50.0), Button::Primary, no_modifiers());
    core.on_pointer_move(pt(150.0, 100.0), no_modifiers());
    let actions = core.on_pointer_up(pt(150.0, 100.0), Button::Primary, no_modifiers());

    assert!(matches!(core.gesture, GestureState::Idle));
    let moved = actions.iter().find_map(|a| match a {
        Action::FolderMoved { id: fid, fields } if *fid == id => Some(fields.clone()),
        _ => None,
    });
    let fields = moved.expect("drag should emit FolderMoved");
    assert_eq!(fields.x, Some(100.0));
    assert_eq!(fields.y, Some(50.0));
    assert!(fields.z_index.is_some());
}

#[test]
fn click_without_drag_requests_folder_open() {
    let (mut core, id) = core_with_folder(0.0, 0.0);
    core.on_pointer_down(pt(50.0, 50.0), Button::Primary, no_modifiers());
    core.on_pointer_move(pt(51.0, 50.0), no_modifiers());
    let actions = core.on_pointer_up(pt(51.0, 50.0), Button::Primary, no_modifiers());

    assert!(has_action(&actions, |a| matches!(a, Action::FolderOpenRequested { id: fid } if *fid == id)));
    assert!(!has_action(&actions, |a| matches!(a, Action::FolderMoved { .. })));
    // Any sub-threshold wobble is undone.
    assert_eq!(core.doc.folder(&id).unwrap().x, 0.0);
    assert_eq!(core.doc.folder(&id).unwrap().y, 0.0);
}

#[test]
fn click_without_drag_keeps_stacking_order() {
    let board = Uuid::new_v4();
    let mut core = EngineCore::new();
    let mut top = Folder::new(board, "top", 300.0, 300.0);
    top.z_index = 7;
    let under = Folder::new(board, "under", 0.0, 0.0);
    let under_id = under.id;
    core.load_board(board, vec![top, under], Vec::new(), Vec::new());

    core.on_pointer_down(pt(50.0, 50.0), Button::Primary, no_modifiers());
    core.on_pointer_up(pt(50.0, 50.0), Button::Primary, no_modifiers());

    // Opening a folder is not a stacking change; nothing was persisted, so
    // the doc must not drift from the server.
    assert_eq!(core.doc.folder(&under_id).unwrap().z_index, 0);
}

// =============================================================
// Header placement and dragging
// =============================================================

#[test]
fn header_tool_places_header_and_resets_to_select() {
    let mut core = EngineCore::new();
    core.board_id = Uuid::new_v4();
    core.set_tool(Tool::Header);
    let actions = core.on_pointer_down(pt(30.0, 40.0), Button::Primary, no_modifiers());

    assert_eq!(core.doc.headers.len(), 1);
    let header = &core.doc.headers[0];
    assert_eq!(header.x, 30.0);
    assert_eq!(header.y, 40.0);
    assert!(core.selection().contains(&header.id));
    assert_eq!(core.ui.tool, Tool::Select);
    assert!(has_action(&actions, |a| matches!(a, Action::HeaderCreated(_))));
}

#[test]
fn header_drag_emits_header_moved() {
    let board = Uuid::new_v4();
    let mut core = EngineCore::new();
    let header = CanvasHeader { id: Uuid::new_v4(), board_id: board, text: "Notes".into(), x: 0.0, y: 0.0 };
    let id = header.id;
    core.load_board(board, Vec::new(), vec![header], Vec::new());

    core.on_pointer_down(pt(10.0, 10.0), Button::Primary, no_modifiers());
    assert!(matches!(core.gesture, GestureState::DraggingHeader { .. }));

    core.on_pointer_move(pt(110.0, 60.0), no_modifiers());
    let actions = core.on_pointer_up(pt(110.0, 60.0), Button::Primary, no_modifiers());

    let moved = actions.iter().find_map(|a| match a {
        Action::HeaderMoved { id: hid, fields } if *hid == id => Some(fields.clone()),
        _ => None,
    });
    let fields = moved.expect("drag should emit HeaderMoved");
    assert_eq!(fields.x, Some(100.0));
    assert_eq!(fields.y, Some(50.0));
}

// =============================================================
// Drawing
// =============================================================

#[test]
fn draw_tool_creates_provisional_path() {
    let mut core = EngineCore::new();
    core.board_id = Uuid::new_v4();
    core.set_stroke_color("#D94B4B");
    core.set_tool(Tool::Draw);

    core.on_pointer_down(pt(10.0, 10.0), Button::Primary, no_modifiers());
    assert!(matches!(core.gesture, GestureState::Drawing { .. }));
    assert_eq!(core.doc.paths.len(), 1);
    assert_eq!(core.doc.paths[0].color, "#D94B4B");
    assert_eq!(core.doc.paths[0].points.len(), 1);
}

#[test]
fn drawing_skips_samples_closer_than_threshold() {
    let mut core = EngineCore::new();
    core.set_tool(Tool::Draw);
    core.on_pointer_down(pt(10.0, 10.0), Button::Primary, no_modifiers());

    let actions = core.on_pointer_move(pt(10.5, 10.0), no_modifiers());
    assert!(actions.is_empty());
    assert_eq!(core.doc.paths[0].points.len(), 1);

    core.on_pointer_move(pt(20.0, 10.0), no_modifiers());
    assert_eq!(core.doc.paths[0].points.len(), 2);
}

#[test]
fn drawing_release_emits_path_drawn() {
    let mut core = EngineCore::new();
    core.set_tool(Tool::Draw);
    core.on_pointer_down(pt(10.0, 10.0), Button::Primary, no_modifiers());
    core.on_pointer_move(pt(60.0, 60.0), no_modifiers());
    let actions = core.on_pointer_up(pt(60.0, 60.0), Button::Primary, no_modifiers());

    assert!(has_action(&actions, |a| matches!(a, Action::PathDrawn(_))));
    assert_eq!(core.doc.paths.len(), 1);
    // The tool stays active for the next stroke.
    assert_eq!(core.ui.tool, Tool::Draw);
}

#[test]
fn single_sample_stroke_is_discarded() {
    let mut core = EngineCore::new();
    core.set_tool(Tool::Draw);
    core.on_pointer_down(pt(10.0, 10.0), Button::Primary, no_modifiers());
    let actions = core.on_pointer_up(pt(10.0, 10.0), Button::Primary, no_modifiers());

    assert!(!has_action(&actions, |a| matches!(a, Action::PathDrawn(_))));
    assert!(core.doc.paths.is_empty());
}

// =============================================================
// Panning
// =============================================================

#[test]
fn middle_button_pans_regardless_of_tool() {
    let mut core = EngineCore::new();
    core.set_tool(Tool::Draw);
    let actions = core.on_pointer_down(pt(100.0, 100.0), Button::Middle, no_modifiers());
    assert!(matches!(core.gesture, GestureState::Panning { .. }));
    assert!(has_action(&actions, |a| matches!(a, Action::SetCursor(_))));

    core.on_pointer_move(pt(120.0, 110.0), no_modifiers());
    assert_eq!(core.camera.pan_x, 20.0);
    assert_eq!(core.camera.pan_y, 10.0);
}

#[test]
fn pan_tool_pans_with_primary_button() {
    let mut core = EngineCore::new();
    core.set_tool(Tool::Pan);
    core.on_pointer_down(pt(0.0, 0.0), Button::Primary, no_modifiers());
    core.on_pointer_move(pt(10.0, 5.0), no_modifiers());
    core.on_pointer_move(pt(20.0, 15.0), no_modifiers());
    assert_eq!(core.camera.pan_x, 20.0);
    assert_eq!(core.camera.pan_y, 15.0);

    let actions = core.on_pointer_up(pt(20.0, 15.0), Button::Primary, no_modifiers());
    assert!(matches!(core.gesture, GestureState::Idle));
    assert!(has_action(&actions, |a| matches!(a, Action::SetCursor(c) if c == "default")));
}

#[test]
fn secondary_button_is_noop() {
    let mut core = EngineCore::new();
    let actions = core.on_pointer_down(pt(50.0, 50.0), Button::Secondary, no_modifiers());
    assert!(actions.is_empty());
    assert!(matches!(core.gesture, GestureState::Idle));
}

#[test]
fn idle_move_and_up_are_noops() {
    let mut core = EngineCore::new();
    assert!(core.on_pointer_move(pt(5.0, 5.0), no_modifiers()).is_empty());
    assert!(core.on_pointer_up(pt(5.0, 5.0), Button::Primary, no_modifiers()).is_empty());
}

// =============================================================
// Wheel
// =============================================================

#[test]
fn wheel_up_zooms_in_and_down_zooms_out() {
    let mut core = EngineCore::new();
    core.on_wheel(pt(400.0, 300.0), WheelDelta { dx: 0.0, dy: -10.0 }, no_modifiers());
    assert!(core.camera.zoom > 1.0);

    let mut core = EngineCore::new();
    core.on_wheel(pt(400.0, 300.0), WheelDelta { dx: 0.0, dy: 10.0 }, no_modifiers());
    assert!(core.camera.zoom < 1.0);
}

#[test]
fn wheel_zoom_preserves_world_point_under_cursor() {
    let mut core = EngineCore::new();
    let screen = pt(400.0, 300.0);
    let before = core.camera.screen_to_world(screen);

    core.on_wheel(screen, WheelDelta { dx: 0.0, dy: -10.0 }, no_modifiers());

    let after = core.camera.screen_to_world(screen);
    assert!((before.x - after.x).abs() < 1e-9);
    assert!((before.y - after.y).abs() < 1e-9);
}

#[test]
fn shift_wheel_pans_horizontally() {
    let mut core = EngineCore::new();
    core.on_wheel(pt(0.0, 0.0), WheelDelta { dx: 0.0, dy: 10.0 }, shift_modifier());
    assert_eq!(core.camera.pan_x, -10.0);
    assert_eq!(core.camera.zoom, 1.0);
}

// =============================================================
// Keyboard — Delete
// =============================================================

#[test]
fn delete_removes_selected_entities() {
    let board = Uuid::new_v4();
    let mut core = EngineCore::new();
    let folder = Folder::new(board, "gone", 0.0, 0.0);
    let keep = Folder::new(board, "keep", 500.0, 500.0);
    let folder_id = folder.id;
    let keep_id = keep.id;
    core.load_board(board, vec![folder, keep], Vec::new(), Vec::new());
    core.ui.selection.insert(folder_id);

    let actions = core.on_key_down(Key("Delete".into()), no_modifiers());
    assert!(core.doc.folder(&folder_id).is_none());
    assert!(core.doc.folder(&keep_id).is_some());
    assert!(has_action(&actions, |a| {
        matches!(a, Action::EntityDeleted { id, kind: crate::hit::HitKind::Folder } if *id == folder_id)
    }));
    assert!(has_selection_changed(&actions));
    assert!(core.selection().is_empty());
}

#[test]
fn backspace_deletes_selected_path() {
    let board = Uuid::new_v4();
    let mut core = EngineCore::new();
    let path = DrawingPath {
        id: Uuid::new_v4(),
        board_id: board,
        color: "#000".into(),
        width: 2.0,
        points: vec![pt(0.0, 0.0), pt(10.0, 0.0)],
    };
    let id = path.id;
    core.load_board(board, Vec::new(), Vec::new(), vec![path]);
    core.ui.selection.insert(id);

    let actions = core.on_key_down(Key("Backspace".into()), no_modifiers());
    assert!(core.doc.path(&id).is_none());
    assert!(has_action(&actions, |a| {
        matches!(a, Action::EntityDeleted { kind: crate::hit::HitKind::Path, .. })
    }));
}

#[test]
fn delete_without_selection_is_noop() {
    let mut core = EngineCore::new();
    let actions = core.on_key_down(Key("Delete".into()), no_modifiers());
    assert!(actions.is_empty());
}

#[test]
fn delete_during_gesture_is_noop() {
    let (mut core, id) = core_with_folder(0.0, 0.0);
    core.on_pointer_down(pt(50.0, 50.0), Button::Primary, no_modifiers());
    let actions = core.on_key_down(Key("Delete".into()), no_modifiers());
    assert!(actions.is_empty());
    assert!(core.doc.folder(&id).is_some());
}

// =============================================================
// Keyboard — Escape
// =============================================================

#[test]
fn escape_cancels_drag_and_reverts_position() {
    let (mut core, id) = core_with_folder(0.0, 0.0);
    core.on_pointer_down(pt(50.0, 50.0), Button::Primary, no_modifiers());
    core.on_pointer_move(pt(150.0, 150.0), no_modifiers());
    assert!(core.doc.folder(&id).unwrap().x > 0.0);

    core.on_key_down(Key("Escape".into()), no_modifiers());
    assert!(matches!(core.gesture, GestureState::Idle));
    assert_eq!(core.doc.folder(&id).unwrap().x, 0.0);
    assert_eq!(core.doc.folder(&id).unwrap().y, 0.0);
}

#[test]
fn escape_cancels_drag_and_reverts_stacking_order() {
    let board = Uuid::new_v4();
    let mut core = EngineCore::new();
    let mut top = Folder::new(board, "top", 300.0, 300.0);
    top.z_index = 7;
    let under = Folder::new(board, "under", 0.0, 0.0);
    let under_id = under.id;
    core.load_board(board, vec![top, under], Vec::new(), Vec::new());

    core.on_pointer_down(pt(50.0, 50.0), Button::Primary, no_modifiers());
    assert_eq!(core.doc.folder(&under_id).unwrap().z_index, 8);

    core.on_key_down(Key("Escape".into()), no_modifiers());
    assert_eq!(core.doc.folder(&under_id).unwrap().z_index, 0);
}

#[test]
fn escape_discards_in_flight_stroke() {
    let mut core = EngineCore::new();
    core.set_tool(Tool::Draw);
    core.on_pointer_down(pt(10.0, 10.0), Button::Primary, no_modifiers());
    core.on_pointer_move(pt(60.0, 60.0), no_modifiers());

    core.on_key_down(Key("Escape".into()), no_modifiers());
    assert!(core.doc.paths.is_empty());
    assert!(matches!(core.gesture, GestureState::Idle));
}

#[test]
fn escape_clears_selection_when_idle() {
    let (mut core, id) = core_with_folder(0.0, 0.0);
    core.ui.selection.insert(id);

    let actions = core.on_key_down(Key("Escape".into()), no_modifiers());
    assert!(core.selection().is_empty());
    assert!(has_selection_changed(&actions));
}

#[test]
fn escape_with_nothing_to_do_is_noop() {
    let mut core = EngineCore::new();
    assert!(core.on_key_down(Key("Escape".into()), no_modifiers()).is_empty());
}

#[test]
fn unknown_key_is_noop() {
    let mut core = EngineCore::new();
    assert!(core.on_key_down(Key("a".into()), no_modifiers()).is_empty());
}
