use super::*;

fn summary(name: &str) -> BoardSummary {
    BoardSummary {
        id: Uuid::new_v4(),
        name: name.to_owned(),
        created_at: None,
    }
}

// --- fallback keys ---

#[test]
fn fallback_key_embeds_board_id() {
    let id = Uuid::nil();
    assert_eq!(
        fallback_key(id),
        "zenban_board_00000000-0000-0000-0000-000000000000"
    );
}

#[test]
fn boards_fallback_key_is_stable() {
    assert_eq!(BOARDS_FALLBACK_KEY, "zenban_boards");
}

// --- store transitions ---

#[test]
fn apply_boards_replaces_the_list() {
    let state = AppState::new();
    apply_boards(&state, &[summary("old")]);
    let new = vec![summary("a"), summary("b")];
    apply_boards(&state, &new);
    assert_eq!(state.boards(), new);
}

#[test]
fn apply_board_created_appends_and_sets_current() {
    let state = AppState::new();
    apply_boards(&state, &[summary("existing")]);

    let board = summary("fresh");
    let id = board.id;
    apply_board_created(&state, board);

    let boards = state.boards();
    assert_eq!(boards.len(), 2);
    assert_eq!(boards[1].name, "fresh");
    assert_eq!(state.current_board_id(), Some(id));
    assert_eq!(state.board_content(), Some(BoardContent::default()));
}

#[test]
fn apply_board_renamed_updates_matching_entry_only() {
    let state = AppState::new();
    let a = summary("a");
    let b = summary("b");
    let target = b.id;
    apply_boards(&state, &[a, b]);

    apply_board_renamed(&state, target, "renamed");

    let boards = state.boards();
    assert_eq!(boards[0].name, "a");
    assert_eq!(boards[1].name, "renamed");
}

#[test]
fn apply_board_renamed_ignores_unknown_id() {
    let state = AppState::new();
    apply_boards(&state, &[summary("a")]);
    apply_board_renamed(&state, Uuid::new_v4(), "renamed");
    assert_eq!(state.boards()[0].name, "a");
}

#[test]
fn apply_board_deleted_drops_entry() {
    let state = AppState::new();
    let a = summary("a");
    let b = summary("b");
    let gone = a.id;
    apply_boards(&state, &[a, b]);

    apply_board_deleted(&state, gone);

    let boards = state.boards();
    assert_eq!(boards.len(), 1);
    assert_eq!(boards[0].name, "b");
}

#[test]
fn apply_board_deleted_clears_current_when_it_matched() {
    let state = AppState::new();
    let board = summary("doomed");
    let id = board.id;
    apply_boards(&state, &[board]);
    state.set_current_board_id(Some(id));

    apply_board_deleted(&state, id);

    assert!(state.current_board_id().is_none());
}

#[test]
fn apply_board_deleted_keeps_current_when_other_board_deleted() {
    let state = AppState::new();
    let keep = summary("keep");
    let drop = summary("drop");
    let current = keep.id;
    let gone = drop.id;
    apply_boards(&state, &[keep, drop]);
    state.set_current_board_id(Some(current));

    apply_board_deleted(&state, gone);

    assert_eq!(state.current_board_id(), Some(current));
}

#[test]
fn apply_board_content_stores_content() {
    let state = AppState::new();
    let content = BoardContent::default();
    apply_board_content(&state, &content);
    assert_eq!(state.board_content(), Some(content));
}

#[test]
fn apply_settings_stores_document() {
    let state = AppState::new();
    apply_settings(&state, serde_json::json!({ "dark_mode": true }));
    let settings = state.settings().unwrap();
    assert_eq!(settings["dark_mode"], serde_json::json!(true));
}
