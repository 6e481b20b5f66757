use super::*;

// =============================================================================
// BoardCache
// =============================================================================

#[test]
fn board_cache_new_is_empty() {
    let cache = BoardCache::new();
    assert!(cache.folders.is_empty());
    assert!(cache.headers.is_empty());
    assert!(cache.paths.is_empty());
    assert!(cache.is_clean());
}

#[test]
fn board_cache_default_equals_new() {
    let a = BoardCache::new();
    let b = BoardCache::default();
    assert_eq!(a.folders.len(), b.folders.len());
    assert_eq!(a.headers.len(), b.headers.len());
    assert_eq!(a.paths.len(), b.paths.len());
}

#[test]
fn board_cache_dirty_makes_it_unclean() {
    let mut cache = BoardCache::new();
    cache.dirty_paths.insert(Uuid::new_v4());
    assert!(!cache.is_clean());
}

// =============================================================================
// Document serde
// =============================================================================

#[test]
fn folder_doc_serde_round_trip() {
    let folder = test_helpers::dummy_folder();
    let json = serde_json::to_string(&folder).unwrap();
    let restored: FolderDoc = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, folder);
}

#[test]
fn folder_doc_missing_cards_defaults_to_empty_array() {
    let id = Uuid::new_v4();
    let board_id = Uuid::new_v4();
    let json = format!(
        r#"{{"id":"{id}","board_id":"{board_id}","title":"Inbox","x":1.0,"y":2.0,"width":220.0,"height":140.0,"z_index":0}}"#
    );
    let folder: FolderDoc = serde_json::from_str(&json).unwrap();
    assert_eq!(folder.cards, serde_json::json!([]));
}

#[test]
fn header_doc_serde_round_trip() {
    let header = test_helpers::dummy_header();
    let json = serde_json::to_string(&header).unwrap();
    let restored: HeaderDoc = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, header);
}

#[test]
fn path_doc_missing_points_defaults_to_empty_array() {
    let id = Uuid::new_v4();
    let board_id = Uuid::new_v4();
    let json = format!(r##"{{"id":"{id}","board_id":"{board_id}","color":"#333","width":2.0}}"##);
    let path: PathDoc = serde_json::from_str(&json).unwrap();
    assert_eq!(path.points, serde_json::json!([]));
}

// =============================================================================
// Seed helpers
// =============================================================================

#[tokio::test]
async fn seed_board_with_folders_rebinds_board_id() {
    let state = test_helpers::test_app_state();
    let folder = test_helpers::dummy_folder();
    let folder_id = folder.id;
    let board_id = test_helpers::seed_board_with_folders(&state, vec![folder]).await;

    let boards = state.boards.read().await;
    let cache = boards.get(&board_id).unwrap();
    assert_eq!(cache.folders.get(&folder_id).unwrap().board_id, board_id);
}
