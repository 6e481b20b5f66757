use super::*;

use serde_json::json;

fn payload(title: &str) -> BookmarkPayload {
    BookmarkPayload {
        title: title.to_owned(),
        url: format!("https://example.com/{title}"),
        description: String::new(),
        screenshot: None,
        timestamp: 1_700_000_000,
    }
}

fn folder_with_card(board_id: EntityId) -> Folder {
    let mut folder = Folder::new(board_id, "Research", 0.0, 0.0);
    folder.cards.push(Card {
        id: Uuid::new_v4(),
        title: "Reading".to_owned(),
        content: String::new(),
        sections: vec![Section {
            id: Uuid::new_v4(),
            name: "Links".to_owned(),
            bookmarks: Vec::new(),
        }],
    });
    folder
}

// --- parse_payload ---

#[test]
fn parse_accepts_tagged_payload() {
    let raw = json!({
        "type": "zenban_bookmark",
        "title": "Docs",
        "url": "https://example.com",
        "timestamp": 1_700_000_000,
    });
    let parsed = parse_payload(&raw).unwrap();
    assert_eq!(parsed.title, "Docs");
    assert_eq!(parsed.description, "");
    assert!(parsed.screenshot.is_none());
}

#[test]
fn parse_rejects_missing_or_wrong_type_tag() {
    let untagged = json!({ "title": "x", "url": "y", "timestamp": 1 });
    assert!(parse_payload(&untagged).is_none());

    let wrong = json!({ "type": "other", "title": "x", "url": "y", "timestamp": 1 });
    assert!(parse_payload(&wrong).is_none());
}

#[test]
fn parse_rejects_malformed_body() {
    let raw = json!({ "type": "zenban_bookmark", "title": "no url or timestamp" });
    assert!(parse_payload(&raw).is_none());
}

// --- DuplicateGuard ---

#[test]
fn guard_accepts_first_arrival() {
    let mut guard = DuplicateGuard::new();
    assert!(guard.accept(1000.0));
}

#[test]
fn guard_rejects_within_window() {
    let mut guard = DuplicateGuard::new();
    assert!(guard.accept(1000.0));
    assert!(!guard.accept(1050.0));
    assert!(!guard.accept(1099.9));
}

#[test]
fn guard_accepts_after_window() {
    let mut guard = DuplicateGuard::new();
    assert!(guard.accept(1000.0));
    assert!(guard.accept(1100.0));
}

#[test]
fn guard_rejection_does_not_extend_window() {
    let mut guard = DuplicateGuard::new();
    assert!(guard.accept(1000.0));
    assert!(!guard.accept(1090.0));
    // Measured from the accepted arrival, not the rejected one.
    assert!(guard.accept(1101.0));
}

// --- insert_bookmark ---

#[test]
fn inserts_into_active_cards_first_section() {
    let board_id = Uuid::new_v4();
    let mut content = BoardContent {
        folders: vec![folder_with_card(board_id), folder_with_card(board_id)],
        ..BoardContent::default()
    };
    let target = content.folders[1].cards[0].id;

    let landed = insert_bookmark(&mut content, board_id, Some(target), &payload("a"));

    assert_eq!(landed, target);
    assert_eq!(content.folders[1].cards[0].sections[0].bookmarks.len(), 1);
    assert!(content.folders[0].cards[0].sections[0].bookmarks.is_empty());
}

#[test]
fn stale_active_card_falls_back_to_first_card() {
    let board_id = Uuid::new_v4();
    let mut content = BoardContent {
        folders: vec![folder_with_card(board_id)],
        ..BoardContent::default()
    };
    let first_card = content.folders[0].cards[0].id;

    let landed = insert_bookmark(&mut content, board_id, Some(Uuid::new_v4()), &payload("a"));

    assert_eq!(landed, first_card);
    assert_eq!(content.folders[0].cards[0].sections[0].bookmarks.len(), 1);
}

#[test]
fn creates_section_when_card_has_none() {
    let board_id = Uuid::new_v4();
    let mut folder = folder_with_card(board_id);
    folder.cards[0].sections.clear();
    let mut content = BoardContent { folders: vec![folder], ..BoardContent::default() };

    insert_bookmark(&mut content, board_id, None, &payload("a"));

    let card = &content.folders[0].cards[0];
    assert_eq!(card.sections.len(), 1);
    assert_eq!(card.sections[0].name, "Bookmarks");
    assert_eq!(card.sections[0].bookmarks.len(), 1);
}

#[test]
fn empty_board_grows_an_inbox() {
    let board_id = Uuid::new_v4();
    let mut content = BoardContent::default();

    let landed = insert_bookmark(&mut content, board_id, None, &payload("a"));

    assert_eq!(content.folders.len(), 1);
    let folder = &content.folders[0];
    assert_eq!(folder.title, "Inbox");
    assert_eq!(folder.board_id, board_id);
    assert_eq!(folder.cards[0].id, landed);
    assert_eq!(folder.cards[0].sections[0].bookmarks[0].title, "a");
}

#[test]
fn bookmark_copies_payload_fields() {
    let board_id = Uuid::new_v4();
    let mut content = BoardContent::default();
    let mut p = payload("Docs");
    p.description = "reference".to_owned();
    p.screenshot = Some("data:image/jpeg;base64,AAAA".to_owned());

    insert_bookmark(&mut content, board_id, None, &p);

    let bookmark = &content.folders[0].cards[0].sections[0].bookmarks[0];
    assert_eq!(bookmark.url, "https://example.com/Docs");
    assert_eq!(bookmark.description, "reference");
    assert_eq!(bookmark.screenshot.as_deref(), Some("data:image/jpeg;base64,AAAA"));
    assert_eq!(bookmark.timestamp, 1_700_000_000);
}

#[test]
fn consecutive_inserts_append_in_order() {
    let board_id = Uuid::new_v4();
    let mut content = BoardContent::default();

    insert_bookmark(&mut content, board_id, None, &payload("first"));
    insert_bookmark(&mut content, board_id, None, &payload("second"));

    assert_eq!(content.folders.len(), 1);
    let bookmarks = &content.folders[0].cards[0].sections[0].bookmarks;
    assert_eq!(bookmarks.len(), 2);
    assert_eq!(bookmarks[0].title, "first");
    assert_eq!(bookmarks[1].title, "second");
}
