use super::*;
use crate::doc::{CanvasHeader, DrawingPath, Folder};
use uuid::Uuid;

fn doc_with_folder(x: f64, y: f64) -> (BoardDoc, EntityId) {
    let board = Uuid::new_v4();
    let mut doc = BoardDoc::new();
    let folder = Folder::new(board, "A", x, y);
    let id = folder.id;
    doc.insert_folder(folder);
    (doc, id)
}

// --- point_segment_dist ---

#[test]
fn point_segment_dist_perpendicular() {
    let d = point_segment_dist(Point::new(5.0, 3.0), Point::new(0.0, 0.0), Point::new(10.0, 0.0));
    assert!((d - 3.0).abs() < 1e-10);
}

#[test]
fn point_segment_dist_clamps_to_endpoint() {
    let d = point_segment_dist(Point::new(-3.0, 4.0), Point::new(0.0, 0.0), Point::new(10.0, 0.0));
    assert!((d - 5.0).abs() < 1e-10);
}

#[test]
fn point_segment_dist_degenerate_segment() {
    let d = point_segment_dist(Point::new(3.0, 4.0), Point::new(0.0, 0.0), Point::new(0.0, 0.0));
    assert!((d - 5.0).abs() < 1e-10);
}

// --- Folder hits ---

#[test]
fn hit_folder_body() {
    let (doc, id) = doc_with_folder(100.0, 100.0);
    let hit = hit_test(Point::new(150.0, 150.0), &doc, &Camera::default());
    assert_eq!(hit, Some(Hit { id, kind: HitKind::Folder }));
}

#[test]
fn miss_outside_folder() {
    let (doc, _) = doc_with_folder(100.0, 100.0);
    assert!(hit_test(Point::new(10.0, 10.0), &doc, &Camera::default()).is_none());
}

#[test]
fn topmost_folder_wins_on_overlap() {
    let board = Uuid::new_v4();
    let mut doc = BoardDoc::new();
    let below = Folder::new(board, "below", 0.0, 0.0);
    let mut above = Folder::new(board, "above", 50.0, 50.0);
    above.z_index = 3;
    let above_id = above.id;
    doc.insert_folder(below);
    doc.insert_folder(above);

    let hit = hit_test(Point::new(60.0, 60.0), &doc, &Camera::default());
    assert_eq!(hit.map(|h| h.id), Some(above_id));
}

#[test]
fn later_insertion_wins_at_equal_z() {
    let board = Uuid::new_v4();
    let mut doc = BoardDoc::new();
    let first = Folder::new(board, "first", 0.0, 0.0);
    let second = Folder::new(board, "second", 0.0, 0.0);
    let second_id = second.id;
    doc.insert_folder(first);
    doc.insert_folder(second);

    let hit = hit_test(Point::new(10.0, 10.0), &doc, &Camera::default());
    assert_eq!(hit.map(|h| h.id), Some(second_id));
}

// --- Header hits ---

#[test]
fn hit_header_within_text_bounds() {
    let board = Uuid::new_v4();
    let mut doc = BoardDoc::new();
    let header = CanvasHeader { id: Uuid::new_v4(), board_id: board, text: "Plans".into(), x: 0.0, y: 0.0 };
    let id = header.id;
    doc.insert_header(header);

    let hit = hit_test(Point::new(10.0, 10.0), &doc, &Camera::default());
    assert_eq!(hit, Some(Hit { id, kind: HitKind::Header }));
}

#[test]
fn folder_shadows_header() {
    let board = Uuid::new_v4();
    let mut doc = BoardDoc::new();
    doc.insert_header(CanvasHeader { id: Uuid::new_v4(), board_id: board, text: "under".into(), x: 0.0, y: 0.0 });
    let folder = Folder::new(board, "over", 0.0, 0.0);
    let folder_id = folder.id;
    doc.insert_folder(folder);

    let hit = hit_test(Point::new(10.0, 10.0), &doc, &Camera::default());
    assert_eq!(hit, Some(Hit { id: folder_id, kind: HitKind::Folder }));
}

// --- Path hits ---

fn straight_path(board: EntityId) -> DrawingPath {
    DrawingPath {
        id: Uuid::new_v4(),
        board_id: board,
        color: "#000".into(),
        width: 2.0,
        points: vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)],
    }
}

#[test]
fn hit_path_within_slop() {
    let board = Uuid::new_v4();
    let mut doc = BoardDoc::new();
    let path = straight_path(board);
    let id = path.id;
    doc.insert_path(path);

    let hit = hit_test(Point::new(50.0, 4.0), &doc, &Camera::default());
    assert_eq!(hit, Some(Hit { id, kind: HitKind::Path }));
}

#[test]
fn miss_path_beyond_slop() {
    let board = Uuid::new_v4();
    let mut doc = BoardDoc::new();
    doc.insert_path(straight_path(board));

    assert!(hit_test(Point::new(50.0, 30.0), &doc, &Camera::default()).is_none());
}

#[test]
fn path_slop_grows_when_zoomed_out() {
    let board = Uuid::new_v4();
    let mut doc = BoardDoc::new();
    doc.insert_path(straight_path(board));

    // 6px slop at zoom 0.5 covers 12 world units (plus half stroke width).
    let camera = Camera { pan_x: 0.0, pan_y: 0.0, zoom: 0.5 };
    assert!(hit_test(Point::new(50.0, 12.5), &doc, &camera).is_some());
    assert!(hit_test(Point::new(50.0, 20.0), &doc, &camera).is_none());
}

#[test]
fn single_point_path_is_hittable() {
    let board = Uuid::new_v4();
    let mut doc = BoardDoc::new();
    let path = DrawingPath {
        id: Uuid::new_v4(),
        board_id: board,
        color: "#000".into(),
        width: 2.0,
        points: vec![Point::new(40.0, 40.0)],
    };
    let id = path.id;
    doc.insert_path(path);

    let hit = hit_test(Point::new(43.0, 40.0), &doc, &Camera::default());
    assert_eq!(hit.map(|h| h.id), Some(id));
}

#[test]
fn empty_doc_hits_nothing() {
    let doc = BoardDoc::new();
    assert!(hit_test(Point::new(0.0, 0.0), &doc, &Camera::default()).is_none());
}
