//! Hit-testing against board entities.
//!
//! Folders are checked topmost-first (highest z-index, then latest insertion),
//! then headers, then drawing paths within a screen-space slop distance.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::{Camera, Point};
use crate::consts::{HEADER_CHAR_WIDTH, HEADER_HEIGHT, PATH_HIT_SLOP_PX};
use crate::doc::{BoardDoc, EntityId};

/// What kind of entity was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitKind {
    Folder,
    Header,
    Path,
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub id: EntityId,
    pub kind: HitKind,
}

/// Test which entity (if any) is under `world_pt`.
#[must_use]
pub fn hit_test(world_pt: Point, doc: &BoardDoc, camera: &Camera) -> Option<Hit> {
    // Folders: walk draw order back-to-front so the topmost match wins.
    if let Some(folder) = doc
        .sorted_folders()
        .into_iter()
        .rev()
        .find(|f| f.contains(world_pt))
    {
        return Some(Hit { id: folder.id, kind: HitKind::Folder });
    }

    // Headers: approximate bounds from text length.
    if let Some(header) = doc.headers.iter().rev().find(|h| {
        let width = (h.text.chars().count() as f64).max(1.0) * HEADER_CHAR_WIDTH;
        world_pt.x >= h.x && world_pt.x <= h.x + width && world_pt.y >= h.y && world_pt.y <= h.y + HEADER_HEIGHT
    }) {
        return Some(Hit { id: header.id, kind: HitKind::Header });
    }

    // Paths: within slop distance of any segment. Slop is screen-space so
    // strokes stay clickable when zoomed out.
    let slop = camera.screen_dist_to_world(PATH_HIT_SLOP_PX);
    if let Some(path) = doc.paths.iter().rev().find(|p| {
        let half_width = p.width * 0.5;
        path_within(&p.points, world_pt, slop + half_width)
    }) {
        return Some(Hit { id: path.id, kind: HitKind::Path });
    }

    None
}

fn path_within(points: &[Point], pt: Point, dist: f64) -> bool {
    match points {
        [] => false,
        [only] => only.dist(pt) <= dist,
        _ => points
            .windows(2)
            .any(|seg| point_segment_dist(pt, seg[0], seg[1]) <= dist),
    }
}

/// Distance from `pt` to the segment `a`-`b`.
#[must_use]
pub fn point_segment_dist(pt: Point, a: Point, b: Point) -> f64 {
    let ab_x = b.x - a.x;
    let ab_y = b.y - a.y;
    let len_sq = ab_x * ab_x + ab_y * ab_y;
    if len_sq == 0.0 {
        return a.dist(pt);
    }
    let t = (((pt.x - a.x) * ab_x + (pt.y - a.y) * ab_y) / len_sq).clamp(0.0, 1.0);
    let proj = Point::new(a.x + t * ab_x, a.y + t * ab_y);
    proj.dist(pt)
}
