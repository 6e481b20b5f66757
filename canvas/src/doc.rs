//! Document model: the entities that live on a board and the in-memory store.
//!
//! This module defines the whiteboard content hierarchy (`Folder` → `Card` →
//! `Section` → `Bookmark`), the free-floating canvas entities (`CanvasHeader`,
//! `DrawingPath`), sparse-update types for incremental edits, and the runtime
//! store that owns all live entities (`BoardDoc`).
//!
//! Data flows into this layer from the network (JSON deserialization) and from
//! the input engine (mutations). Collections are insertion-ordered vectors;
//! entities are always addressed by id, never by index.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::camera::Point;
use crate::consts::{FOLDER_DEFAULT_HEIGHT, FOLDER_DEFAULT_WIDTH};

/// Unique identifier for a board entity.
pub type EntityId = Uuid;

/// A bookmark captured from a web page, stored inside a card section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: EntityId,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub description: String,
    /// Data-URL screenshot, if one fit the size budget.
    #[serde(default)]
    pub screenshot: Option<String>,
    /// Capture time in milliseconds since the Unix epoch.
    pub timestamp: i64,
}

/// A named group of bookmarks inside a card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub bookmarks: Vec<Bookmark>,
}

/// A card owned by a folder: a titled note with sections of bookmarks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: EntityId,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub sections: Vec<Section>,
}

/// A folder positioned on the canvas, owning an ordered list of cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Folder {
    pub id: EntityId,
    pub board_id: EntityId,
    pub title: String,
    /// Left edge of the bounding box in world coordinates.
    pub x: f64,
    /// Top edge of the bounding box in world coordinates.
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Stacking order; lower values are drawn beneath higher values.
    pub z_index: i64,
    #[serde(default)]
    pub cards: Vec<Card>,
}

impl Folder {
    /// Create a folder at the given world position with default dimensions.
    #[must_use]
    pub fn new(board_id: EntityId, title: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            board_id,
            title: title.into(),
            x,
            y,
            width: FOLDER_DEFAULT_WIDTH,
            height: FOLDER_DEFAULT_HEIGHT,
            z_index: 0,
            cards: Vec::new(),
        }
    }

    /// Whether `world_pt` falls inside this folder's bounding box.
    #[must_use]
    pub fn contains(&self, world_pt: Point) -> bool {
        world_pt.x >= self.x
            && world_pt.x <= self.x + self.width
            && world_pt.y >= self.y
            && world_pt.y <= self.y + self.height
    }
}

/// A free-floating text label on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasHeader {
    pub id: EntityId,
    pub board_id: EntityId,
    pub text: String,
    pub x: f64,
    pub y: f64,
}

/// A freehand stroke on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawingPath {
    pub id: EntityId,
    pub board_id: EntityId,
    /// Stroke color as a CSS color string.
    pub color: String,
    /// Stroke width in world units.
    pub width: f64,
    pub points: Vec<Point>,
}

/// Sparse update for a folder. Only present fields are applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartialFolder {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i64>,
}

/// Sparse update for a canvas header.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartialHeader {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
}

/// In-memory store of one board's canvas content.
///
/// Folders, headers, and paths keep their insertion order; the renderer
/// derives folder draw order from `(z_index, insertion order)`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardDoc {
    pub folders: Vec<Folder>,
    pub headers: Vec<CanvasHeader>,
    pub paths: Vec<DrawingPath>,
}

impl BoardDoc {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all content with a full snapshot.
    pub fn load_snapshot(&mut self, folders: Vec<Folder>, headers: Vec<CanvasHeader>, paths: Vec<DrawingPath>) {
        self.folders = folders;
        self.headers = headers;
        self.paths = paths;
    }

    /// Remove every entity, leaving an empty board.
    pub fn clear(&mut self) {
        self.folders.clear();
        self.headers.clear();
        self.paths.clear();
    }

    /// Returns `true` if the board has no content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.folders.is_empty() && self.headers.is_empty() && self.paths.is_empty()
    }

    // --- Folders ---

    /// Append a folder, preserving insertion order.
    pub fn insert_folder(&mut self, folder: Folder) {
        self.folders.push(folder);
    }

    /// Remove a folder by id, returning it if it was present.
    pub fn remove_folder(&mut self, id: &EntityId) -> Option<Folder> {
        let idx = self.folders.iter().position(|f| f.id == *id)?;
        Some(self.folders.remove(idx))
    }

    #[must_use]
    pub fn folder(&self, id: &EntityId) -> Option<&Folder> {
        self.folders.iter().find(|f| f.id == *id)
    }

    pub fn folder_mut(&mut self, id: &EntityId) -> Option<&mut Folder> {
        self.folders.iter_mut().find(|f| f.id == *id)
    }

    /// Apply a partial update to a folder. Returns false if it doesn't exist.
    pub fn apply_folder_partial(&mut self, id: &EntityId, partial: &PartialFolder) -> bool {
        let Some(folder) = self.folder_mut(id) else {
            return false;
        };
        if let Some(ref title) = partial.title {
            folder.title = title.clone();
        }
        if let Some(x) = partial.x {
            folder.x = x;
        }
        if let Some(y) = partial.y {
            folder.y = y;
        }
        if let Some(w) = partial.width {
            folder.width = w;
        }
        if let Some(h) = partial.height {
            folder.height = h;
        }
        if let Some(z) = partial.z_index {
            folder.z_index = z;
        }
        true
    }

    /// Raise a folder above everything else on the board.
    pub fn bring_folder_to_front(&mut self, id: &EntityId) {
        let top = self.folders.iter().map(|f| f.z_index).max().unwrap_or(0);
        if let Some(folder) = self.folder_mut(id) {
            folder.z_index = top + 1;
        }
    }

    /// Folders sorted by `(z_index, insertion order)` for draw order.
    #[must_use]
    pub fn sorted_folders(&self) -> Vec<&Folder> {
        let mut ordered: Vec<(usize, &Folder)> = self.folders.iter().enumerate().collect();
        ordered.sort_by(|(ia, a), (ib, b)| a.z_index.cmp(&b.z_index).then(ia.cmp(ib)));
        ordered.into_iter().map(|(_, f)| f).collect()
    }

    // --- Headers ---

    pub fn insert_header(&mut self, header: CanvasHeader) {
        self.headers.push(header);
    }

    pub fn remove_header(&mut self, id: &EntityId) -> Option<CanvasHeader> {
        let idx = self.headers.iter().position(|h| h.id == *id)?;
        Some(self.headers.remove(idx))
    }

    #[must_use]
    pub fn header(&self, id: &EntityId) -> Option<&CanvasHeader> {
        self.headers.iter().find(|h| h.id == *id)
    }

    pub fn header_mut(&mut self, id: &EntityId) -> Option<&mut CanvasHeader> {
        self.headers.iter_mut().find(|h| h.id == *id)
    }

    /// Apply a partial update to a header. Returns false if it doesn't exist.
    pub fn apply_header_partial(&mut self, id: &EntityId, partial: &PartialHeader) -> bool {
        let Some(header) = self.header_mut(id) else {
            return false;
        };
        if let Some(ref text) = partial.text {
            header.text = text.clone();
        }
        if let Some(x) = partial.x {
            header.x = x;
        }
        if let Some(y) = partial.y {
            header.y = y;
        }
        true
    }

    // --- Drawing paths ---

    pub fn insert_path(&mut self, path: DrawingPath) {
        self.paths.push(path);
    }

    pub fn remove_path(&mut self, id: &EntityId) -> Option<DrawingPath> {
        let idx = self.paths.iter().position(|p| p.id == *id)?;
        Some(self.paths.remove(idx))
    }

    #[must_use]
    pub fn path(&self, id: &EntityId) -> Option<&DrawingPath> {
        self.paths.iter().find(|p| p.id == *id)
    }

    pub fn path_mut(&mut self, id: &EntityId) -> Option<&mut DrawingPath> {
        self.paths.iter_mut().find(|p| p.id == *id)
    }
}
