//! Wire types shared between the client and the document-store server.
//!
//! Canvas entity types (`Folder`, `CanvasHeader`, `DrawingPath`) are reused
//! from the `canvas` crate directly — the server speaks the same JSON shape.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use canvas::doc::{CanvasHeader, DrawingPath, Folder};

/// A board row as listed on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSummary {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Full content of one board, as loaded from and saved to
/// `/api/boards/{id}/content`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardContent {
    #[serde(default)]
    pub folders: Vec<Folder>,
    #[serde(default)]
    pub canvas_headers: Vec<CanvasHeader>,
    #[serde(default)]
    pub drawing_paths: Vec<DrawingPath>,
}

impl BoardContent {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.folders.is_empty() && self.canvas_headers.is_empty() && self.drawing_paths.is_empty()
    }
}
