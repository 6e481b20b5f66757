//! Board REST routes.
//!
//! SYSTEM CONTEXT
//! ==============
//! The client saves through the bulk content PUT; per-entity routes exist
//! for scripted and extension callers that touch one document at a time.
//! Export/import moves whole boards as JSONL snapshots.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::services::board::{self, BoardContent, FolderPatch, HeaderPatch, PathPatch};
use crate::state::{AppState, FolderDoc, HeaderDoc, PathDoc};

const DEFAULT_FOLDER_WIDTH: f64 = 220.0;
const DEFAULT_FOLDER_HEIGHT: f64 = 140.0;
const DEFAULT_STROKE_COLOR: &str = "#1F1A17";
const DEFAULT_STROKE_WIDTH: f64 = 2.0;

pub(crate) fn board_error_to_status(err: board::BoardError) -> StatusCode {
    match err {
        board::BoardError::NotFound(_) => StatusCode::NOT_FOUND,
        board::BoardError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn ok_json() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "ok": true }))
}

// =============================================================================
// BOARD CRUD
// =============================================================================

#[derive(Serialize)]
pub struct BoardResponse {
    pub id: Uuid,
    pub name: String,
    pub created_at: Option<String>,
}

fn to_response(row: board::BoardRow) -> BoardResponse {
    BoardResponse { id: row.id, name: row.name, created_at: row.created_at }
}

#[derive(Deserialize)]
pub struct CreateBoardBody {
    pub name: Option<String>,
}

#[derive(Deserialize)]
pub struct RenameBoardBody {
    pub name: String,
}

/// `GET /api/boards` — list all boards, newest first.
pub async fn list_boards(State(state): State<AppState>) -> Result<Json<Vec<BoardResponse>>, StatusCode> {
    let rows = board::list_boards(&state.pool)
        .await
        .map_err(board_error_to_status)?;
    Ok(Json(rows.into_iter().map(to_response).collect()))
}

/// `POST /api/boards` — create a new board.
pub async fn create_board(
    State(state): State<AppState>,
    Json(body): Json<CreateBoardBody>,
) -> Result<(StatusCode, Json<BoardResponse>), StatusCode> {
    let name = body.name.as_deref().map_or("", str::trim);
    let name = if name.is_empty() { "Untitled Board" } else { name };

    let row = board::create_board(&state.pool, name)
        .await
        .map_err(board_error_to_status)?;
    Ok((StatusCode::CREATED, Json(to_response(row))))
}

/// `GET /api/boards/:id` — fetch one board row.
pub async fn get_board(
    State(state): State<AppState>,
    Path(board_id): Path<Uuid>,
) -> Result<Json<BoardResponse>, StatusCode> {
    let row = board::get_board(&state.pool, board_id)
        .await
        .map_err(board_error_to_status)?;
    Ok(Json(to_response(row)))
}

/// `PATCH /api/boards/:id` — rename a board.
pub async fn rename_board(
    State(state): State<AppState>,
    Path(board_id): Path<Uuid>,
    Json(body): Json<RenameBoardBody>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let name = body.name.trim();
    if name.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    board::rename_board(&state.pool, board_id, name)
        .await
        .map_err(board_error_to_status)?;
    Ok(ok_json())
}

/// `DELETE /api/boards/:id` — delete a board and everything on it.
pub async fn delete_board(
    State(state): State<AppState>,
    Path(board_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    board::delete_board(&state, board_id)
        .await
        .map_err(board_error_to_status)?;
    Ok(ok_json())
}

// =============================================================================
// BULK CONTENT
// =============================================================================

/// `GET /api/boards/:id/content` — full board content from the live cache.
pub async fn get_content(
    State(state): State<AppState>,
    Path(board_id): Path<Uuid>,
) -> Result<Json<BoardContent>, StatusCode> {
    let content = board::board_content(&state, board_id)
        .await
        .map_err(board_error_to_status)?;
    Ok(Json(content))
}

/// `PUT /api/boards/:id/content` — atomically replace board content.
pub async fn put_content(
    State(state): State<AppState>,
    Path(board_id): Path<Uuid>,
    Json(content): Json<BoardContent>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    board::replace_content(&state, board_id, content)
        .await
        .map_err(board_error_to_status)?;
    Ok(ok_json())
}

// =============================================================================
// PER-ENTITY ROUTES
// =============================================================================

#[derive(Deserialize)]
pub struct CreateFolderBody {
    pub title: Option<String>,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub z_index: Option<i64>,
    pub cards: Option<serde_json::Value>,
}

/// `POST /api/boards/:id/folders` — create one folder.
pub async fn create_folder(
    State(state): State<AppState>,
    Path(board_id): Path<Uuid>,
    Json(body): Json<CreateFolderBody>,
) -> Result<(StatusCode, Json<FolderDoc>), StatusCode> {
    let folder = FolderDoc {
        id: Uuid::new_v4(),
        board_id,
        title: body.title.unwrap_or_else(|| "New Folder".to_owned()),
        x: body.x,
        y: body.y,
        width: body.width.unwrap_or(DEFAULT_FOLDER_WIDTH),
        height: body.height.unwrap_or(DEFAULT_FOLDER_HEIGHT),
        z_index: body.z_index.unwrap_or(0),
        cards: body.cards.unwrap_or_else(|| serde_json::json!([])),
    };
    let created = board::create_folder(&state, board_id, folder)
        .await
        .map_err(board_error_to_status)?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `PATCH /api/boards/:id/folders/:folder_id` — partial folder update.
pub async fn patch_folder(
    State(state): State<AppState>,
    Path((board_id, folder_id)): Path<(Uuid, Uuid)>,
    Json(patch): Json<FolderPatch>,
) -> Result<Json<FolderDoc>, StatusCode> {
    let updated = board::patch_folder(&state, board_id, folder_id, patch)
        .await
        .map_err(board_error_to_status)?;
    Ok(Json(updated))
}

/// `DELETE /api/boards/:id/folders/:folder_id` — delete one folder.
pub async fn delete_folder(
    State(state): State<AppState>,
    Path((board_id, folder_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    board::delete_folder(&state, board_id, folder_id)
        .await
        .map_err(board_error_to_status)?;
    Ok(ok_json())
}

#[derive(Deserialize)]
pub struct CreateHeaderBody {
    pub text: Option<String>,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

/// `POST /api/boards/:id/headers` — create one canvas header.
pub async fn create_header(
    State(state): State<AppState>,
    Path(board_id): Path<Uuid>,
    Json(body): Json<CreateHeaderBody>,
) -> Result<(StatusCode, Json<HeaderDoc>), StatusCode> {
    let header = HeaderDoc {
        id: Uuid::new_v4(),
        board_id,
        text: body.text.unwrap_or_else(|| "Header".to_owned()),
        x: body.x,
        y: body.y,
    };
    let created = board::create_header(&state, board_id, header)
        .await
        .map_err(board_error_to_status)?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `PATCH /api/boards/:id/headers/:header_id` — partial header update.
pub async fn patch_header(
    State(state): State<AppState>,
    Path((board_id, header_id)): Path<(Uuid, Uuid)>,
    Json(patch): Json<HeaderPatch>,
) -> Result<Json<HeaderDoc>, StatusCode> {
    let updated = board::patch_header(&state, board_id, header_id, patch)
        .await
        .map_err(board_error_to_status)?;
    Ok(Json(updated))
}

/// `DELETE /api/boards/:id/headers/:header_id` — delete one header.
pub async fn delete_header(
    State(state): State<AppState>,
    Path((board_id, header_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    board::delete_header(&state, board_id, header_id)
        .await
        .map_err(board_error_to_status)?;
    Ok(ok_json())
}

#[derive(Deserialize)]
pub struct CreatePathBody {
    pub color: Option<String>,
    pub width: Option<f64>,
    pub points: Option<serde_json::Value>,
}

/// `POST /api/boards/:id/paths` — create one drawing path.
pub async fn create_path(
    State(state): State<AppState>,
    Path(board_id): Path<Uuid>,
    Json(body): Json<CreatePathBody>,
) -> Result<(StatusCode, Json<PathDoc>), StatusCode> {
    let path = PathDoc {
        id: Uuid::new_v4(),
        board_id,
        color: body.color.unwrap_or_else(|| DEFAULT_STROKE_COLOR.to_owned()),
        width: body.width.unwrap_or(DEFAULT_STROKE_WIDTH),
        points: body.points.unwrap_or_else(|| serde_json::json!([])),
    };
    let created = board::create_path(&state, board_id, path)
        .await
        .map_err(board_error_to_status)?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `PATCH /api/boards/:id/paths/:path_id` — partial path update.
pub async fn patch_path(
    State(state): State<AppState>,
    Path((board_id, path_id)): Path<(Uuid, Uuid)>,
    Json(patch): Json<PathPatch>,
) -> Result<Json<PathDoc>, StatusCode> {
    let updated = board::patch_path(&state, board_id, path_id, patch)
        .await
        .map_err(board_error_to_status)?;
    Ok(Json(updated))
}

/// `DELETE /api/boards/:id/paths/:path_id` — delete one path.
pub async fn delete_path(
    State(state): State<AppState>,
    Path((board_id, path_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    board::delete_path(&state, board_id, path_id)
        .await
        .map_err(board_error_to_status)?;
    Ok(ok_json())
}

// =============================================================================
// JSONL EXPORT / IMPORT
// =============================================================================

#[derive(Serialize)]
struct BoardExportMetaLine {
    #[serde(rename = "type")]
    line_type: &'static str,
    version: u32,
    board_id: Uuid,
    exported_at_ms: u128,
    folder_count: usize,
    header_count: usize,
    path_count: usize,
}

#[derive(Serialize)]
struct ExportFolderLine<'a> {
    #[serde(rename = "type")]
    line_type: &'static str,
    folder: &'a FolderDoc,
}

#[derive(Serialize)]
struct ExportHeaderLine<'a> {
    #[serde(rename = "type")]
    line_type: &'static str,
    header: &'a HeaderDoc,
}

#[derive(Serialize)]
struct ExportPathLine<'a> {
    #[serde(rename = "type")]
    line_type: &'static str,
    path: &'a PathDoc,
}

/// `GET /api/boards/:id/export.jsonl` — download board snapshot as NDJSON/JSONL.
pub async fn export_jsonl(
    State(state): State<AppState>,
    Path(board_id): Path<Uuid>,
) -> Result<Response, StatusCode> {
    let content = board::board_content(&state, board_id)
        .await
        .map_err(board_error_to_status)?;

    let exported_at_ms = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |duration| duration.as_millis());

    let mut lines =
        Vec::with_capacity(content.folders.len() + content.canvas_headers.len() + content.drawing_paths.len() + 1);
    let meta = BoardExportMetaLine {
        line_type: "board_export_meta",
        version: 1,
        board_id,
        exported_at_ms,
        folder_count: content.folders.len(),
        header_count: content.canvas_headers.len(),
        path_count: content.drawing_paths.len(),
    };
    let meta_line = serde_json::to_string(&meta).map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    lines.push(format!("{meta_line}\n"));

    for folder in &content.folders {
        let line = ExportFolderLine { line_type: "folder", folder };
        let serialized = serde_json::to_string(&line).map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
        lines.push(format!("{serialized}\n"));
    }
    for header in &content.canvas_headers {
        let line = ExportHeaderLine { line_type: "canvas_header", header };
        let serialized = serde_json::to_string(&line).map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
        lines.push(format!("{serialized}\n"));
    }
    for path in &content.drawing_paths {
        let line = ExportPathLine { line_type: "drawing_path", path };
        let serialized = serde_json::to_string(&line).map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
        lines.push(format!("{serialized}\n"));
    }

    let stream = futures::stream::iter(
        lines
            .into_iter()
            .map(|line| Ok::<axum::body::Bytes, std::convert::Infallible>(axum::body::Bytes::from(line))),
    );
    let body = axum::body::Body::from_stream(stream);
    let filename = format!("board-{board_id}.jsonl");

    Ok((
        [
            (CONTENT_TYPE, "application/x-ndjson; charset=utf-8"),
            (CONTENT_DISPOSITION, &format!("attachment; filename=\"{filename}\"")),
        ],
        body,
    )
        .into_response())
}

#[derive(Deserialize)]
pub struct ImportJsonlBody {
    pub jsonl: String,
}

#[derive(Serialize)]
pub struct ImportJsonlResponse {
    pub imported: usize,
    pub skipped: usize,
}

#[derive(Debug)]
pub(crate) enum ImportDoc {
    Folder(FolderDoc),
    Header(HeaderDoc),
    Path(PathDoc),
}

#[derive(Deserialize)]
#[serde(default)]
struct ImportFolder {
    title: String,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    z_index: i64,
    cards: serde_json::Value,
}

impl Default for ImportFolder {
    fn default() -> Self {
        Self {
            title: "New Folder".to_owned(),
            x: 0.0,
            y: 0.0,
            width: DEFAULT_FOLDER_WIDTH,
            height: DEFAULT_FOLDER_HEIGHT,
            z_index: 0,
            cards: serde_json::Value::Array(Vec::new()),
        }
    }
}

#[derive(Deserialize)]
#[serde(default)]
struct ImportHeader {
    text: String,
    x: f64,
    y: f64,
}

impl Default for ImportHeader {
    fn default() -> Self {
        Self { text: "Header".to_owned(), x: 0.0, y: 0.0 }
    }
}

#[derive(Deserialize)]
#[serde(default)]
struct ImportPath {
    color: String,
    width: f64,
    points: serde_json::Value,
}

impl Default for ImportPath {
    fn default() -> Self {
        Self {
            color: DEFAULT_STROKE_COLOR.to_owned(),
            width: DEFAULT_STROKE_WIDTH,
            points: serde_json::Value::Array(Vec::new()),
        }
    }
}

/// Parse one JSONL line into an importable document. Meta and unrecognized
/// lines yield `None`. Imported documents always get fresh IDs and are
/// rebound to the target board.
pub(crate) fn parse_import_line(line: &str, board_id: Uuid) -> Result<Option<ImportDoc>, serde_json::Error> {
    let value = serde_json::from_str::<serde_json::Value>(line)?;
    let Some(map) = value.as_object() else {
        return Ok(None);
    };

    let line_type = map.get("type").and_then(serde_json::Value::as_str);
    if line_type == Some("board_export_meta") {
        return Ok(None);
    }

    // Wrapped lines carry the document under a key named after the type;
    // bare lines are recognized by their discriminating fields.
    let (kind, doc_value) = match line_type {
        Some("folder") => ("folder", map.get("folder").cloned().unwrap_or_else(|| value.clone())),
        Some("canvas_header") => ("canvas_header", map.get("header").cloned().unwrap_or_else(|| value.clone())),
        Some("drawing_path") => ("drawing_path", map.get("path").cloned().unwrap_or_else(|| value.clone())),
        Some(_) => return Ok(None),
        None if map.contains_key("cards") || map.contains_key("title") => ("folder", value.clone()),
        None if map.contains_key("text") => ("canvas_header", value.clone()),
        None if map.contains_key("points") => ("drawing_path", value.clone()),
        None => return Ok(None),
    };

    let doc = match kind {
        "folder" => {
            let raw: ImportFolder = serde_json::from_value(doc_value)?;
            ImportDoc::Folder(FolderDoc {
                id: Uuid::new_v4(),
                board_id,
                title: raw.title,
                x: raw.x,
                y: raw.y,
                width: raw.width,
                height: raw.height,
                z_index: raw.z_index,
                cards: raw.cards,
            })
        }
        "canvas_header" => {
            let raw: ImportHeader = serde_json::from_value(doc_value)?;
            ImportDoc::Header(HeaderDoc { id: Uuid::new_v4(), board_id, text: raw.text, x: raw.x, y: raw.y })
        }
        _ => {
            let raw: ImportPath = serde_json::from_value(doc_value)?;
            ImportDoc::Path(PathDoc {
                id: Uuid::new_v4(),
                board_id,
                color: raw.color,
                width: raw.width,
                points: raw.points,
            })
        }
    };
    Ok(Some(doc))
}

/// `POST /api/boards/:id/import.jsonl` — import NDJSON/JSONL document lines.
pub async fn import_jsonl(
    State(state): State<AppState>,
    Path(board_id): Path<Uuid>,
    Json(body): Json<ImportJsonlBody>,
) -> Result<Json<ImportJsonlResponse>, StatusCode> {
    let mut folders = Vec::new();
    let mut headers = Vec::new();
    let mut paths = Vec::new();
    let mut skipped = 0_usize;

    for raw_line in body.jsonl.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        match parse_import_line(line, board_id) {
            Ok(Some(ImportDoc::Folder(folder))) => folders.push(folder),
            Ok(Some(ImportDoc::Header(header))) => headers.push(header),
            Ok(Some(ImportDoc::Path(path))) => paths.push(path),
            Ok(None) | Err(_) => skipped = skipped.saturating_add(1),
        }
    }

    let imported = folders.len() + headers.len() + paths.len();
    if imported == 0 {
        // Still a 404 when the board is missing, even with nothing to do.
        board::hydrate_board(&state, board_id)
            .await
            .map_err(board_error_to_status)?;
        return Ok(Json(ImportJsonlResponse { imported: 0, skipped }));
    }

    board::import_documents(&state, board_id, folders, headers, paths)
        .await
        .map_err(board_error_to_status)?;

    Ok(Json(ImportJsonlResponse { imported, skipped }))
}

#[cfg(test)]
#[path = "boards_test.rs"]
mod tests;
