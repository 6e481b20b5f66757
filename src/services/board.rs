//! Board service — CRUD, content assembly, and cache hydration.
//!
//! DESIGN
//! ======
//! Board rows live only in Postgres. Board content (folders, headers,
//! drawing paths) is hydrated into an in-memory `BoardCache` on first access
//! and edited there; the persistence task flushes dirty documents in the
//! background. The bulk content PUT bypasses the dirty sets and replaces the
//! board's collections in one transaction, then resets the cache.
//!
//! ERROR HANDLING
//! ==============
//! Dirty flags are cleared only after successful writes. If a flush fails,
//! the documents stay dirty so the persistence task retries instead of
//! silently losing edits.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::state::{AppState, BoardCache, FolderDoc, HeaderDoc, PathDoc};

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error("board not found: {0}")]
    NotFound(Uuid),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Row returned from board queries.
#[derive(Debug, Clone)]
pub struct BoardRow {
    pub id: Uuid,
    pub name: String,
    pub created_at: Option<String>,
}

/// Full content of one board, as served by `GET .../content` and accepted
/// by `PUT .../content`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoardContent {
    #[serde(default)]
    pub folders: Vec<FolderDoc>,
    #[serde(default)]
    pub canvas_headers: Vec<HeaderDoc>,
    #[serde(default)]
    pub drawing_paths: Vec<PathDoc>,
}

/// Partial update for a folder. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FolderPatch {
    pub title: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub z_index: Option<i64>,
    pub cards: Option<serde_json::Value>,
}

/// Partial update for a canvas header.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HeaderPatch {
    pub text: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
}

/// Partial update for a drawing path.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathPatch {
    pub color: Option<String>,
    pub width: Option<f64>,
    pub points: Option<serde_json::Value>,
}

// =============================================================================
// BOARD CRUD
// =============================================================================

/// Create a new board.
///
/// # Errors
///
/// Returns a database error if the insert fails.
pub async fn create_board(pool: &PgPool, name: &str) -> Result<BoardRow, BoardError> {
    let id = Uuid::new_v4();
    let created_at: String =
        sqlx::query_scalar("INSERT INTO boards (id, name) VALUES ($1, $2) RETURNING created_at::text")
            .bind(id)
            .bind(name)
            .fetch_one(pool)
            .await?;

    info!(board_id = %id, name, "board created");
    Ok(BoardRow { id, name: name.to_owned(), created_at: Some(created_at) })
}

/// List all boards, newest first.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_boards(pool: &PgPool) -> Result<Vec<BoardRow>, BoardError> {
    let rows = sqlx::query_as::<_, (Uuid, String, Option<String>)>(
        "SELECT id, name, created_at::text FROM boards ORDER BY created_at DESC, id DESC",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(id, name, created_at)| BoardRow { id, name, created_at })
        .collect())
}

/// Fetch a single board row.
///
/// # Errors
///
/// Returns `NotFound` if the board does not exist.
pub async fn get_board(pool: &PgPool, board_id: Uuid) -> Result<BoardRow, BoardError> {
    let row = sqlx::query_as::<_, (Uuid, String, Option<String>)>(
        "SELECT id, name, created_at::text FROM boards WHERE id = $1",
    )
    .bind(board_id)
    .fetch_optional(pool)
    .await?;

    let Some((id, name, created_at)) = row else {
        return Err(BoardError::NotFound(board_id));
    };
    Ok(BoardRow { id, name, created_at })
}

/// Rename a board.
///
/// # Errors
///
/// Returns `NotFound` if the board does not exist.
pub async fn rename_board(pool: &PgPool, board_id: Uuid, name: &str) -> Result<(), BoardError> {
    let result = sqlx::query("UPDATE boards SET name = $2 WHERE id = $1")
        .bind(board_id)
        .bind(name)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(BoardError::NotFound(board_id));
    }
    Ok(())
}

/// Delete a board. Collection rows go with it via FK cascade; the live
/// cache entry is evicted, dirty or not.
///
/// # Errors
///
/// Returns `NotFound` if the board does not exist.
pub async fn delete_board(state: &AppState, board_id: Uuid) -> Result<(), BoardError> {
    let result = sqlx::query("DELETE FROM boards WHERE id = $1")
        .bind(board_id)
        .execute(&state.pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(BoardError::NotFound(board_id));
    }

    let mut boards = state.boards.write().await;
    boards.remove(&board_id);
    info!(%board_id, "board deleted");
    Ok(())
}

async fn ensure_board(pool: &PgPool, board_id: Uuid) -> Result<(), BoardError> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM boards WHERE id = $1)")
        .bind(board_id)
        .fetch_one(pool)
        .await?;

    if !exists {
        return Err(BoardError::NotFound(board_id));
    }
    Ok(())
}

// =============================================================================
// HYDRATION / CONTENT
// =============================================================================

/// Ensure a board's collections are cached in memory, hydrating from
/// Postgres on first access.
///
/// # Errors
///
/// Returns `NotFound` if the board does not exist, or a database error if
/// hydration fails.
pub async fn hydrate_board(state: &AppState, board_id: Uuid) -> Result<(), BoardError> {
    {
        let boards = state.boards.read().await;
        if boards.contains_key(&board_id) {
            return Ok(());
        }
    }

    ensure_board(&state.pool, board_id).await?;

    // Fetch the snapshot outside the write lock; on a race the first
    // hydration wins and this snapshot is discarded.
    let folders = hydrate_folders(&state.pool, board_id).await?;
    let headers = hydrate_headers(&state.pool, board_id).await?;
    let paths = hydrate_paths(&state.pool, board_id).await?;

    let mut boards = state.boards.write().await;
    boards.entry(board_id).or_insert_with(|| {
        let mut cache = BoardCache::new();
        cache.folders = folders;
        cache.headers = headers;
        cache.paths = paths;
        info!(%board_id, folders = cache.folders.len(), headers = cache.headers.len(), paths = cache.paths.len(), "hydrated board from database");
        cache
    });
    Ok(())
}

/// Assemble a board's full content from the live cache.
///
/// # Errors
///
/// Returns `NotFound` if the board does not exist, or a database error if
/// hydration fails.
pub async fn board_content(state: &AppState, board_id: Uuid) -> Result<BoardContent, BoardError> {
    hydrate_board(state, board_id).await?;

    let boards = state.boards.read().await;
    let Some(cache) = boards.get(&board_id) else {
        return Err(BoardError::NotFound(board_id));
    };

    let mut folders: Vec<FolderDoc> = cache.folders.values().cloned().collect();
    let mut canvas_headers: Vec<HeaderDoc> = cache.headers.values().cloned().collect();
    let mut drawing_paths: Vec<PathDoc> = cache.paths.values().cloned().collect();

    // Stable order for clients: folders by stacking order, the rest by ID.
    folders.sort_by(|a, b| a.z_index.cmp(&b.z_index).then(a.id.cmp(&b.id)));
    canvas_headers.sort_by(|a, b| a.id.cmp(&b.id));
    drawing_paths.sort_by(|a, b| a.id.cmp(&b.id));

    Ok(BoardContent { folders, canvas_headers, drawing_paths })
}

/// Replace a board's collections atomically: delete rows missing from the
/// payload, upsert the rest, all in one transaction. The cache is reset to
/// the new content afterwards, dropping any pending dirty flags (the
/// payload supersedes them).
///
/// # Errors
///
/// Returns `NotFound` if the board does not exist, or a database error if
/// the transaction fails.
pub async fn replace_content(
    state: &AppState,
    board_id: Uuid,
    mut content: BoardContent,
) -> Result<(), BoardError> {
    ensure_board(&state.pool, board_id).await?;

    // Documents always belong to the board in the path, whatever the
    // payload claims.
    for folder in &mut content.folders {
        folder.board_id = board_id;
    }
    for header in &mut content.canvas_headers {
        header.board_id = board_id;
    }
    for path in &mut content.drawing_paths {
        path.board_id = board_id;
    }

    let folder_ids: Vec<Uuid> = content.folders.iter().map(|f| f.id).collect();
    let header_ids: Vec<Uuid> = content.canvas_headers.iter().map(|h| h.id).collect();
    let path_ids: Vec<Uuid> = content.drawing_paths.iter().map(|p| p.id).collect();

    let mut tx = state.pool.begin().await?;

    sqlx::query("DELETE FROM folders WHERE board_id = $1 AND id <> ALL($2)")
        .bind(board_id)
        .bind(&folder_ids)
        .execute(tx.as_mut())
        .await?;
    sqlx::query("DELETE FROM canvas_headers WHERE board_id = $1 AND id <> ALL($2)")
        .bind(board_id)
        .bind(&header_ids)
        .execute(tx.as_mut())
        .await?;
    sqlx::query("DELETE FROM drawing_paths WHERE board_id = $1 AND id <> ALL($2)")
        .bind(board_id)
        .bind(&path_ids)
        .execute(tx.as_mut())
        .await?;

    for folder in &content.folders {
        upsert_folder(tx.as_mut(), folder).await?;
    }
    for header in &content.canvas_headers {
        upsert_header(tx.as_mut(), header).await?;
    }
    for path in &content.drawing_paths {
        upsert_path(tx.as_mut(), path).await?;
    }

    tx.commit().await?;

    let mut boards = state.boards.write().await;
    boards.insert(board_id, cache_from_content(&content));
    info!(%board_id, folders = content.folders.len(), headers = content.canvas_headers.len(), paths = content.drawing_paths.len(), "board content replaced");
    Ok(())
}

fn cache_from_content(content: &BoardContent) -> BoardCache {
    let mut cache = BoardCache::new();
    for folder in &content.folders {
        cache.folders.insert(folder.id, folder.clone());
    }
    for header in &content.canvas_headers {
        cache.headers.insert(header.id, header.clone());
    }
    for path in &content.drawing_paths {
        cache.paths.insert(path.id, path.clone());
    }
    cache
}

// =============================================================================
// PER-ENTITY EDITS
// =============================================================================

/// Insert a folder into the live cache and mark it dirty for the flush task.
///
/// # Errors
///
/// Returns `NotFound` if the board does not exist.
pub async fn create_folder(state: &AppState, board_id: Uuid, mut folder: FolderDoc) -> Result<FolderDoc, BoardError> {
    hydrate_board(state, board_id).await?;
    folder.board_id = board_id;

    let mut boards = state.boards.write().await;
    let Some(cache) = boards.get_mut(&board_id) else {
        return Err(BoardError::NotFound(board_id));
    };
    cache.dirty_folders.insert(folder.id);
    cache.folders.insert(folder.id, folder.clone());
    Ok(folder)
}

/// Apply a partial update to a cached folder.
///
/// # Errors
///
/// Returns `NotFound` if the board or folder does not exist.
pub async fn patch_folder(
    state: &AppState,
    board_id: Uuid,
    folder_id: Uuid,
    patch: FolderPatch,
) -> Result<FolderDoc, BoardError> {
    hydrate_board(state, board_id).await?;

    let mut boards = state.boards.write().await;
    let Some(cache) = boards.get_mut(&board_id) else {
        return Err(BoardError::NotFound(board_id));
    };
    let Some(folder) = cache.folders.get_mut(&folder_id) else {
        return Err(BoardError::NotFound(folder_id));
    };

    if let Some(title) = patch.title {
        folder.title = title;
    }
    if let Some(x) = patch.x {
        folder.x = x;
    }
    if let Some(y) = patch.y {
        folder.y = y;
    }
    if let Some(width) = patch.width {
        folder.width = width;
    }
    if let Some(height) = patch.height {
        folder.height = height;
    }
    if let Some(z_index) = patch.z_index {
        folder.z_index = z_index;
    }
    if let Some(cards) = patch.cards {
        folder.cards = cards;
    }

    let updated = folder.clone();
    cache.dirty_folders.insert(folder_id);
    Ok(updated)
}

/// Delete a folder from the cache and from Postgres.
///
/// # Errors
///
/// Returns `NotFound` if the folder is in neither the cache nor the table.
pub async fn delete_folder(state: &AppState, board_id: Uuid, folder_id: Uuid) -> Result<(), BoardError> {
    hydrate_board(state, board_id).await?;

    let removed = {
        let mut boards = state.boards.write().await;
        let Some(cache) = boards.get_mut(&board_id) else {
            return Err(BoardError::NotFound(board_id));
        };
        cache.dirty_folders.remove(&folder_id);
        cache.folders.remove(&folder_id).is_some()
    };

    let result = sqlx::query("DELETE FROM folders WHERE id = $1 AND board_id = $2")
        .bind(folder_id)
        .bind(board_id)
        .execute(&state.pool)
        .await?;

    // A freshly created folder may never have been flushed, so the cache
    // removal alone counts as success.
    if !removed && result.rows_affected() == 0 {
        return Err(BoardError::NotFound(folder_id));
    }
    Ok(())
}

/// Insert a canvas header into the live cache and mark it dirty.
///
/// # Errors
///
/// Returns `NotFound` if the board does not exist.
pub async fn create_header(state: &AppState, board_id: Uuid, mut header: HeaderDoc) -> Result<HeaderDoc, BoardError> {
    hydrate_board(state, board_id).await?;
    header.board_id = board_id;

    let mut boards = state.boards.write().await;
    let Some(cache) = boards.get_mut(&board_id) else {
        return Err(BoardError::NotFound(board_id));
    };
    cache.dirty_headers.insert(header.id);
    cache.headers.insert(header.id, header.clone());
    Ok(header)
}

/// Apply a partial update to a cached canvas header.
///
/// # Errors
///
/// Returns `NotFound` if the board or header does not exist.
pub async fn patch_header(
    state: &AppState,
    board_id: Uuid,
    header_id: Uuid,
    patch: HeaderPatch,
) -> Result<HeaderDoc, BoardError> {
    hydrate_board(state, board_id).await?;

    let mut boards = state.boards.write().await;
    let Some(cache) = boards.get_mut(&board_id) else {
        return Err(BoardError::NotFound(board_id));
    };
    let Some(header) = cache.headers.get_mut(&header_id) else {
        return Err(BoardError::NotFound(header_id));
    };

    if let Some(text) = patch.text {
        header.text = text;
    }
    if let Some(x) = patch.x {
        header.x = x;
    }
    if let Some(y) = patch.y {
        header.y = y;
    }

    let updated = header.clone();
    cache.dirty_headers.insert(header_id);
    Ok(updated)
}

/// Delete a canvas header from the cache and from Postgres.
///
/// # Errors
///
/// Returns `NotFound` if the header is in neither the cache nor the table.
pub async fn delete_header(state: &AppState, board_id: Uuid, header_id: Uuid) -> Result<(), BoardError> {
    hydrate_board(state, board_id).await?;

    let removed = {
        let mut boards = state.boards.write().await;
        let Some(cache) = boards.get_mut(&board_id) else {
            return Err(BoardError::NotFound(board_id));
        };
        cache.dirty_headers.remove(&header_id);
        cache.headers.remove(&header_id).is_some()
    };

    let result = sqlx::query("DELETE FROM canvas_headers WHERE id = $1 AND board_id = $2")
        .bind(header_id)
        .bind(board_id)
        .execute(&state.pool)
        .await?;

    if !removed && result.rows_affected() == 0 {
        return Err(BoardError::NotFound(header_id));
    }
    Ok(())
}

/// Insert a drawing path into the live cache and mark it dirty.
///
/// # Errors
///
/// Returns `NotFound` if the board does not exist.
pub async fn create_path(state: &AppState, board_id: Uuid, mut path: PathDoc) -> Result<PathDoc, BoardError> {
    hydrate_board(state, board_id).await?;
    path.board_id = board_id;

    let mut boards = state.boards.write().await;
    let Some(cache) = boards.get_mut(&board_id) else {
        return Err(BoardError::NotFound(board_id));
    };
    cache.dirty_paths.insert(path.id);
    cache.paths.insert(path.id, path.clone());
    Ok(path)
}

/// Apply a partial update to a cached drawing path.
///
/// # Errors
///
/// Returns `NotFound` if the board or path does not exist.
pub async fn patch_path(
    state: &AppState,
    board_id: Uuid,
    path_id: Uuid,
    patch: PathPatch,
) -> Result<PathDoc, BoardError> {
    hydrate_board(state, board_id).await?;

    let mut boards = state.boards.write().await;
    let Some(cache) = boards.get_mut(&board_id) else {
        return Err(BoardError::NotFound(board_id));
    };
    let Some(path) = cache.paths.get_mut(&path_id) else {
        return Err(BoardError::NotFound(path_id));
    };

    if let Some(color) = patch.color {
        path.color = color;
    }
    if let Some(width) = patch.width {
        path.width = width;
    }
    if let Some(points) = patch.points {
        path.points = points;
    }

    let updated = path.clone();
    cache.dirty_paths.insert(path_id);
    Ok(updated)
}

/// Delete a drawing path from the cache and from Postgres.
///
/// # Errors
///
/// Returns `NotFound` if the path is in neither the cache nor the table.
pub async fn delete_path(state: &AppState, board_id: Uuid, path_id: Uuid) -> Result<(), BoardError> {
    hydrate_board(state, board_id).await?;

    let removed = {
        let mut boards = state.boards.write().await;
        let Some(cache) = boards.get_mut(&board_id) else {
            return Err(BoardError::NotFound(board_id));
        };
        cache.dirty_paths.remove(&path_id);
        cache.paths.remove(&path_id).is_some()
    };

    let result = sqlx::query("DELETE FROM drawing_paths WHERE id = $1 AND board_id = $2")
        .bind(path_id)
        .bind(board_id)
        .execute(&state.pool)
        .await?;

    if !removed && result.rows_affected() == 0 {
        return Err(BoardError::NotFound(path_id));
    }
    Ok(())
}

// =============================================================================
// IMPORT
// =============================================================================

/// Write imported documents straight to Postgres and fold them into the
/// live cache (clean, since they are already persisted).
///
/// # Errors
///
/// Returns `NotFound` if the board does not exist, or a database error if
/// any write fails.
pub async fn import_documents(
    state: &AppState,
    board_id: Uuid,
    folders: Vec<FolderDoc>,
    headers: Vec<HeaderDoc>,
    paths: Vec<PathDoc>,
) -> Result<(), BoardError> {
    hydrate_board(state, board_id).await?;

    flush_folders(&state.pool, &folders).await?;
    flush_headers(&state.pool, &headers).await?;
    flush_paths(&state.pool, &paths).await?;

    let mut boards = state.boards.write().await;
    if let Some(cache) = boards.get_mut(&board_id) {
        for folder in folders {
            cache.dirty_folders.remove(&folder.id);
            cache.folders.insert(folder.id, folder);
        }
        for header in headers {
            cache.dirty_headers.remove(&header.id);
            cache.headers.insert(header.id, header);
        }
        for path in paths {
            cache.dirty_paths.remove(&path.id);
            cache.paths.insert(path.id, path);
        }
    }
    Ok(())
}

// =============================================================================
// HYDRATION QUERIES / FLUSH
// =============================================================================

async fn hydrate_folders(pool: &PgPool, board_id: Uuid) -> Result<HashMap<Uuid, FolderDoc>, sqlx::Error> {
    let rows = sqlx::query_as::<_, (Uuid, Uuid, String, f64, f64, f64, f64, i64, serde_json::Value)>(
        "SELECT id, board_id, title, x, y, width, height, z_index, cards \
         FROM folders WHERE board_id = $1",
    )
    .bind(board_id)
    .fetch_all(pool)
    .await?;

    let mut folders = HashMap::new();
    for (id, board_id, title, x, y, width, height, z_index, cards) in rows {
        folders.insert(id, FolderDoc { id, board_id, title, x, y, width, height, z_index, cards });
    }
    Ok(folders)
}

async fn hydrate_headers(pool: &PgPool, board_id: Uuid) -> Result<HashMap<Uuid, HeaderDoc>, sqlx::Error> {
    let rows = sqlx::query_as::<_, (Uuid, Uuid, String, f64, f64)>(
        "SELECT id, board_id, text, x, y FROM canvas_headers WHERE board_id = $1",
    )
    .bind(board_id)
    .fetch_all(pool)
    .await?;

    let mut headers = HashMap::new();
    for (id, board_id, text, x, y) in rows {
        headers.insert(id, HeaderDoc { id, board_id, text, x, y });
    }
    Ok(headers)
}

async fn hydrate_paths(pool: &PgPool, board_id: Uuid) -> Result<HashMap<Uuid, PathDoc>, sqlx::Error> {
    let rows = sqlx::query_as::<_, (Uuid, Uuid, String, f64, serde_json::Value)>(
        "SELECT id, board_id, color, width, points FROM drawing_paths WHERE board_id = $1",
    )
    .bind(board_id)
    .fetch_all(pool)
    .await?;

    let mut paths = HashMap::new();
    for (id, board_id, color, width, points) in rows {
        paths.insert(id, PathDoc { id, board_id, color, width, points });
    }
    Ok(paths)
}

async fn upsert_folder<'e, E>(executor: E, folder: &FolderDoc) -> Result<(), sqlx::Error>
where
    E: sqlx::PgExecutor<'e>,
{
    sqlx::query(
        "INSERT INTO folders (id, board_id, title, x, y, width, height, z_index, cards, updated_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, now()) \
         ON CONFLICT (id) DO UPDATE SET \
             title = EXCLUDED.title, x = EXCLUDED.x, y = EXCLUDED.y, \
             width = EXCLUDED.width, height = EXCLUDED.height, \
             z_index = EXCLUDED.z_index, cards = EXCLUDED.cards, updated_at = now()",
    )
    .bind(folder.id)
    .bind(folder.board_id)
    .bind(&folder.title)
    .bind(folder.x)
    .bind(folder.y)
    .bind(folder.width)
    .bind(folder.height)
    .bind(folder.z_index)
    .bind(&folder.cards)
    .execute(executor)
    .await?;
    Ok(())
}

async fn upsert_header<'e, E>(executor: E, header: &HeaderDoc) -> Result<(), sqlx::Error>
where
    E: sqlx::PgExecutor<'e>,
{
    sqlx::query(
        "INSERT INTO canvas_headers (id, board_id, text, x, y, updated_at) \
         VALUES ($1, $2, $3, $4, $5, now()) \
         ON CONFLICT (id) DO UPDATE SET \
             text = EXCLUDED.text, x = EXCLUDED.x, y = EXCLUDED.y, updated_at = now()",
    )
    .bind(header.id)
    .bind(header.board_id)
    .bind(&header.text)
    .bind(header.x)
    .bind(header.y)
    .execute(executor)
    .await?;
    Ok(())
}

async fn upsert_path<'e, E>(executor: E, path: &PathDoc) -> Result<(), sqlx::Error>
where
    E: sqlx::PgExecutor<'e>,
{
    sqlx::query(
        "INSERT INTO drawing_paths (id, board_id, color, width, points, updated_at) \
         VALUES ($1, $2, $3, $4, $5, now()) \
         ON CONFLICT (id) DO UPDATE SET \
             color = EXCLUDED.color, width = EXCLUDED.width, \
             points = EXCLUDED.points, updated_at = now()",
    )
    .bind(path.id)
    .bind(path.board_id)
    .bind(&path.color)
    .bind(path.width)
    .bind(&path.points)
    .execute(executor)
    .await?;
    Ok(())
}

/// Batch upsert folders to Postgres.
///
/// # Errors
///
/// Returns a database error if any upsert fails.
pub async fn flush_folders(pool: &PgPool, folders: &[FolderDoc]) -> Result<(), sqlx::Error> {
    for folder in folders {
        upsert_folder(pool, folder).await?;
    }
    Ok(())
}

/// Batch upsert canvas headers to Postgres.
///
/// # Errors
///
/// Returns a database error if any upsert fails.
pub async fn flush_headers(pool: &PgPool, headers: &[HeaderDoc]) -> Result<(), sqlx::Error> {
    for header in headers {
        upsert_header(pool, header).await?;
    }
    Ok(())
}

/// Batch upsert drawing paths to Postgres.
///
/// # Errors
///
/// Returns a database error if any upsert fails.
pub async fn flush_paths(pool: &PgPool, paths: &[PathDoc]) -> Result<(), sqlx::Error> {
    for path in paths {
        upsert_path(pool, path).await?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "board_test.rs"]
mod tests;
