//! Persistence service — background flush for dirty documents.
//!
//! DESIGN
//! ======
//! A background task snapshots dirty documents under the lock, performs the
//! Postgres writes lock-free, then sleeps one second before the next cycle.
//!
//! ERROR HANDLING
//! ==============
//! Dirty flags are cleared only after successful writes. This prioritizes
//! durability over duplicate flush attempts: repeated upserts are acceptable,
//! silent data loss is not.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{error, info};
use uuid::Uuid;

use crate::services::board;
use crate::state::{AppState, BoardCache, FolderDoc, HeaderDoc, PathDoc};

const DEFAULT_CONTENT_FLUSH_INTERVAL_MS: u64 = 1000;

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

/// Spawn the background persistence task. Returns a handle for shutdown.
pub fn spawn_persistence_task(state: AppState) -> JoinHandle<()> {
    let flush_interval_ms = env_parse("CONTENT_FLUSH_INTERVAL_MS", DEFAULT_CONTENT_FLUSH_INTERVAL_MS);
    info!(flush_interval_ms, "content persistence flush configured");
    tokio::spawn(async move {
        loop {
            flush_all_dirty(&state).await;
            tokio::time::sleep(Duration::from_millis(flush_interval_ms)).await;
        }
    })
}

#[derive(Debug)]
struct DirtyFlushBatch {
    board_id: Uuid,
    folders: Vec<FolderDoc>,
    headers: Vec<HeaderDoc>,
    paths: Vec<PathDoc>,
}

async fn flush_all_dirty(state: &AppState) {
    // PHASE: SNAPSHOT DIRTY DOCUMENTS
    // WHY: collect immutable clones under lock, then perform I/O lock-free.
    let batches = {
        let boards = state.boards.read().await;
        let mut collected = Vec::new();

        for (board_id, cache) in boards.iter() {
            if cache.is_clean() {
                continue;
            }

            let folders = cache
                .dirty_folders
                .iter()
                .filter_map(|id| cache.folders.get(id).cloned())
                .collect::<Vec<_>>();
            let headers = cache
                .dirty_headers
                .iter()
                .filter_map(|id| cache.headers.get(id).cloned())
                .collect::<Vec<_>>();
            let paths = cache
                .dirty_paths
                .iter()
                .filter_map(|id| cache.paths.get(id).cloned())
                .collect::<Vec<_>>();
            if folders.is_empty() && headers.is_empty() && paths.is_empty() {
                continue;
            }
            collected.push(DirtyFlushBatch { board_id: *board_id, folders, headers, paths });
        }

        collected
    };

    // PHASE: FLUSH PER BOARD + ACK DIRTY IDS
    // WHY: if a flush fails we intentionally keep dirty flags for retry.
    for batch in batches {
        let result = flush_batch(state, &batch).await;
        match result {
            Ok(()) => {
                let mut boards = state.boards.write().await;
                if let Some(cache) = boards.get_mut(&batch.board_id) {
                    clear_flushed(cache, &batch);
                }
            }
            Err(e) => {
                let count = batch.folders.len() + batch.headers.len() + batch.paths.len();
                error!(error = %e, count, board_id = %batch.board_id, "persistence flush failed");
            }
        }
    }
}

async fn flush_batch(state: &AppState, batch: &DirtyFlushBatch) -> Result<(), sqlx::Error> {
    board::flush_folders(&state.pool, &batch.folders).await?;
    board::flush_headers(&state.pool, &batch.headers).await?;
    board::flush_paths(&state.pool, &batch.paths).await?;
    Ok(())
}

// EDGE: keep the dirty flag if a document changed again after the snapshot.
fn clear_flushed(cache: &mut BoardCache, batch: &DirtyFlushBatch) {
    for folder in &batch.folders {
        let can_clear = match cache.folders.get(&folder.id) {
            Some(current) => current == folder,
            None => true,
        };
        if can_clear {
            cache.dirty_folders.remove(&folder.id);
        }
    }
    for header in &batch.headers {
        let can_clear = match cache.headers.get(&header.id) {
            Some(current) => current == header,
            None => true,
        };
        if can_clear {
            cache.dirty_headers.remove(&header.id);
        }
    }
    for path in &batch.paths {
        let can_clear = match cache.paths.get(&path.id) {
            Some(current) => current == path,
            None => true,
        };
        if can_clear {
            cache.dirty_paths.remove(&path.id);
        }
    }
}

#[cfg(test)]
pub(crate) async fn flush_all_dirty_for_tests(state: &AppState) {
    flush_all_dirty(state).await;
}

#[cfg(test)]
#[path = "persistence_test.rs"]
mod tests;
