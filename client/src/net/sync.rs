//! Synchronization between the AppState store and the server.
//!
//! DESIGN
//! ======
//! Every remote operation retries a bounded number of times, then degrades:
//! the error is logged, the last-known-good copy in localStorage is used (or
//! refreshed on the save path), and a toast surfaces the failure. Saves are
//! debounced so a burst of canvas edits coalesces into one bulk PUT of the
//! current board's content.
//!
//! State mutation is split into pure `apply_*` helpers so the store
//! transitions are testable without a browser.

#[cfg(test)]
#[path = "sync_test.rs"]
mod sync_test;

#[cfg(feature = "hydrate")]
use std::cell::Cell;

use uuid::Uuid;

use crate::net::api;
use crate::net::types::{BoardContent, BoardSummary};
use crate::state::app_state::AppState;
use crate::state::ui::{SyncStatus, Toast};
use crate::util::local_store;

const MAX_ATTEMPTS: u32 = 3;
#[cfg(feature = "hydrate")]
const SAVE_DEBOUNCE_MS: u32 = 400;

/// localStorage key holding the cached board list.
const BOARDS_FALLBACK_KEY: &str = "zenban_boards";

/// Server-side key of the user settings document.
const SETTINGS_DOC_KEY: &str = "ui";

/// localStorage key holding the cached content of one board.
fn fallback_key(board_id: Uuid) -> String {
    format!("zenban_board_{board_id}")
}

#[cfg(feature = "hydrate")]
thread_local! {
    static SAVE_PENDING: Cell<bool> = const { Cell::new(false) };
}

/// Retry `call` up to [`MAX_ATTEMPTS`] times, returning the last error.
/// No backoff: the calls are cheap and the user is waiting.
async fn with_retries<T, F, Fut>(what: &str, mut call: F) -> Result<T, String>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, String>>,
{
    let mut last_err = String::new();
    for attempt in 1..=MAX_ATTEMPTS {
        match call().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                log::warn!("{what}: attempt {attempt}/{MAX_ATTEMPTS} failed: {err}");
                last_err = err;
            }
        }
    }
    Err(last_err)
}

// --- Pure store transitions ---

fn apply_boards(state: &AppState, boards: &[BoardSummary]) {
    state.set_boards(boards);
}

fn apply_board_created(state: &AppState, board: BoardSummary) {
    let id = board.id;
    let mut boards = state.boards();
    boards.push(board);
    state.set_boards(&boards);
    state.set_current_board_id(Some(id));
    state.set_board_content(&BoardContent::default());
}

fn apply_board_renamed(state: &AppState, id: Uuid, name: &str) {
    let mut boards = state.boards();
    for board in &mut boards {
        if board.id == id {
            board.name = name.to_owned();
        }
    }
    state.set_boards(&boards);
}

fn apply_board_deleted(state: &AppState, id: Uuid) {
    let boards: Vec<BoardSummary> = state
        .boards()
        .into_iter()
        .filter(|b| b.id != id)
        .collect();
    state.set_boards(&boards);
    if state.current_board_id() == Some(id) {
        state.set_current_board_id(None);
    }
}

fn apply_board_content(state: &AppState, content: &BoardContent) {
    state.set_board_content(content);
}

fn apply_settings(state: &AppState, value: serde_json::Value) {
    state.set_settings(value);
}

// --- Service ---

/// Coordinates AppState with the server. Cheap to clone; clones share the
/// same underlying store.
#[derive(Clone)]
pub struct SyncService {
    state: AppState,
}

impl SyncService {
    #[must_use]
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Load the board list, falling back to the cached copy on failure.
    pub async fn load_boards(&self) {
        match with_retries("list boards", api::fetch_boards).await {
            Ok(boards) => {
                apply_boards(&self.state, &boards);
                local_store::save_json(BOARDS_FALLBACK_KEY, &boards);
                self.state.set_sync_status(SyncStatus::Synced);
            }
            Err(err) => {
                log::error!("list boards: {err}");
                if let Some(cached) = local_store::load_json::<Vec<BoardSummary>>(BOARDS_FALLBACK_KEY) {
                    apply_boards(&self.state, &cached);
                }
                self.state.set_sync_status(SyncStatus::Offline);
                self.state.push_toast(Toast::error("Load failed"));
            }
        }
    }

    /// Create a board, append it to the list, and make it current.
    pub async fn create_board(&self, name: &str) {
        match with_retries("create board", || api::create_board(name)).await {
            Ok(board) => {
                apply_board_created(&self.state, board);
                local_store::save_json(BOARDS_FALLBACK_KEY, &self.state.boards());
                self.state.set_sync_status(SyncStatus::Synced);
            }
            Err(err) => {
                log::error!("create board: {err}");
                self.state.set_sync_status(SyncStatus::Offline);
                self.state.push_toast(Toast::error("Save failed"));
            }
        }
    }

    /// Rename a board both remotely and in the cached list.
    pub async fn update_board_name(&self, id: Uuid, name: &str) {
        match with_retries("rename board", || api::rename_board(id, name)).await {
            Ok(()) => {
                apply_board_renamed(&self.state, id, name);
                local_store::save_json(BOARDS_FALLBACK_KEY, &self.state.boards());
                self.state.set_sync_status(SyncStatus::Synced);
            }
            Err(err) => {
                log::error!("rename board: {err}");
                self.state.set_sync_status(SyncStatus::Offline);
                self.state.push_toast(Toast::error("Save failed"));
            }
        }
    }

    /// Delete a board remotely, drop it from the list, and clear the
    /// current board if it matched.
    pub async fn delete_board(&self, id: Uuid) {
        match with_retries("delete board", || api::delete_board(id)).await {
            Ok(()) => {
                apply_board_deleted(&self.state, id);
                local_store::save_json(BOARDS_FALLBACK_KEY, &self.state.boards());
                local_store::remove(&fallback_key(id));
                self.state.set_sync_status(SyncStatus::Synced);
            }
            Err(err) => {
                log::error!("delete board: {err}");
                self.state.set_sync_status(SyncStatus::Offline);
                self.state.push_toast(Toast::error("Save failed"));
            }
        }
    }

    /// Load a board's full content, falling back to the cached copy.
    pub async fn load_board_content(&self, id: Uuid) {
        self.state.set_current_board_id(Some(id));
        match with_retries("load board", || api::fetch_board_content(id)).await {
            Ok(content) => {
                apply_board_content(&self.state, &content);
                local_store::save_json(&fallback_key(id), &content);
                self.state.set_sync_status(SyncStatus::Synced);
            }
            Err(err) => {
                log::error!("load board {id}: {err}");
                if let Some(cached) = local_store::load_json::<BoardContent>(&fallback_key(id)) {
                    apply_board_content(&self.state, &cached);
                }
                self.state.set_sync_status(SyncStatus::Offline);
                self.state.push_toast(Toast::error("Load failed"));
            }
        }
    }

    /// Load the user settings document into the store. A missing document
    /// is normal for first-time users, so failures are only logged.
    pub async fn load_settings(&self) {
        match api::fetch_setting(SETTINGS_DOC_KEY).await {
            Ok(value) => apply_settings(&self.state, value),
            Err(err) => log::debug!("load settings: {err}"),
        }
    }

    /// Store the user settings document and push it to the server.
    pub async fn save_settings(&self, value: serde_json::Value) {
        apply_settings(&self.state, value.clone());
        if let Err(err) = with_retries("save settings", || api::put_setting(SETTINGS_DOC_KEY, &value)).await {
            log::warn!("save settings: {err}");
        }
    }

    /// Schedule a debounced save of the current board's content. Repeated
    /// calls within the debounce window coalesce into one PUT.
    pub fn save_after_action(&self, reason: &str) {
        #[cfg(feature = "hydrate")]
        {
            log::debug!("save scheduled: {reason}");
            if SAVE_PENDING.with(Cell::get) {
                return;
            }
            SAVE_PENDING.with(|pending| pending.set(true));
            self.state.set_sync_status(SyncStatus::Saving);
            let service = self.clone();
            gloo_timers::callback::Timeout::new(SAVE_DEBOUNCE_MS, move || {
                SAVE_PENDING.with(|pending| pending.set(false));
                wasm_bindgen_futures::spawn_local(async move {
                    service.flush_save().await;
                });
            })
            .forget();
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = reason;
        }
    }

    /// Push the current board's content to the server now.
    pub async fn flush_save(&self) {
        let Some(id) = self.state.current_board_id() else {
            return;
        };
        let Some(content) = self.state.board_content() else {
            return;
        };
        // Keep the local copy current whether or not the PUT lands.
        local_store::save_json(&fallback_key(id), &content);
        match with_retries("save board", || api::put_board_content(id, &content)).await {
            Ok(()) => {
                self.state.set_sync_status(SyncStatus::Synced);
            }
            Err(err) => {
                log::error!("save board {id}: {err}");
                self.state.set_sync_status(SyncStatus::Offline);
                self.state.push_toast(Toast::error("Save failed"));
            }
        }
    }
}
