//! Observable key/value application state store.
//!
//! DESIGN
//! ======
//! A single store holds every piece of cross-component state as a
//! `serde_json::Value` keyed by a well-known name. Components read with
//! [`AppState::get`], write with [`AppState::set`], and subscribe with
//! [`AppState::on_change`]; callbacks fire synchronously after the write.
//! The store is browser-main-thread only, so `Rc<RefCell<...>>` interior
//! mutability is sufficient. There is no transactionality, schema
//! validation, or undo.
//!
//! Typed accessors for the well-known keys sit alongside the raw API so
//! call sites don't hand-roll JSON conversions.

#[cfg(test)]
#[path = "app_state_test.rs"]
mod app_state_test;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde_json::Value;
use uuid::Uuid;

use crate::net::types::{BoardContent, BoardSummary};
use crate::state::ui::{SyncStatus, Toast};

/// Well-known store keys.
pub mod keys {
    /// `Vec<BoardSummary>` — all boards known to the client.
    pub const BOARDS: &str = "boards";
    /// `Uuid` — the board currently open, if any.
    pub const CURRENT_BOARD_ID: &str = "current_board_id";
    /// `BoardContent` — full content of the current board.
    pub const BOARD_CONTENT: &str = "board_content";
    /// `serde_json::Value` — user settings document.
    pub const SETTINGS: &str = "settings";
    /// `SyncStatus` — current sync state for the status bar.
    pub const SYNC_STATUS: &str = "sync_status";
    /// `Uuid` — card receiving extension bookmarks, if the user picked one.
    pub const ACTIVE_CARD_ID: &str = "active_card_id";
    /// `Toast` — transient user-facing notification.
    pub const TOAST: &str = "toast";
}

type Callback = Rc<dyn Fn(&Value)>;

#[derive(Default)]
struct Inner {
    values: RefCell<HashMap<String, Value>>,
    listeners: RefCell<HashMap<String, Vec<Callback>>>,
}

/// Cheaply cloneable handle to the shared store.
#[derive(Clone, Default)]
pub struct AppState {
    inner: Rc<Inner>,
}

impl AppState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the raw value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> {
        self.inner.values.borrow().get(key).cloned()
    }

    /// Write `value` under `key` and notify that key's listeners.
    ///
    /// Listeners run synchronously, after the write has landed, and are
    /// invoked outside the store's borrows so a callback may read or write
    /// the store again.
    pub fn set(&self, key: &str, value: Value) {
        self.inner
            .values
            .borrow_mut()
            .insert(key.to_owned(), value.clone());

        let callbacks: Vec<Callback> = self
            .inner
            .listeners
            .borrow()
            .get(key)
            .map(|list| list.clone())
            .unwrap_or_default();
        for cb in callbacks {
            cb(&value);
        }
    }

    /// Register `callback` to run after every [`set`](Self::set) of `key`.
    pub fn on_change(&self, key: &str, callback: impl Fn(&Value) + 'static) {
        self.inner
            .listeners
            .borrow_mut()
            .entry(key.to_owned())
            .or_default()
            .push(Rc::new(callback));
    }

    // --- Typed accessors ---

    #[must_use]
    pub fn boards(&self) -> Vec<BoardSummary> {
        self.get(keys::BOARDS)
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default()
    }

    pub fn set_boards(&self, boards: &[BoardSummary]) {
        if let Ok(value) = serde_json::to_value(boards) {
            self.set(keys::BOARDS, value);
        }
    }

    #[must_use]
    pub fn current_board_id(&self) -> Option<Uuid> {
        self.get(keys::CURRENT_BOARD_ID)
            .and_then(|v| serde_json::from_value(v).ok())
    }

    pub fn set_current_board_id(&self, id: Option<Uuid>) {
        self.set(keys::CURRENT_BOARD_ID, serde_json::json!(id));
    }

    #[must_use]
    pub fn board_content(&self) -> Option<BoardContent> {
        self.get(keys::BOARD_CONTENT)
            .and_then(|v| serde_json::from_value(v).ok())
    }

    pub fn set_board_content(&self, content: &BoardContent) {
        if let Ok(value) = serde_json::to_value(content) {
            self.set(keys::BOARD_CONTENT, value);
        }
    }

    #[must_use]
    pub fn sync_status(&self) -> SyncStatus {
        self.get(keys::SYNC_STATUS)
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default()
    }

    pub fn set_sync_status(&self, status: SyncStatus) {
        if let Ok(value) = serde_json::to_value(status) {
            self.set(keys::SYNC_STATUS, value);
        }
    }

    #[must_use]
    pub fn settings(&self) -> Option<Value> {
        self.get(keys::SETTINGS)
    }

    pub fn set_settings(&self, value: Value) {
        self.set(keys::SETTINGS, value);
    }

    #[must_use]
    pub fn active_card_id(&self) -> Option<Uuid> {
        self.get(keys::ACTIVE_CARD_ID)
            .and_then(|v| serde_json::from_value(v).ok())
    }

    pub fn set_active_card_id(&self, id: Option<Uuid>) {
        self.set(keys::ACTIVE_CARD_ID, serde_json::json!(id));
    }

    /// Surface a transient notification.
    pub fn push_toast(&self, toast: Toast) {
        if let Ok(value) = serde_json::to_value(toast) {
            self.set(keys::TOAST, value);
        }
    }
}
