//! UI-facing state: active tool, sync status, toasts, and dialogs.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tools selectable from the toolbar. Mapped onto `canvas::input::Tool`
/// by the canvas host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolType {
    #[default]
    Select,
    Pan,
    Draw,
    Header,
}

impl ToolType {
    /// Toolbar label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Select => "Select",
            Self::Pan => "Pan",
            Self::Draw => "Draw",
            Self::Header => "Header",
        }
    }
}

/// Sync state shown in the status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncStatus {
    #[default]
    Idle,
    Saving,
    Synced,
    /// Last save or load failed; local fallback is in effect.
    Offline,
}

impl SyncStatus {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Saving => "saving...",
            Self::Synced => "synced",
            Self::Offline => "offline",
        }
    }
}

/// Severity of a toast notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastKind {
    Info,
    Error,
}

/// A transient user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
}

impl Toast {
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self { message: message.into(), kind: ToastKind::Info }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self { message: message.into(), kind: ToastKind::Error }
    }
}

/// Reactive UI state provided as a leptos context.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub active_tool: ToolType,
    pub stroke_color: String,
    pub dark_mode: bool,
    /// Folder whose contents dialog is open, if any.
    pub open_folder_id: Option<Uuid>,
}
