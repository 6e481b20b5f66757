//! Shared client-side state.
//!
//! DESIGN
//! ======
//! All cross-component data lives in the observable [`app_state::AppState`]
//! key/value store; [`ui`] holds the small typed values that flow through it
//! (sync status, toasts) plus per-session UI state provided as leptos
//! contexts.

pub mod app_state;
pub mod ui;
