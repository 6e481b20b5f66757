//! Reusable UI components.
//!
//! SYSTEM CONTEXT
//! ==============
//! `canvas_host` owns the engine bridge; the rest are presentational pieces
//! shared by the dashboard and board pages.

pub mod board_card;
pub mod canvas_host;
pub mod confirm_dialog;
pub mod folder_dialog;
pub mod status_bar;
pub mod toolbar;
