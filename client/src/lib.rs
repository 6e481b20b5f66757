//! # client
//!
//! Leptos + WASM frontend for the whiteboard. Boards are listed on a
//! dashboard; opening a board mounts the `canvas` engine and synchronizes
//! edits to the document-store server through the sync service.
//!
//! This crate contains pages, components, the observable application state
//! store, the REST/sync layer, and the browser-extension bookmark bridge.

pub mod app;
pub mod bridge;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: set up logging and mount the app.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}
