//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the document-store API under `/api` and serves the
//! compiled WASM client as static files for everything else. Unknown paths
//! fall through to `index.html` so client-side routes like `/board/:id`
//! survive a hard navigation.

pub mod boards;
pub mod settings;

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, patch, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

fn api_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/boards", get(boards::list_boards).post(boards::create_board))
        .route(
            "/api/boards/{id}",
            get(boards::get_board)
                .patch(boards::rename_board)
                .delete(boards::delete_board),
        )
        .route(
            "/api/boards/{id}/content",
            get(boards::get_content).put(boards::put_content),
        )
        .route("/api/boards/{id}/folders", post(boards::create_folder))
        .route(
            "/api/boards/{id}/folders/{folder_id}",
            patch(boards::patch_folder).delete(boards::delete_folder),
        )
        .route("/api/boards/{id}/headers", post(boards::create_header))
        .route(
            "/api/boards/{id}/headers/{header_id}",
            patch(boards::patch_header).delete(boards::delete_header),
        )
        .route("/api/boards/{id}/paths", post(boards::create_path))
        .route(
            "/api/boards/{id}/paths/{path_id}",
            patch(boards::patch_path).delete(boards::delete_path),
        )
        .route("/api/boards/{id}/export.jsonl", get(boards::export_jsonl))
        .route("/api/boards/{id}/import.jsonl", post(boards::import_jsonl))
        .route(
            "/api/settings/{key}",
            get(settings::get_setting).put(settings::put_setting),
        )
        .route("/healthz", get(healthz))
        .layer(cors)
        .with_state(state)
}

/// Resolve the directory holding the compiled client bundle.
fn static_dir() -> PathBuf {
    std::env::var("STATIC_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("client/dist"))
}

/// Full application router: API routes plus the static client bundle.
pub fn app(state: AppState) -> Router {
    let dir = static_dir();
    let index = dir.join("index.html");
    let client_service = ServeDir::new(&dir)
        .append_index_html_on_directories(true)
        .not_found_service(ServeFile::new(index));

    api_routes(state)
        .layer(TraceLayer::new_for_http())
        .fallback_service(client_service)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
