//! REST calls against the document-store server.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Native builds get stubs returning errors since these endpoints are only
//! meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every call returns `Result<_, String>` so the sync layer can count
//! failures, log them, and fall back to localStorage without panicking.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use uuid::Uuid;

use super::types::{BoardContent, BoardSummary};

#[cfg(any(test, feature = "hydrate"))]
fn board_endpoint(id: Uuid) -> String {
    format!("/api/boards/{id}")
}

#[cfg(any(test, feature = "hydrate"))]
fn board_content_endpoint(id: Uuid) -> String {
    format!("/api/boards/{id}/content")
}

#[cfg(any(test, feature = "hydrate"))]
fn setting_endpoint(key: &str) -> String {
    format!("/api/settings/{key}")
}

#[cfg(any(test, feature = "hydrate"))]
fn status_error_message(what: &str, status: u16) -> String {
    format!("{what} failed: {status}")
}

/// Fetch all board summaries from `GET /api/boards`.
///
/// # Errors
///
/// Returns an error string if the request fails or the server responds
/// with a non-OK status.
pub async fn fetch_boards() -> Result<Vec<BoardSummary>, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get("/api/boards")
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(status_error_message("list boards", resp.status()));
        }
        resp.json().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err("not available outside the browser".to_owned())
    }
}

/// Create a board via `POST /api/boards`, returning the new summary.
///
/// # Errors
///
/// Returns an error string if the request fails or the server responds
/// with a non-OK status.
pub async fn create_board(name: &str) -> Result<BoardSummary, String> {
    #[cfg(feature = "hydrate")]
    {
        let payload = serde_json::json!({ "name": name });
        let resp = gloo_net::http::Request::post("/api/boards")
            .json(&payload)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(status_error_message("create board", resp.status()));
        }
        resp.json().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = name;
        Err("not available outside the browser".to_owned())
    }
}

/// Rename a board via `PATCH /api/boards/{id}`.
///
/// # Errors
///
/// Returns an error string if the request fails or the server responds
/// with a non-OK status.
pub async fn rename_board(id: Uuid, name: &str) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let payload = serde_json::json!({ "name": name });
        let resp = gloo_net::http::Request::patch(&board_endpoint(id))
            .json(&payload)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(status_error_message("rename board", resp.status()));
        }
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (id, name);
        Err("not available outside the browser".to_owned())
    }
}

/// Delete a board via `DELETE /api/boards/{id}`.
///
/// # Errors
///
/// Returns an error string if the request fails or the server responds
/// with a non-OK status.
pub async fn delete_board(id: Uuid) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::delete(&board_endpoint(id))
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(status_error_message("delete board", resp.status()));
        }
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = id;
        Err("not available outside the browser".to_owned())
    }
}

/// Fetch a board's full content from `GET /api/boards/{id}/content`.
///
/// # Errors
///
/// Returns an error string if the request fails or the server responds
/// with a non-OK status.
pub async fn fetch_board_content(id: Uuid) -> Result<BoardContent, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(&board_content_endpoint(id))
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(status_error_message("load board", resp.status()));
        }
        resp.json().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = id;
        Err("not available outside the browser".to_owned())
    }
}

/// Replace a board's content via `PUT /api/boards/{id}/content`.
///
/// # Errors
///
/// Returns an error string if the request fails or the server responds
/// with a non-OK status.
pub async fn put_board_content(id: Uuid, content: &BoardContent) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::put(&board_content_endpoint(id))
            .json(content)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(status_error_message("save board", resp.status()));
        }
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (id, content);
        Err("not available outside the browser".to_owned())
    }
}

/// Fetch a settings value from `GET /api/settings/{key}`.
///
/// # Errors
///
/// Returns an error string if the request fails or the server responds
/// with a non-OK status.
pub async fn fetch_setting(key: &str) -> Result<serde_json::Value, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(&setting_endpoint(key))
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(status_error_message("load setting", resp.status()));
        }
        resp.json().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = key;
        Err("not available outside the browser".to_owned())
    }
}

/// Store a settings value via `PUT /api/settings/{key}`.
///
/// # Errors
///
/// Returns an error string if the request fails or the server responds
/// with a non-OK status.
pub async fn put_setting(key: &str, value: &serde_json::Value) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::put(&setting_endpoint(key))
            .json(value)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(status_error_message("save setting", resp.status()));
        }
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (key, value);
        Err("not available outside the browser".to_owned())
    }
}
