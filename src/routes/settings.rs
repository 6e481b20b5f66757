//! Settings routes — a flat key/value store of JSON documents.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;

use crate::state::AppState;

const MAX_KEY_LEN: usize = 64;

/// Keys are path segments, so keep them short and unsurprising.
pub(crate) fn valid_key(key: &str) -> bool {
    !key.is_empty()
        && key.len() <= MAX_KEY_LEN
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// `GET /api/settings/:key` — fetch one settings value.
pub async fn get_setting(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    if !valid_key(&key) {
        return Err(StatusCode::BAD_REQUEST);
    }

    let value: Option<serde_json::Value> = sqlx::query_scalar("SELECT value FROM settings WHERE key = $1")
        .bind(&key)
        .fetch_optional(&state.pool)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    value.map(Json).ok_or(StatusCode::NOT_FOUND)
}

/// `PUT /api/settings/:key` — upsert one settings value.
pub async fn put_setting(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(value): Json<serde_json::Value>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    if !valid_key(&key) {
        return Err(StatusCode::BAD_REQUEST);
    }

    sqlx::query(
        "INSERT INTO settings (key, value, updated_at) VALUES ($1, $2, now()) \
         ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = now()",
    )
    .bind(&key)
    .bind(&value)
    .execute(&state.pool)
    .await
    .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    Ok(Json(serde_json::json!({ "ok": true })))
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
