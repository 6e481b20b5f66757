use super::*;

// =============================================================================
// valid_key
// =============================================================================

#[test]
fn valid_key_accepts_simple_names() {
    assert!(valid_key("theme"));
    assert!(valid_key("dark_mode"));
    assert!(valid_key("sidebar-width"));
    assert!(valid_key("v2"));
}

#[test]
fn valid_key_rejects_empty() {
    assert!(!valid_key(""));
}

#[test]
fn valid_key_rejects_overlong() {
    let key = "k".repeat(MAX_KEY_LEN + 1);
    assert!(!valid_key(&key));
    assert!(valid_key(&"k".repeat(MAX_KEY_LEN)));
}

#[test]
fn valid_key_rejects_path_and_whitespace_characters() {
    assert!(!valid_key("a/b"));
    assert!(!valid_key("a b"));
    assert!(!valid_key("a.b"));
    assert!(!valid_key("naïve"));
}

// =============================================================================
// Handlers against an unreachable database
// =============================================================================

#[tokio::test]
async fn get_setting_invalid_key_is_bad_request() {
    let state = crate::state::test_helpers::test_app_state();
    let result = get_setting(axum::extract::State(state), axum::extract::Path("a/b".to_owned())).await;
    assert!(matches!(result, Err(StatusCode::BAD_REQUEST)));
}

#[tokio::test]
async fn put_setting_invalid_key_is_bad_request() {
    let state = crate::state::test_helpers::test_app_state();
    let result = put_setting(
        axum::extract::State(state),
        axum::extract::Path(String::new()),
        axum::response::Json(serde_json::json!({"theme": "dark"})),
    )
    .await;
    assert!(matches!(result, Err(StatusCode::BAD_REQUEST)));
}

#[tokio::test]
async fn get_setting_database_failure_is_internal_error() {
    let state = crate::state::test_helpers::test_app_state();
    let result = get_setting(axum::extract::State(state), axum::extract::Path("theme".to_owned())).await;
    assert!(matches!(result, Err(StatusCode::INTERNAL_SERVER_ERROR)));
}
