use super::*;

#[test]
fn board_endpoint_formats_expected_path() {
    let id = Uuid::nil();
    assert_eq!(
        board_endpoint(id),
        "/api/boards/00000000-0000-0000-0000-000000000000"
    );
}

#[test]
fn board_content_endpoint_formats_expected_path() {
    let id = Uuid::nil();
    assert_eq!(
        board_content_endpoint(id),
        "/api/boards/00000000-0000-0000-0000-000000000000/content"
    );
}

#[test]
fn setting_endpoint_formats_expected_path() {
    assert_eq!(setting_endpoint("dark_mode"), "/api/settings/dark_mode");
}

#[test]
fn status_error_message_formats_status() {
    assert_eq!(status_error_message("save board", 503), "save board failed: 503");
}
