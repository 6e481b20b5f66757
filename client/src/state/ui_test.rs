use super::*;

// --- ToolType ---

#[test]
fn default_tool_is_select() {
    assert_eq!(ToolType::default(), ToolType::Select);
}

#[test]
fn tool_labels() {
    assert_eq!(ToolType::Select.label(), "Select");
    assert_eq!(ToolType::Pan.label(), "Pan");
    assert_eq!(ToolType::Draw.label(), "Draw");
    assert_eq!(ToolType::Header.label(), "Header");
}

// --- SyncStatus ---

#[test]
fn default_sync_status_is_idle() {
    assert_eq!(SyncStatus::default(), SyncStatus::Idle);
}

#[test]
fn sync_status_serializes_snake_case() {
    let json = serde_json::to_value(SyncStatus::Saving).unwrap();
    assert_eq!(json, serde_json::json!("saving"));

    let back: SyncStatus = serde_json::from_value(serde_json::json!("offline")).unwrap();
    assert_eq!(back, SyncStatus::Offline);
}

// --- Toast ---

#[test]
fn toast_constructors_set_kind() {
    let info = Toast::info("saved");
    assert_eq!(info.kind, ToastKind::Info);
    assert_eq!(info.message, "saved");

    let err = Toast::error("Save failed");
    assert_eq!(err.kind, ToastKind::Error);
}

#[test]
fn toast_round_trips_through_json() {
    let toast = Toast::error("Load failed");
    let value = serde_json::to_value(&toast).unwrap();
    let back: Toast = serde_json::from_value(value).unwrap();
    assert_eq!(back, toast);
}
