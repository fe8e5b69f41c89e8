//! Serde roundtrip tests against the JSON shapes the backend returns.

use chrono::{NaiveDate, TimeZone, Utc};
use kiln_core::entities::*;
use kiln_core::enums::*;
use pretty_assertions::assert_eq;

#[test]
fn activity_row_parses_backend_json() {
    let raw = serde_json::json!({
        "id": 42,
        "user_email": "artist@studio.test",
        "action_type": "upload",
        "asset_name": "hero_20260101120000.png",
        "path": "/Game/Hero/hero_20260101120000.png",
        "status": "Action Needed",
        "created_at": "2026-01-01T12:00:00.123456+00:00"
    });

    let entry: ActivityLogEntry = serde_json::from_value(raw).unwrap();
    assert_eq!(entry.id, 42);
    assert_eq!(entry.action_type, ActionType::Upload);
    assert_eq!(entry.status, ActivityStatus::ActionNeeded);

    let back = serde_json::to_value(&entry).unwrap();
    let again: ActivityLogEntry = serde_json::from_value(back).unwrap();
    assert_eq!(again, entry);
}

#[test]
fn assignment_row_parses_due_date() {
    let raw = serde_json::json!({
        "id": 3,
        "assigned_to": "artist@studio.test",
        "assigned_by": "lead@studio.test",
        "asset_path": "Game/Hero",
        "upload_path": "Game/Hero/Final",
        "details": "Final pass",
        "to_be_completed_by": "2026-12-24",
        "completed": false,
        "created_at": "2026-10-01T08:30:00+00:00"
    });

    let assignment: Assignment = serde_json::from_value(raw).unwrap();
    assert_eq!(
        assignment.to_be_completed_by,
        NaiveDate::from_ymd_opt(2026, 12, 24).unwrap()
    );
    assert_eq!(
        assignment.created_at,
        Some(Utc.with_ymd_and_hms(2026, 10, 1, 8, 30, 0).unwrap())
    );
    assert!(assignment.ensure_open().is_ok());
}

#[test]
fn comment_roundtrip() {
    let comment = Comment {
        id: 1,
        activity_log_id: 42,
        author: "lead@studio.test".into(),
        comment: "Looks great".into(),
        created_at: Utc::now(),
    };
    let json = serde_json::to_string(&comment).unwrap();
    let recovered: Comment = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered, comment);
}

#[test]
fn new_activity_serializes_status_string() {
    let new = NewActivity::upload(
        "artist@studio.test",
        ActionType::UploadFolder,
        "Props_20260101120000",
        "/Game/Props_20260101120000",
        false,
    );
    let json = serde_json::to_value(&new).unwrap();
    assert_eq!(json["status"], "failure");
    assert_eq!(json["action_type"], "upload_folder");
}
