mod common;

use chrono::{NaiveDate, NaiveDateTime};
use common::{FakeActivity, FakeStore, settings};
use kiln_core::enums::{ActionType, ActivityStatus};
use kiln_upload::{StagedFile, UploadError, UploadPipeline};
use pretty_assertions::assert_eq;

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 3, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

async fn stage(dir: &tempfile::TempDir, client_name: &str) -> StagedFile {
    StagedFile::write_all(dir.path(), client_name, b"texture-bytes")
        .await
        .unwrap()
}

#[tokio::test]
async fn single_file_gets_versioned_name_and_review_row() {
    let dir = tempfile::tempdir().unwrap();
    let store = FakeStore::new();
    let activity = FakeActivity::default();
    let pipeline = UploadPipeline::new(&store, &activity, settings(1024));

    let staged = stage(&dir, "hero_20250101000000.png").await;
    let uploaded = pipeline
        .upload_file_at("artist@studio.test", &staged, "Game/Hero", now())
        .await
        .unwrap();

    assert_eq!(uploaded.name, "hero_20260301120000.png");
    assert_eq!(uploaded.path, "/Game/Hero/hero_20260301120000.png");
    assert_eq!(store.committed(), vec!["/Game/Hero/hero_20260301120000.png"]);

    let rows = activity.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].status, ActivityStatus::ActionNeeded);
    assert_eq!(rows[0].action_type, ActionType::Upload);
    assert_eq!(rows[0].asset_name, "hero_20260301120000.png");
    assert_eq!(rows[0].user_email, "artist@studio.test");
}

#[tokio::test]
async fn failed_single_file_records_failure_row() {
    let dir = tempfile::tempdir().unwrap();
    let store = FakeStore::new();
    store.break_path("/Game/Hero/cape_20260301120000.psd");
    let activity = FakeActivity::default();
    let pipeline = UploadPipeline::new(&store, &activity, settings(1024));

    let staged = stage(&dir, "cape.psd").await;
    let err = pipeline
        .upload_file_at("artist@studio.test", &staged, "/Game/Hero", now())
        .await
        .unwrap_err();

    assert!(matches!(err, UploadError::RetriesExhausted { .. }));
    assert!(store.committed().is_empty());
    let rows = activity.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].status, ActivityStatus::Failure);
}

#[tokio::test]
async fn unrecorded_success_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let store = FakeStore::new();
    let activity = FakeActivity {
        fail: true,
        ..FakeActivity::default()
    };
    let pipeline = UploadPipeline::new(&store, &activity, settings(1024));

    let staged = stage(&dir, "hero.png").await;
    let err = pipeline
        .upload_file_at("artist@studio.test", &staged, "/Game", now())
        .await
        .unwrap_err();
    assert!(matches!(err, UploadError::Database(_)));
}

#[tokio::test]
async fn folder_batch_attempts_every_file_and_marks_failure() {
    let dir = tempfile::tempdir().unwrap();
    let store = FakeStore::new();
    store.break_path("/Game/Hero_20260301120000/textures/c.png");
    let activity = FakeActivity::default();
    let pipeline = UploadPipeline::new(&store, &activity, settings(1024));

    let mut files = Vec::new();
    for name in [
        "Hero/a.png",
        "Hero/b.png",
        "Hero/textures/c.png",
        "Hero/textures/d.png",
        "Hero/mesh/e.fbx",
    ] {
        files.push(stage(&dir, name).await);
    }

    let report = pipeline
        .upload_folder_at("artist@studio.test", &files, "/Game", now())
        .await
        .unwrap();

    assert!(!report.succeeded());
    assert_eq!(report.folder_name, "Hero_20260301120000");
    assert_eq!(report.uploaded.len(), 4);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(
        report.failed[0].path,
        "/Game/Hero_20260301120000/textures/c.png"
    );
    assert_eq!(
        store.committed(),
        vec![
            "/Game/Hero_20260301120000/a.png",
            "/Game/Hero_20260301120000/b.png",
            "/Game/Hero_20260301120000/mesh/e.fbx",
            "/Game/Hero_20260301120000/textures/d.png",
        ]
    );

    let rows = activity.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].action_type, ActionType::UploadFolder);
    assert_eq!(rows[0].status, ActivityStatus::Failure);
    assert_eq!(rows[0].path, "/Game/Hero_20260301120000");
}

#[tokio::test]
async fn clean_folder_batch_awaits_review() {
    let dir = tempfile::tempdir().unwrap();
    let store = FakeStore::new();
    let activity = FakeActivity::default();
    let pipeline = UploadPipeline::new(&store, &activity, settings(1024));

    let files = vec![
        stage(&dir, "Hero_20250101000000/a.png").await,
        stage(&dir, "Hero_20250101000000/b.png").await,
    ];
    let report = pipeline
        .upload_folder_at("artist@studio.test", &files, "/Game", now())
        .await
        .unwrap();

    assert!(report.succeeded());
    assert_eq!(report.folder_name, "Hero_20260301120000");
    let rows = activity.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].status, ActivityStatus::ActionNeeded);
}

#[tokio::test]
async fn empty_folder_batch_is_rejected() {
    let store = FakeStore::new();
    let activity = FakeActivity::default();
    let pipeline = UploadPipeline::new(&store, &activity, settings(1024));

    let err = pipeline
        .upload_folder_at("artist@studio.test", &[], "/Game", now())
        .await
        .unwrap_err();
    assert!(matches!(err, UploadError::EmptyBatch));
    assert!(activity.rows().is_empty());
}
