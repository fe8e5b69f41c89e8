//! In-memory collaborators for upload tests.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use kiln_core::entities::{ActivityLogEntry, NewActivity};
use kiln_db::{ActivityStore, DatabaseError};
use kiln_storage::{FileMetadata, FileStore, StorageError, UploadCursor};
use kiln_upload::{RetryPolicy, UploadSettings};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Upload { path: String, len: u64 },
    Start { len: u64 },
    Append { offset: u64, len: u64 },
    Finish { offset: u64, path: String, len: u64 },
}

/// Failure injected into the next matching call.
#[derive(Debug, Clone, Copy)]
pub enum Fault {
    Pass,
    Transient,
    Permanent,
    OffsetMismatch,
}

#[derive(Default)]
pub struct FakeStore {
    calls: Mutex<Vec<Call>>,
    /// Faults consumed in order, one per call.
    script: Mutex<Vec<Fault>>,
    /// Paths whose uploads always fail transiently.
    broken_paths: Mutex<HashSet<String>>,
    /// Committed objects.
    pub files: Mutex<HashMap<String, u64>>,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(&self, faults: &[Fault]) {
        self.script.lock().unwrap().extend(faults.iter().copied());
    }

    pub fn break_path(&self, path: &str) {
        self.broken_paths.lock().unwrap().insert(path.to_string());
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn committed(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.files.lock().unwrap().keys().cloned().collect();
        paths.sort();
        paths
    }

    fn enter(&self, call: Call, path: Option<&str>) -> Result<(), StorageError> {
        self.calls.lock().unwrap().push(call);
        if let Some(path) = path
            && self.broken_paths.lock().unwrap().contains(path)
        {
            return Err(transient());
        }
        let mut script = self.script.lock().unwrap();
        if script.is_empty() {
            return Ok(());
        }
        match script.remove(0) {
            Fault::Pass => Ok(()),
            Fault::Transient => Err(transient()),
            Fault::Permanent => Err(StorageError::Api {
                status: 400,
                summary: "malformed_path/".into(),
            }),
            Fault::OffsetMismatch => Err(StorageError::OffsetMismatch {
                sent: 0,
                expected: Some(0),
            }),
        }
    }

    fn commit(&self, path: &str, size: u64) -> FileMetadata {
        self.files.lock().unwrap().insert(path.to_string(), size);
        FileMetadata {
            name: path.rsplit('/').next().unwrap_or_default().to_string(),
            id: format!("id:{path}"),
            path_lower: Some(path.to_lowercase()),
            path_display: Some(path.to_string()),
            size,
            client_modified: None,
            server_modified: None,
            rev: None,
        }
    }
}

pub fn transient() -> StorageError {
    StorageError::Api {
        status: 503,
        summary: "too_many_write_operations/".into(),
    }
}

#[async_trait]
impl FileStore for FakeStore {
    async fn upload(&self, path: &str, data: Bytes) -> Result<FileMetadata, StorageError> {
        let len = data.len() as u64;
        self.enter(
            Call::Upload {
                path: path.to_string(),
                len,
            },
            Some(path),
        )?;
        Ok(self.commit(path, len))
    }

    async fn upload_session_start(&self, data: Bytes) -> Result<String, StorageError> {
        self.enter(
            Call::Start {
                len: data.len() as u64,
            },
            None,
        )?;
        Ok("session-1".into())
    }

    async fn upload_session_append(
        &self,
        cursor: &UploadCursor,
        data: Bytes,
    ) -> Result<(), StorageError> {
        self.enter(
            Call::Append {
                offset: cursor.offset,
                len: data.len() as u64,
            },
            None,
        )
    }

    async fn upload_session_finish(
        &self,
        cursor: &UploadCursor,
        path: &str,
        data: Bytes,
    ) -> Result<FileMetadata, StorageError> {
        let len = data.len() as u64;
        self.enter(
            Call::Finish {
                offset: cursor.offset,
                path: path.to_string(),
                len,
            },
            Some(path),
        )?;
        Ok(self.commit(path, cursor.offset + len))
    }
}

#[derive(Default)]
pub struct FakeActivity {
    pub rows: Mutex<Vec<NewActivity>>,
    pub fail: bool,
}

impl FakeActivity {
    pub fn rows(&self) -> Vec<NewActivity> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl ActivityStore for FakeActivity {
    async fn record_activity(
        &self,
        activity: &NewActivity,
    ) -> Result<ActivityLogEntry, DatabaseError> {
        if self.fail {
            return Err(DatabaseError::Api {
                status: 500,
                message: "activity_log unavailable".into(),
            });
        }
        let mut rows = self.rows.lock().unwrap();
        rows.push(activity.clone());
        Ok(ActivityLogEntry {
            id: rows.len() as i64,
            user_email: activity.user_email.clone(),
            action_type: activity.action_type,
            asset_name: activity.asset_name.clone(),
            path: activity.path.clone(),
            status: activity.status,
            created_at: Utc::now(),
        })
    }
}

pub fn settings(chunk_size: u64) -> UploadSettings {
    UploadSettings {
        chunk_size,
        retry: RetryPolicy {
            max_retries: 3,
            base_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(2),
        },
        session_restarts: 1,
    }
}
