//! Simple and session-based uploads.
//!
//! These are single requests with no retry; the upload pipeline owns
//! retry, chunking, and offset bookkeeping.

use async_trait::async_trait;
use bytes::Bytes;
use serde::Serialize;

use crate::client::DropboxClient;
use crate::error::StorageError;
use crate::http::normalize_path;
use crate::traits::FileStore;
use crate::types::{CommitInfo, FileMetadata, SessionStartResult, UploadCursor};

#[derive(Serialize)]
struct StartArg {
    close: bool,
}

#[derive(Serialize)]
struct AppendArg<'a> {
    cursor: &'a UploadCursor,
    close: bool,
}

#[derive(Serialize)]
struct FinishArg<'a> {
    cursor: &'a UploadCursor,
    commit: CommitInfo<'a>,
}

/// Stamp the offset we sent onto a mismatch reported by the server.
fn with_sent_offset(error: StorageError, sent: u64) -> StorageError {
    match error {
        StorageError::OffsetMismatch { expected, .. } => {
            StorageError::OffsetMismatch { sent, expected }
        }
        other => other,
    }
}

#[async_trait]
impl FileStore for DropboxClient {
    async fn upload(&self, path: &str, data: Bytes) -> Result<FileMetadata, StorageError> {
        let path = normalize_path(path);
        let len = data.len();
        let meta: FileMetadata = self
            .content_upload("files/upload", &CommitInfo::add(&path), data)
            .await?;
        tracing::debug!(path = %path, bytes = len, "uploaded file");
        Ok(meta)
    }

    async fn upload_session_start(&self, data: Bytes) -> Result<String, StorageError> {
        let result: SessionStartResult = self
            .content_upload("files/upload_session/start", &StartArg { close: false }, data)
            .await?;
        Ok(result.session_id)
    }

    async fn upload_session_append(
        &self,
        cursor: &UploadCursor,
        data: Bytes,
    ) -> Result<(), StorageError> {
        self.content_upload::<_, ()>(
            "files/upload_session/append_v2",
            &AppendArg {
                cursor,
                close: false,
            },
            data,
        )
        .await
        .map_err(|e| with_sent_offset(e, cursor.offset))
    }

    async fn upload_session_finish(
        &self,
        cursor: &UploadCursor,
        path: &str,
        data: Bytes,
    ) -> Result<FileMetadata, StorageError> {
        let path = normalize_path(path);
        self.content_upload(
            "files/upload_session/finish",
            &FinishArg {
                cursor,
                commit: CommitInfo::add(&path),
            },
            data,
        )
        .await
        .map_err(|e| with_sent_offset(e, cursor.offset))
    }
}
