//! Upload primitives consumed by the upload pipeline.

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::StorageError;
use crate::types::{FileMetadata, UploadCursor};

/// The subset of the storage API needed to commit a file.
///
/// Implemented by [`crate::DropboxClient`]; tests provide in-memory fakes.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Upload a whole file in one request.
    async fn upload(&self, path: &str, data: Bytes) -> Result<FileMetadata, StorageError>;

    /// Open an upload session with its first chunk; returns the session id.
    async fn upload_session_start(&self, data: Bytes) -> Result<String, StorageError>;

    /// Append a chunk at `cursor.offset`.
    async fn upload_session_append(
        &self,
        cursor: &UploadCursor,
        data: Bytes,
    ) -> Result<(), StorageError>;

    /// Send the final chunk and commit the session to `path`.
    async fn upload_session_finish(
        &self,
        cursor: &UploadCursor,
        path: &str,
        data: Bytes,
    ) -> Result<FileMetadata, StorageError>;
}
