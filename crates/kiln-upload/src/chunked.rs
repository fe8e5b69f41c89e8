//! Single-request or session upload of one local file.
//!
//! Files up to `chunk_size` bytes go up in one request. Larger files open
//! an upload session with the first chunk, append full chunks, and finish
//! with the remainder. The cursor offset only advances after the server
//! acknowledges a chunk, and must equal the file size at finish. An offset
//! mismatch abandons the session and restarts the whole upload, at most
//! `session_restarts` times.

use std::path::Path;

use bytes::{Bytes, BytesMut};
use kiln_config::UploadConfig;
use kiln_storage::{FileMetadata, FileStore, UploadCursor};
use tokio::io::AsyncReadExt;

use crate::error::UploadError;
use crate::retry::{RetryPolicy, retry_with_backoff};

/// Chunking and retry parameters for one upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSettings {
    pub chunk_size: u64,
    pub retry: RetryPolicy,
    pub session_restarts: u32,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self::from(&UploadConfig::default())
    }
}

impl From<&UploadConfig> for UploadSettings {
    fn from(config: &UploadConfig) -> Self {
        Self {
            chunk_size: config.chunk_size_bytes.max(1),
            retry: RetryPolicy::from(config),
            session_restarts: config.session_restarts,
        }
    }
}

/// Upload the file at `source` to `dest`.
///
/// # Errors
///
/// Returns the last storage error once retries and session restarts are
/// used up, or an I/O error if `source` cannot be read. Nothing is
/// committed at `dest` on error.
pub async fn upload_file<S: FileStore + ?Sized>(
    store: &S,
    source: &Path,
    dest: &str,
    settings: &UploadSettings,
) -> Result<FileMetadata, UploadError> {
    let mut restarts = 0;
    loop {
        let size = tokio::fs::metadata(source).await?.len();
        match upload_once(store, source, size, dest, settings).await {
            Err(UploadError::OffsetMismatch { sent, expected })
                if restarts < settings.session_restarts =>
            {
                restarts += 1;
                tracing::warn!(
                    dest,
                    sent,
                    ?expected,
                    restart = restarts,
                    "upload session offset mismatch, restarting upload"
                );
            }
            other => return other,
        }
    }
}

async fn upload_once<S: FileStore + ?Sized>(
    store: &S,
    source: &Path,
    size: u64,
    dest: &str,
    settings: &UploadSettings,
) -> Result<FileMetadata, UploadError> {
    let policy = &settings.retry;
    let chunk_size = settings.chunk_size;
    let mut file = tokio::fs::File::open(source).await?;

    if size <= chunk_size {
        let data = read_exact_chunk(&mut file, size, 0).await?;
        let meta = retry_with_backoff(policy, "upload", || store.upload(dest, data.clone())).await?;
        tracing::info!(dest, size, "uploaded file in one request");
        return Ok(meta);
    }

    let first = read_exact_chunk(&mut file, chunk_size, 0).await?;
    let session_id = retry_with_backoff(policy, "upload_session_start", || {
        store.upload_session_start(first.clone())
    })
    .await?;
    let mut cursor = UploadCursor {
        session_id,
        offset: chunk_size,
    };
    tracing::debug!(dest, size, session_id = %cursor.session_id, "upload session started");

    while size - cursor.offset > chunk_size {
        let chunk = read_exact_chunk(&mut file, chunk_size, cursor.offset).await?;
        retry_with_backoff(policy, "upload_session_append", || {
            store.upload_session_append(&cursor, chunk.clone())
        })
        .await?;
        cursor.offset += chunk_size;
        tracing::debug!(dest, offset = cursor.offset, size, "chunk appended");
    }

    let last = read_exact_chunk(&mut file, size - cursor.offset, cursor.offset).await?;
    let meta = retry_with_backoff(policy, "upload_session_finish", || {
        store.upload_session_finish(&cursor, dest, last.clone())
    })
    .await?;
    tracing::info!(dest, size, "upload session committed");
    Ok(meta)
}

/// Read exactly `len` bytes, or fail with an offset mismatch if the file
/// ends early (it shrank since its size was taken).
async fn read_exact_chunk(
    file: &mut tokio::fs::File,
    len: u64,
    offset: u64,
) -> Result<Bytes, UploadError> {
    let want = usize::try_from(len).map_err(|_| UploadError::OffsetMismatch {
        sent: offset,
        expected: None,
    })?;
    let mut buf = BytesMut::zeroed(want);
    let mut filled = 0;
    while filled < want {
        let n = file.read(&mut buf[filled..]).await?;
        if n == 0 {
            return Err(UploadError::OffsetMismatch {
                sent: offset + filled as u64,
                expected: Some(offset + len),
            });
        }
        filled += n;
    }
    Ok(buf.freeze())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_follow_config() {
        let settings = UploadSettings::default();
        assert_eq!(settings.chunk_size, 8 * 1024 * 1024);
        assert_eq!(settings.retry.max_retries, 5);
        assert_eq!(settings.session_restarts, 1);
    }

    #[test]
    fn zero_chunk_size_is_clamped() {
        let config = UploadConfig {
            chunk_size_bytes: 0,
            ..UploadConfig::default()
        };
        assert_eq!(UploadSettings::from(&config).chunk_size, 1);
    }

    #[tokio::test]
    async fn short_read_is_an_offset_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("short.bin");
        tokio::fs::write(&path, b"abc").await.unwrap();
        let mut file = tokio::fs::File::open(&path).await.unwrap();
        let err = read_exact_chunk(&mut file, 8, 0).await.unwrap_err();
        assert!(matches!(
            err,
            UploadError::OffsetMismatch {
                sent: 3,
                expected: Some(8)
            }
        ));
    }
}
