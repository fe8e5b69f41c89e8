//! Upload error types.

use kiln_db::DatabaseError;
use kiln_storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
    /// A storage request failed with an error retrying cannot fix.
    #[error("storage error: {0}")]
    Storage(StorageError),

    /// A transient storage error outlasted the retry budget.
    #[error("{operation} failed after {attempts} attempts: {source}")]
    RetriesExhausted {
        operation: &'static str,
        attempts: u32,
        #[source]
        source: StorageError,
    },

    /// The session offset no longer matches the bytes read from disk.
    #[error("upload offset mismatch (sent {sent}, expected {expected:?})")]
    OffsetMismatch { sent: u64, expected: Option<u64> },

    /// Writing the activity log row failed.
    #[error("activity log error: {0}")]
    Database(#[from] DatabaseError),

    /// Reading the staged file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A folder upload contained no files.
    #[error("no files to upload")]
    EmptyBatch,
}

impl From<StorageError> for UploadError {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::OffsetMismatch { sent, expected } => Self::OffsetMismatch { sent, expected },
            other => Self::Storage(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_offset_mismatch_becomes_upload_mismatch() {
        let err = UploadError::from(StorageError::OffsetMismatch {
            sent: 16,
            expected: Some(32),
        });
        assert!(matches!(
            err,
            UploadError::OffsetMismatch {
                sent: 16,
                expected: Some(32)
            }
        ));
    }

    #[test]
    fn exhausted_retries_name_the_operation() {
        let err = UploadError::RetriesExhausted {
            operation: "upload_session_append",
            attempts: 5,
            source: StorageError::Api {
                status: 503,
                summary: "unavailable".into(),
            },
        };
        assert_eq!(
            err.to_string(),
            "upload_session_append failed after 5 attempts: Dropbox API error (503): unavailable"
        );
    }
}
