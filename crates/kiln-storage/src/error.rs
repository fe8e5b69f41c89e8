//! Storage error types.

use thiserror::Error;

/// Errors that can occur when talking to the Dropbox API.
#[derive(Debug, Error)]
pub enum StorageError {
    /// HTTP transport error (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Dropbox returned a non-success status code.
    #[error("Dropbox API error ({status}): {summary}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// `error_summary` from the response body, or the raw body.
        summary: String,
    },

    /// The requested path does not exist.
    #[error("path not found: {0}")]
    NotFound(String),

    /// Access token exchange or use was rejected.
    #[error("authorization failed: {0}")]
    Auth(String),

    /// Dropbox returned 429 Too Many Requests.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// An upload session cursor disagrees with the server's offset.
    #[error("upload session offset mismatch (sent {sent}, server expects {expected:?})")]
    OffsetMismatch { sent: u64, expected: Option<u64> },

    /// Failed to parse a Dropbox response.
    #[error("parse error: {0}")]
    Parse(String),
}

impl StorageError {
    /// Whether repeating the same request may succeed.
    ///
    /// Transport failures, rate limiting, and 5xx responses are transient.
    /// Offset mismatches, missing paths, and 4xx lookups are not.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(error) => {
                error.is_timeout() || error.is_connect() || error.is_request() || error.is_body()
            }
            Self::RateLimited { .. } => true,
            Self::Api { status, .. } => *status >= 500,
            Self::NotFound(_) | Self::Auth(_) | Self::OffsetMismatch { .. } | Self::Parse(_) => {
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_errors_are_transient() {
        let err = StorageError::Api {
            status: 503,
            summary: "unavailable".into(),
        };
        assert!(err.is_transient());
        assert!(StorageError::RateLimited { retry_after_secs: 1 }.is_transient());
    }

    #[test]
    fn lookup_errors_are_not_transient() {
        let err = StorageError::Api {
            status: 409,
            summary: "path/conflict/file/".into(),
        };
        assert!(!err.is_transient());
        assert!(!StorageError::NotFound("/x".into()).is_transient());
        assert!(
            !StorageError::OffsetMismatch {
                sent: 10,
                expected: Some(20)
            }
            .is_transient()
        );
    }
}
