//! Database error types for kiln-db.

use kiln_core::enums::ActivityStatus;
use thiserror::Error;

/// Errors from backend table operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// No row matched the requested id.
    #[error("{table} row {id} not found")]
    NotFound { table: &'static str, id: i64 },

    /// The activity row is not in a state that allows approval.
    #[error("activity {id} cannot move from {from} to {to}")]
    InvalidTransition {
        id: i64,
        from: ActivityStatus,
        to: ActivityStatus,
    },

    /// The assignment was already submitted.
    #[error("assignment {id} is already completed")]
    AlreadyCompleted { id: i64 },

    /// PostgREST rejected the request.
    #[error("backend API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A response body did not match the expected row shape.
    #[error("parse error: {0}")]
    Parse(String),
}

impl DatabaseError {
    /// Whether the error reflects a row state conflict rather than a failure.
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::InvalidTransition { .. } | Self::AlreadyCompleted { .. }
        )
    }
}
