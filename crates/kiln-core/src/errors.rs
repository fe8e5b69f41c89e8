//! Cross-cutting error types for kiln.
//!
//! Adapter-specific errors (`StorageError`, `AuthError`, `DatabaseError`)
//! live in their own crates. The HTTP layer converges all of them into a
//! single response error in `kiln-server`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// The assignment has already been submitted.
    #[error("Assignment {id} is already completed")]
    AlreadyCompleted { id: i64 },

    /// Data failed validation (missing form fields, malformed values).
    #[error("Validation error: {0}")]
    Validation(String),
}
