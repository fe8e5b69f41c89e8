//! Request body helpers.

use bytes::Bytes;
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// Parse a JSON request body, answering 400 for an empty or malformed one.
pub fn parse_json<T: DeserializeOwned>(body: &Bytes) -> Result<T, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(AppError::BadRequest("No data provided".into()));
    }
    serde_json::from_slice(body).map_err(|e| AppError::BadRequest(format!("Invalid request body: {e}")))
}

/// Treat a missing or blank form value as absent.
#[must_use]
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
