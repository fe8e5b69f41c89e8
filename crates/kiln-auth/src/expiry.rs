use base64::Engine as _;
use chrono::{DateTime, TimeDelta, Utc};

use crate::error::AuthError;

/// Decode the JWT `exp` claim without verifying the signature.
///
/// Used to size the `auth` cookie; never for authorization decisions.
///
/// # Errors
///
/// Returns `AuthError::Other` if the JWT format is invalid or the `exp` claim
/// is missing or cannot be parsed.
pub fn decode_expiry(jwt: &str) -> Result<DateTime<Utc>, AuthError> {
    let parts: Vec<&str> = jwt.split('.').collect();
    if parts.len() != 3 {
        return Err(AuthError::Other("invalid JWT format".into()));
    }
    let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(parts[1])
        .map_err(|e| AuthError::Other(format!("base64 decode failed: {e}")))?;
    let value: serde_json::Value = serde_json::from_slice(&payload)
        .map_err(|e| AuthError::Other(format!("JSON parse failed: {e}")))?;
    let exp = value["exp"]
        .as_i64()
        .ok_or_else(|| AuthError::Other("missing exp claim".into()))?;
    DateTime::from_timestamp(exp, 0).ok_or_else(|| AuthError::Other("invalid exp timestamp".into()))
}

/// Seconds until the token expires, or `None` if it is already expired
/// or cannot be decoded.
#[must_use]
pub fn remaining_lifetime(jwt: &str) -> Option<TimeDelta> {
    let remaining = decode_expiry(jwt).ok()? - Utc::now();
    (remaining > TimeDelta::zero()).then_some(remaining)
}
