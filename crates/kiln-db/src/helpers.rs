//! Response checking and row decoding shared by the table modules.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::DatabaseError;

/// Pass through a success response; otherwise build [`DatabaseError::Api`]
/// from the PostgREST error body (`message`, then `hint`, then raw text).
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, DatabaseError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(DatabaseError::Api {
        status: status.as_u16(),
        message: error_message(&body),
    })
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            ["message", "hint", "details"]
                .iter()
                .find_map(|key| v.get(*key).and_then(Value::as_str).map(str::to_string))
        })
        .unwrap_or_else(|| body.trim().to_string())
}

/// Decode a JSON array of rows.
pub async fn decode_rows<T: DeserializeOwned>(
    resp: reqwest::Response,
    table: &str,
) -> Result<Vec<T>, DatabaseError> {
    let resp = check_response(resp).await?;
    let text = resp.text().await?;
    serde_json::from_str(&text).map_err(|e| DatabaseError::Parse(format!("{table}: {e}")))
}

/// Take the single row a `return=representation` insert echoes back.
pub fn single_row<T>(rows: Vec<T>, table: &str) -> Result<T, DatabaseError> {
    rows.into_iter()
        .next()
        .ok_or_else(|| DatabaseError::Parse(format!("{table}: insert returned no row")))
}

/// PostgREST equality filter value.
pub fn eq(value: impl std::fmt::Display) -> String {
    format!("eq.{value}")
}
