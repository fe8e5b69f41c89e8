//! Shared HTTP helpers for Dropbox requests.
//!
//! Centralizes status-code mapping (429 with `Retry-After`, 401, 409
//! lookup errors, offset mismatches) and the `Dropbox-API-Arg` header
//! encoding so the endpoint modules stay focused on request shapes.

use serde::Serialize;
use serde_json::Value;

use crate::error::StorageError;

/// Header carrying JSON arguments on content endpoints.
pub const API_ARG_HEADER: &str = "Dropbox-API-Arg";

/// Header carrying JSON metadata on content-download responses.
pub const API_RESULT_HEADER: &str = "Dropbox-API-Result";

/// Check a Dropbox response and map failures to [`StorageError`].
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, StorageError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    if status.as_u16() == 429 {
        return Err(StorageError::RateLimited {
            retry_after_secs: parse_retry_after(&resp),
        });
    }

    let body = resp.text().await.unwrap_or_default();
    Err(classify_error(status.as_u16(), &body))
}

/// Map a non-success status and body to the matching error variant.
pub fn classify_error(status: u16, body: &str) -> StorageError {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let summary = parsed
        .as_ref()
        .and_then(|v| v.get("error_summary"))
        .and_then(Value::as_str)
        .map_or_else(|| body.trim().to_string(), str::to_string);

    if status == 401 {
        return StorageError::Auth(summary);
    }
    if summary.contains("incorrect_offset") {
        let expected = parsed
            .as_ref()
            .and_then(|v| find_u64(v, "correct_offset"));
        return StorageError::OffsetMismatch { sent: 0, expected };
    }
    if status == 409 && summary.contains("not_found") {
        return StorageError::NotFound(summary);
    }
    StorageError::Api { status, summary }
}

/// Serialize an argument struct for the `Dropbox-API-Arg` header.
///
/// HTTP header values must be ASCII, so every non-ASCII character (and DEL)
/// is written as a `\uXXXX` escape, using surrogate pairs above the BMP.
pub fn api_arg<T: Serialize>(arg: &T) -> Result<String, StorageError> {
    let json = serde_json::to_string(arg).map_err(|e| StorageError::Parse(e.to_string()))?;
    let mut out = String::with_capacity(json.len());
    for ch in json.chars() {
        if ch.is_ascii() && ch != '\u{7f}' {
            out.push(ch);
        } else {
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                out.push_str(&format!("\\u{unit:04x}"));
            }
        }
    }
    Ok(out)
}

/// Normalize a user-supplied path to Dropbox form.
///
/// The root is the empty string; anything else starts with exactly one `/`
/// and has no trailing slash. Backslashes become forward slashes.
#[must_use]
pub fn normalize_path(path: &str) -> String {
    let cleaned = path.replace('\\', "/");
    let trimmed = cleaned.trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

/// Join a folder and a child name into a normalized Dropbox path.
#[must_use]
pub fn join_path(folder: &str, name: &str) -> String {
    let folder = normalize_path(folder);
    let name = name.replace('\\', "/");
    let name = name.trim_matches('/');
    format!("{folder}/{name}")
}

fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(1)
}

fn find_u64(value: &Value, key: &str) -> Option<u64> {
    match value {
        Value::Object(map) => map
            .get(key)
            .and_then(Value::as_u64)
            .or_else(|| map.values().find_map(|v| find_u64(v, key))),
        Value::Array(items) => items.iter().find_map(|v| find_u64(v, key)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn mock_response(status: u16, body: &str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .body(body.to_string())
                .unwrap(),
        )
    }

    #[tokio::test]
    async fn check_response_success() {
        assert!(check_response(mock_response(200, "{}")).await.is_ok());
    }

    #[tokio::test]
    async fn check_response_rate_limited_reads_header() {
        let resp = reqwest::Response::from(
            ::http::Response::builder()
                .status(429)
                .header("Retry-After", "30")
                .body(String::new())
                .unwrap(),
        );
        let err = check_response(resp).await.unwrap_err();
        assert!(matches!(
            err,
            StorageError::RateLimited {
                retry_after_secs: 30
            }
        ));
    }

    #[tokio::test]
    async fn check_response_maps_missing_path() {
        let body = r#"{"error_summary": "path/not_found/..", "error": {".tag": "path"}}"#;
        let err = check_response(mock_response(409, body)).await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }

    #[tokio::test]
    async fn check_response_server_error_keeps_status() {
        let err = check_response(mock_response(503, "upstream down"))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Api { status: 503, .. }));
        assert!(err.is_transient());
    }

    #[test]
    fn classify_incorrect_offset_extracts_expected() {
        let body = r#"{
            "error_summary": "lookup_failed/incorrect_offset/..",
            "error": {".tag": "lookup_failed", "lookup_failed": {".tag": "incorrect_offset", "correct_offset": 8388608}}
        }"#;
        let err = classify_error(409, body);
        assert!(matches!(
            err,
            StorageError::OffsetMismatch {
                expected: Some(8_388_608),
                ..
            }
        ));
    }

    #[test]
    fn classify_unauthorized() {
        let err = classify_error(401, r#"{"error_summary": "expired_access_token/"}"#);
        assert!(matches!(err, StorageError::Auth(ref s) if s == "expired_access_token/"));
    }

    #[test]
    fn api_arg_escapes_non_ascii() {
        #[derive(Serialize)]
        struct Arg<'a> {
            path: &'a str,
        }
        let header = api_arg(&Arg {
            path: "/Café/🎨.png",
        })
        .unwrap();
        assert!(header.is_ascii());
        assert_eq!(header, r#"{"path":"/Caf\u00e9/\ud83c\udfa8.png"}"#);
    }

    #[test]
    fn normalize_path_variants() {
        assert_eq!(normalize_path(""), "");
        assert_eq!(normalize_path("/"), "");
        assert_eq!(normalize_path("Game/Hero/"), "/Game/Hero");
        assert_eq!(normalize_path("//Game"), "/Game");
        assert_eq!(normalize_path("Game\\Hero"), "/Game/Hero");
    }

    #[test]
    fn join_path_handles_root_and_nesting() {
        assert_eq!(join_path("", "a.png"), "/a.png");
        assert_eq!(join_path("/Game/", "a.png"), "/Game/a.png");
        assert_eq!(join_path("Game", "Props/b.fbx"), "/Game/Props/b.fbx");
    }
}
