//! Version-stamped file names.
//!
//! Every upload gets a `_YYYYMMDDHHMMSS` suffix on its stem. Re-uploading a
//! file that already carries a suffix replaces it rather than stacking a
//! second one, so `hero_20260301120000.png` becomes `hero_<now>.png`.

use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;

/// A suffix left by an earlier scheme: timestamp plus a counter.
static STAMP_AND_COUNTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_\d{14}_\d+$").expect("valid regex"));

/// A bare numeric suffix, which also covers a plain timestamp.
static NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_\d+$").expect("valid regex"));

const MAX_NAME_LEN: usize = 200;

/// Remove exactly one trailing `_<14 digits>_<digits>` or `_<digits>` suffix.
#[must_use]
pub fn strip_version_suffix(stem: &str) -> &str {
    for pattern in [&*STAMP_AND_COUNTER, &*NUMERIC] {
        if let Some(found) = pattern.find(stem)
            && found.start() > 0
        {
            return &stem[..found.start()];
        }
    }
    stem
}

/// Format a version stamp as `YYYYMMDDHHMMSS`.
#[must_use]
pub fn timestamp(now: NaiveDateTime) -> String {
    now.format("%Y%m%d%H%M%S").to_string()
}

/// Split `name` into stem and extension (with its dot).
///
/// A leading dot is part of the stem, so `.gitkeep` has no extension.
#[must_use]
pub fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if idx > 0 => name.split_at(idx),
        _ => (name, ""),
    }
}

/// `stem_<stamp>.ext`, with any earlier stamp removed from `stem`.
#[must_use]
pub fn versioned_file_name(name: &str, stamp: &str) -> String {
    let (stem, ext) = split_extension(name);
    format!("{}_{stamp}{ext}", strip_version_suffix(stem))
}

/// Reduce a client-supplied name to a safe single path segment.
///
/// Keeps ASCII letters, digits, `.`, `-` and `_`; every other run of
/// characters (including path separators) becomes one `_`. Leading dots
/// and underscores are dropped so the result is never hidden or empty.
#[must_use]
pub fn sanitize_file_name(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut prev_underscore = false;

    for ch in input.chars() {
        let keep = ch.is_ascii_alphanumeric() || ch == '.' || ch == '-' || ch == '_';
        if keep {
            out.push(ch);
            prev_underscore = ch == '_';
        } else if !prev_underscore {
            out.push('_');
            prev_underscore = true;
        }
    }

    let sanitized = out.trim_start_matches(['.', '_']).trim_end_matches('_');
    if sanitized.is_empty() {
        return "upload".to_string();
    }

    let mut capped = sanitized.to_string();
    if capped.len() > MAX_NAME_LEN {
        capped.truncate(MAX_NAME_LEN);
    }
    capped
}
