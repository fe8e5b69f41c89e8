//! One-shot messages carried across a redirect.

use axum_extra::extract::SignedCookieJar;
use axum_extra::extract::cookie::Cookie;
use serde::{Deserialize, Serialize};

const FLASH_COOKIE: &str = "flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlashCategory {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub category: FlashCategory,
    pub message: String,
}

fn read(jar: &SignedCookieJar) -> Vec<FlashMessage> {
    jar.get(FLASH_COOKIE)
        .and_then(|c| serde_json::from_str(c.value()).ok())
        .unwrap_or_default()
}

/// Queue a message for the next page view.
#[must_use]
pub fn push(jar: SignedCookieJar, category: FlashCategory, message: impl Into<String>) -> SignedCookieJar {
    let mut messages = read(&jar);
    messages.push(FlashMessage {
        category,
        message: message.into(),
    });
    let value = serde_json::to_string(&messages).unwrap_or_default();
    jar.add(Cookie::build((FLASH_COOKIE, value)).path("/").http_only(true).build())
}

#[must_use]
pub fn error(jar: SignedCookieJar, message: impl Into<String>) -> SignedCookieJar {
    push(jar, FlashCategory::Error, message)
}

#[must_use]
pub fn success(jar: SignedCookieJar, message: impl Into<String>) -> SignedCookieJar {
    push(jar, FlashCategory::Success, message)
}

/// Drain queued messages, clearing the cookie.
#[must_use]
pub fn take(jar: SignedCookieJar) -> (SignedCookieJar, Vec<FlashMessage>) {
    let messages = read(&jar);
    if messages.is_empty() {
        return (jar, messages);
    }
    (jar.remove(Cookie::build(FLASH_COOKIE).path("/").build()), messages)
}
