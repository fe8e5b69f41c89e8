//! Signed-cookie login sessions.
//!
//! The session cookie carries the [`SessionUser`] as JSON, signed with the
//! key derived from `server.secret_key`. A tampered or missing cookie reads
//! as "not logged in".

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::SignedCookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use kiln_core::entities::SessionUser;

use crate::error::AppError;
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "session";

/// Raw backend access token, readable by page scripts.
pub const AUTH_COOKIE: &str = "auth";

/// Extractor for routes that require login.
///
/// Rejects with [`AppError::Unauthenticated`], which redirects to `/login`.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub SessionUser);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = SignedCookieJar::from_headers(&parts.headers, state.key().clone());
        read_session(&jar).map(Self).ok_or(AppError::Unauthenticated)
    }
}

#[must_use]
pub fn read_session(jar: &SignedCookieJar) -> Option<SessionUser> {
    let cookie = jar.get(SESSION_COOKIE)?;
    match serde_json::from_str(cookie.value()) {
        Ok(user) => Some(user),
        Err(error) => {
            tracing::warn!(%error, "discarding unreadable session cookie");
            None
        }
    }
}

/// Store `user` in the session cookie.
#[must_use]
pub fn start_session(jar: SignedCookieJar, user: &SessionUser) -> SignedCookieJar {
    let value = serde_json::to_string(user).unwrap_or_default();
    jar.add(
        Cookie::build((SESSION_COOKIE, value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .build(),
    )
}

#[must_use]
pub fn end_session(jar: SignedCookieJar) -> SignedCookieJar {
    jar.remove(Cookie::build(SESSION_COOKIE).path("/").build())
}
