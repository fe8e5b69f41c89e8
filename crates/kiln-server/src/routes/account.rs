//! Login, logout, and password management.

use axum::Form;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::SignedCookieJar;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use bytes::Bytes;
use kiln_auth::{AuthError, expiry, flows};
use kiln_core::responses::MessageBody;
use serde::Deserialize;

use crate::body::{non_empty, parse_json};
use crate::flash;
use crate::session::{AUTH_COOKIE, CurrentUser, end_session, read_session, start_session};
use crate::state::AppState;
use crate::views::{ChangePasswordPage, EmptyPage, HomePage, LoginPage};

pub async fn index(jar: SignedCookieJar) -> Json<HomePage> {
    Json(HomePage {
        user: read_session(&jar),
    })
}

pub async fn login_page(jar: SignedCookieJar) -> (SignedCookieJar, Json<LoginPage>) {
    let (jar, flashes) = flash::take(jar);
    (jar, Json(LoginPage { flashes }))
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    password: Option<String>,
}

/// Sign in against the auth backend and open a web session.
///
/// Every failure is flashed and sent back to `/login`.
pub async fn supabase_login(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    cookies: CookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    let (Some(email), Some(password)) = (non_empty(form.email), non_empty(form.password)) else {
        let jar = flash::error(jar, "Email and password are required.");
        return (jar, Redirect::to("/login")).into_response();
    };

    match flows::login(&state.auth(), &email, &password).await {
        Ok(outcome) => {
            let jar = start_session(jar, &outcome.user);
            let mut auth = Cookie::build((AUTH_COOKIE, outcome.access_token.clone()))
                .path("/")
                .same_site(SameSite::Lax);
            if let Some(lifetime) = expiry::remaining_lifetime(&outcome.access_token) {
                auth = auth.max_age(cookie::time::Duration::seconds(lifetime.num_seconds()));
            }
            let cookies = cookies.add(auth.build());
            (jar, cookies, Redirect::to("/dashboard")).into_response()
        }
        Err(error) => {
            tracing::info!(%error, "login failed");
            let message = match error {
                AuthError::InvalidCredentials => "Login failed, please try again.".to_string(),
                other => other.to_string(),
            };
            (flash::error(jar, message), Redirect::to("/login")).into_response()
        }
    }
}

pub async fn logout(jar: SignedCookieJar, cookies: CookieJar) -> impl IntoResponse {
    let cookies = cookies.remove(Cookie::build(AUTH_COOKIE).path("/").build());
    (end_session(jar), cookies, Redirect::to("/"))
}

pub async fn reset_page() -> Json<EmptyPage> {
    Json(EmptyPage::default())
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    #[serde(default)]
    new_password: Option<String>,
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
}

fn message(status: StatusCode, text: impl Into<String>) -> (StatusCode, Json<MessageBody>) {
    (status, Json(MessageBody::new(text)))
}

/// Set a new password from the tokens in a reset-email link.
pub async fn reset_password(
    State(state): State<AppState>,
    body: Bytes,
) -> (StatusCode, Json<MessageBody>) {
    let request: ResetPasswordRequest = match parse_json(&body) {
        Ok(request) => request,
        Err(error) => return message(StatusCode::BAD_REQUEST, error.to_string()),
    };
    let (Some(new_password), Some(access_token), Some(refresh_token)) = (
        non_empty(request.new_password),
        non_empty(request.access_token),
        non_empty(request.refresh_token),
    ) else {
        return message(
            StatusCode::BAD_REQUEST,
            "New password, access token, and refresh token are required",
        );
    };

    match flows::reset_password(&state.auth(), &access_token, &refresh_token, &new_password).await
    {
        Ok(_) => message(StatusCode::OK, "Password set successfully"),
        Err(AuthError::NotAuthenticated(reason)) => {
            tracing::info!(%reason, "password reset rejected");
            message(StatusCode::BAD_REQUEST, "Failed to set session")
        }
        Err(error) => {
            tracing::error!(%error, "password reset failed");
            message(StatusCode::INTERNAL_SERVER_ERROR, error.to_string())
        }
    }
}

pub async fn change_password_page(CurrentUser(user): CurrentUser) -> Json<ChangePasswordPage> {
    Json(ChangePasswordPage { email: user.email })
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    #[serde(default)]
    current_password: Option<String>,
    #[serde(default)]
    new_password: Option<String>,
}

/// Verify the current password, then replace it.
pub async fn change_password(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    jar: SignedCookieJar,
    body: Bytes,
) -> (SignedCookieJar, (StatusCode, Json<MessageBody>)) {
    let request: ChangePasswordRequest = match parse_json(&body) {
        Ok(request) => request,
        Err(error) => return (jar, message(StatusCode::BAD_REQUEST, error.to_string())),
    };
    let (Some(current), Some(new)) = (
        non_empty(request.current_password),
        non_empty(request.new_password),
    ) else {
        return (
            jar,
            message(
                StatusCode::BAD_REQUEST,
                "Current and new password are required",
            ),
        );
    };

    match flows::change_password(&state.auth(), &user.email, &current, &new).await {
        Ok(_) => (
            flash::success(jar, "Password changed successfully"),
            message(StatusCode::OK, "Password changed successfully"),
        ),
        Err(AuthError::InvalidCredentials) => (
            flash::error(jar, "Current password is incorrect"),
            message(StatusCode::BAD_REQUEST, "Current password is incorrect"),
        ),
        Err(error) => {
            tracing::error!(%error, "password change failed");
            let text = error.to_string();
            (
                flash::error(jar, text.clone()),
                message(StatusCode::INTERNAL_SERVER_ERROR, text),
            )
        }
    }
}
