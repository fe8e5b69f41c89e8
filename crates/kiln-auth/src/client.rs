//! GoTrue REST endpoints.
//!
//! Calls the Supabase auth API directly via `reqwest`. Every request carries
//! the project key in the `apikey` header; user-scoped calls add the user's
//! access token as a bearer token.

use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::error::AuthError;
use crate::types::{AuthSession, AuthUser};

/// Handle to the auth API of one Supabase project.
#[derive(Debug, Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl AuthClient {
    #[must_use]
    pub fn new(project_url: &str, api_key: &str, http: reqwest::Client) -> Self {
        Self {
            http,
            base_url: format!("{}/auth/v1", project_url.trim_end_matches('/')),
            api_key: api_key.to_string(),
        }
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` when the backend rejects the pair.
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AuthError> {
        let resp = self
            .http
            .post(format!("{}/token", self.base_url))
            .query(&[("grant_type", "password")])
            .header("apikey", &self.api_key)
            .json(&json!({"email": email, "password": password}))
            .send()
            .await?;

        match resp.status().as_u16() {
            400 | 401 | 422 => {
                let body = resp.text().await.unwrap_or_default();
                tracing::debug!(message = %error_message(&body), "password sign-in rejected");
                Err(AuthError::InvalidCredentials)
            }
            _ => decode(resp, "sign in").await,
        }
    }

    /// Register a new account.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Api` if the backend refuses the registration.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<AuthUser, AuthError> {
        let resp = self
            .http
            .post(format!("{}/signup", self.base_url))
            .header("apikey", &self.api_key)
            .json(&json!({"email": email, "password": password}))
            .send()
            .await?;
        let body: Value = decode(resp, "sign up").await?;
        // With email confirmation on, the user object is returned bare;
        // otherwise it is nested in a session.
        let user = body.get("user").cloned().unwrap_or(body);
        serde_json::from_value(user).map_err(|e| AuthError::Other(format!("parse user: {e}")))
    }

    /// Resolve the user an access token belongs to.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotAuthenticated` if the token is rejected.
    pub async fn get_user(&self, access_token: &str) -> Result<AuthUser, AuthError> {
        let resp = self
            .http
            .get(format!("{}/user", self.base_url))
            .header("apikey", &self.api_key)
            .bearer_auth(access_token)
            .send()
            .await?;
        decode(resp, "get user").await
    }

    /// Exchange a refresh token for a fresh session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotAuthenticated` if the refresh token is invalid.
    pub async fn refresh_session(&self, refresh_token: &str) -> Result<AuthSession, AuthError> {
        let resp = self
            .http
            .post(format!("{}/token", self.base_url))
            .query(&[("grant_type", "refresh_token")])
            .header("apikey", &self.api_key)
            .json(&json!({"refresh_token": refresh_token}))
            .send()
            .await?;
        if resp.status().as_u16() == 400 {
            let body = resp.text().await.unwrap_or_default();
            return Err(AuthError::NotAuthenticated(error_message(&body)));
        }
        decode(resp, "refresh session").await
    }

    /// Set a new password for the user owning `access_token`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Api` if the backend refuses the password (e.g. too weak).
    pub async fn update_password(
        &self,
        access_token: &str,
        new_password: &str,
    ) -> Result<AuthUser, AuthError> {
        let resp = self
            .http
            .put(format!("{}/user", self.base_url))
            .header("apikey", &self.api_key)
            .bearer_auth(access_token)
            .json(&json!({"password": new_password}))
            .send()
            .await?;
        decode(resp, "update password").await
    }

    /// Email a password-reset link that lands on `redirect_to`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Api` on a non-success response.
    pub async fn send_password_reset(
        &self,
        email: &str,
        redirect_to: Option<&str>,
    ) -> Result<(), AuthError> {
        let mut req = self
            .http
            .post(format!("{}/recover", self.base_url))
            .header("apikey", &self.api_key)
            .json(&json!({"email": email}));
        if let Some(target) = redirect_to {
            req = req.query(&[("redirect_to", target)]);
        }
        check(req.send().await?, "recover").await
    }

    /// Revoke the backend session behind `access_token`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Api` on a non-success response.
    pub async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        let resp = self
            .http
            .post(format!("{}/logout", self.base_url))
            .header("apikey", &self.api_key)
            .bearer_auth(access_token)
            .send()
            .await?;
        check(resp, "sign out").await
    }
}

/// Pull a human-readable message out of a GoTrue error body.
pub(crate) fn error_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return body.trim().to_string();
    };
    ["error_description", "msg", "message", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .map_or_else(|| body.trim().to_string(), str::to_string)
}

async fn check(resp: reqwest::Response, action: &str) -> Result<(), AuthError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(());
    }
    let body = resp.text().await.unwrap_or_default();
    Err(status_error(status.as_u16(), &body, action))
}

async fn decode<T: DeserializeOwned>(resp: reqwest::Response, action: &str) -> Result<T, AuthError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(status_error(status.as_u16(), &body, action));
    }
    resp.json()
        .await
        .map_err(|e| AuthError::Other(format!("{action}: parse response: {e}")))
}

fn status_error(status: u16, body: &str, action: &str) -> AuthError {
    let message = error_message(body);
    if status == 401 || status == 403 {
        return AuthError::NotAuthenticated(format!("{action}: {message}"));
    }
    AuthError::Api {
        status,
        message: format!("{action}: {message}"),
    }
}
