//! Composite auth flows used by the web layer.
//!
//! Each flow is generic over [`AuthBackend`] so it can be exercised with a
//! scripted fake; production code passes an [`AuthClient`].

use async_trait::async_trait;
use kiln_core::entities::SessionUser;

use crate::client::AuthClient;
use crate::error::AuthError;
use crate::types::{AuthSession, AuthUser};

/// The auth endpoints the flows depend on.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AuthError>;
    async fn get_user(&self, access_token: &str) -> Result<AuthUser, AuthError>;
    async fn refresh_session(&self, refresh_token: &str) -> Result<AuthSession, AuthError>;
    async fn update_password(
        &self,
        access_token: &str,
        new_password: &str,
    ) -> Result<AuthUser, AuthError>;
    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError>;
}

#[async_trait]
impl AuthBackend for AuthClient {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AuthError> {
        Self::sign_in_with_password(self, email, password).await
    }

    async fn get_user(&self, access_token: &str) -> Result<AuthUser, AuthError> {
        Self::get_user(self, access_token).await
    }

    async fn refresh_session(&self, refresh_token: &str) -> Result<AuthSession, AuthError> {
        Self::refresh_session(self, refresh_token).await
    }

    async fn update_password(
        &self,
        access_token: &str,
        new_password: &str,
    ) -> Result<AuthUser, AuthError> {
        Self::update_password(self, access_token, new_password).await
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        Self::sign_out(self, access_token).await
    }
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: SessionUser,
    /// Access token handed to the browser in the `auth` cookie.
    pub access_token: String,
}

/// Sign in, resolve the user behind the issued token, then end the backend session.
///
/// The web session (not the backend session) keeps the user logged in, so a
/// failed sign-out is logged and ignored.
///
/// # Errors
///
/// Returns `AuthError::InvalidCredentials` for a wrong email/password pair.
pub async fn login<B: AuthBackend + ?Sized>(
    backend: &B,
    email: &str,
    password: &str,
) -> Result<LoginOutcome, AuthError> {
    let session = backend.sign_in_with_password(email, password).await?;
    let user = backend.get_user(&session.access_token).await?;

    if let Err(error) = backend.sign_out(&session.access_token).await {
        tracing::warn!(%error, "failed to end backend session after login");
    }

    tracing::info!(user_id = %user.id, "user logged in");
    Ok(LoginOutcome {
        user: user.to_session_user(),
        access_token: session.access_token,
    })
}

/// Re-authenticate with the current password, then set the new one.
///
/// # Errors
///
/// Returns `AuthError::InvalidCredentials` if `current_password` is wrong.
pub async fn change_password<B: AuthBackend + ?Sized>(
    backend: &B,
    email: &str,
    current_password: &str,
    new_password: &str,
) -> Result<AuthUser, AuthError> {
    let session = backend
        .sign_in_with_password(email, current_password)
        .await?;
    let user = backend
        .update_password(&session.access_token, new_password)
        .await?;
    tracing::info!(user_id = %user.id, "password changed");
    Ok(user)
}

/// Set a new password using the tokens from a reset-email link.
///
/// The access token is used directly while it is still accepted; once the
/// backend rejects it, the refresh token is exchanged for a new one.
///
/// # Errors
///
/// Returns `AuthError::NotAuthenticated` if neither token is usable.
pub async fn reset_password<B: AuthBackend + ?Sized>(
    backend: &B,
    access_token: &str,
    refresh_token: &str,
    new_password: &str,
) -> Result<AuthUser, AuthError> {
    let token = match backend.get_user(access_token).await {
        Ok(_) => access_token.to_string(),
        Err(AuthError::NotAuthenticated(reason)) => {
            tracing::debug!(%reason, "reset access token rejected, refreshing");
            backend.refresh_session(refresh_token).await?.access_token
        }
        Err(error) => return Err(error),
    };

    let user = backend.update_password(&token, new_password).await?;
    tracing::info!(user_id = %user.id, "password reset");
    Ok(user)
}
