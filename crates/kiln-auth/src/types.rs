use serde::{Deserialize, Serialize};

use kiln_core::entities::SessionUser;

/// User record returned by the auth backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl AuthUser {
    /// Convert to the identity stored in the web session.
    #[must_use]
    pub fn to_session_user(&self) -> SessionUser {
        SessionUser {
            id: self.id.clone(),
            email: self.email.clone().unwrap_or_default(),
        }
    }
}

/// Tokens issued by a password or refresh-token grant.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub expires_in: Option<i64>,
    pub user: AuthUser,
}
