use serde::{Deserialize, Serialize};

/// Identity held in the web session after backend sign-in.
///
/// Destroyed on logout; never persisted server-side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionUser {
    pub id: String,
    pub email: String,
}
