use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::{ActionType, ActivityStatus};

/// A row of the `activity_log` table.
///
/// Created on upload; the status is mutated only on approval.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActivityLogEntry {
    pub id: i64,
    pub user_email: String,
    pub action_type: ActionType,
    pub asset_name: String,
    pub path: String,
    pub status: ActivityStatus,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for the `activity_log` table.
///
/// `id` and `created_at` are assigned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewActivity {
    pub user_email: String,
    pub action_type: ActionType,
    pub asset_name: String,
    pub path: String,
    pub status: ActivityStatus,
}

impl NewActivity {
    #[must_use]
    pub fn upload(
        user_email: &str,
        action_type: ActionType,
        asset_name: &str,
        path: &str,
        succeeded: bool,
    ) -> Self {
        Self {
            user_email: user_email.to_string(),
            action_type,
            asset_name: asset_name.to_string(),
            path: path.to_string(),
            status: if succeeded {
                ActivityStatus::ActionNeeded
            } else {
                ActivityStatus::Failure
            },
        }
    }
}
