use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A row of the `comments` table. Never mutated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Comment {
    pub id: i64,
    pub activity_log_id: i64,
    pub author: String,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewComment {
    pub activity_log_id: i64,
    pub author: String,
    pub comment: String,
}
