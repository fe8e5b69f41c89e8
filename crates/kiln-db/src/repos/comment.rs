//! Review comments attached to activity rows. Append-only.

use kiln_core::entities::{Comment, NewComment};
use reqwest::Method;

use crate::error::DatabaseError;
use crate::helpers::{decode_rows, eq, single_row};
use crate::service::{KilnDb, RETURN_REPRESENTATION};

const TABLE: &str = "comments";

impl KilnDb {
    /// Comments on one activity row, newest first.
    pub async fn comments_for_activity(
        &self,
        activity_id: i64,
    ) -> Result<Vec<Comment>, DatabaseError> {
        let resp = self
            .request(Method::GET, TABLE)
            .query(&[
                ("select", "*".to_string()),
                ("activity_log_id", eq(activity_id)),
                ("order", "created_at.desc".to_string()),
            ])
            .send()
            .await?;
        decode_rows(resp, TABLE).await
    }

    pub async fn add_comment(&self, comment: &NewComment) -> Result<Comment, DatabaseError> {
        let resp = self
            .request(Method::POST, TABLE)
            .header("Prefer", RETURN_REPRESENTATION)
            .json(comment)
            .send()
            .await?;
        let created: Comment = single_row(decode_rows(resp, TABLE).await?, TABLE)?;
        tracing::debug!(id = created.id, activity_log_id = created.activity_log_id, "comment added");
        Ok(created)
    }
}
