//! Activity log: upload records and their approval.

use kiln_core::entities::{ActivityLogEntry, NewActivity};
use kiln_core::enums::ActivityStatus;
use reqwest::Method;

use crate::error::DatabaseError;
use crate::helpers::{decode_rows, eq, single_row};
use crate::service::{KilnDb, RETURN_REPRESENTATION};

const TABLE: &str = "activity_log";

impl KilnDb {
    /// All activity rows, newest first.
    pub async fn list_activity(&self) -> Result<Vec<ActivityLogEntry>, DatabaseError> {
        let resp = self
            .request(Method::GET, TABLE)
            .query(&[("select", "*"), ("order", "created_at.desc")])
            .send()
            .await?;
        decode_rows(resp, TABLE).await
    }

    pub async fn get_activity(&self, id: i64) -> Result<ActivityLogEntry, DatabaseError> {
        let resp = self
            .request(Method::GET, TABLE)
            .query(&[("select", "*".to_string()), ("id", eq(id))])
            .send()
            .await?;
        decode_rows(resp, TABLE)
            .await?
            .into_iter()
            .next()
            .ok_or(DatabaseError::NotFound { table: TABLE, id })
    }

    pub async fn record_activity(
        &self,
        activity: &NewActivity,
    ) -> Result<ActivityLogEntry, DatabaseError> {
        let resp = self
            .request(Method::POST, TABLE)
            .header("Prefer", RETURN_REPRESENTATION)
            .json(activity)
            .send()
            .await?;
        let entry: ActivityLogEntry = single_row(decode_rows(resp, TABLE).await?, TABLE)?;
        tracing::info!(
            id = entry.id,
            path = %entry.path,
            status = %entry.status,
            "recorded activity"
        );
        Ok(entry)
    }

    /// Move an activity from `Action Needed` to `Approved`.
    ///
    /// The update is filtered on the current status, so only a row that is
    /// still awaiting review changes. When nothing matched, the row is read
    /// back to tell a missing id from a disallowed transition.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown id; `InvalidTransition` when the row is
    /// already approved or records a failed upload.
    pub async fn approve_activity(&self, id: i64) -> Result<ActivityLogEntry, DatabaseError> {
        let to = ActivityStatus::Approved;
        let resp = self
            .request(Method::PATCH, TABLE)
            .query(&[
                ("id", eq(id)),
                ("status", eq(ActivityStatus::ActionNeeded.as_str())),
            ])
            .header("Prefer", RETURN_REPRESENTATION)
            .json(&serde_json::json!({ "status": to }))
            .send()
            .await?;

        if let Some(entry) = decode_rows::<ActivityLogEntry>(resp, TABLE)
            .await?
            .into_iter()
            .next()
        {
            tracing::info!(id, "activity approved");
            return Ok(entry);
        }

        let current = self.get_activity(id).await?;
        tracing::debug!(id, from = %current.status, "approval rejected");
        Err(DatabaseError::InvalidTransition {
            id,
            from: current.status,
            to,
        })
    }
}
