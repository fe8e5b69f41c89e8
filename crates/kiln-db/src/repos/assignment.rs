//! Assignments: tasks tying an asset path to an artist and a due date.

use kiln_core::entities::{Assignment, NewAssignment};
use reqwest::Method;

use crate::error::DatabaseError;
use crate::helpers::{decode_rows, eq, single_row};
use crate::service::{KilnDb, RETURN_REPRESENTATION};

const TABLE: &str = "assignments";

impl KilnDb {
    /// All assignments, soonest due first.
    pub async fn list_assignments(&self) -> Result<Vec<Assignment>, DatabaseError> {
        let resp = self
            .request(Method::GET, TABLE)
            .query(&[("select", "*"), ("order", "to_be_completed_by.asc")])
            .send()
            .await?;
        decode_rows(resp, TABLE).await
    }

    pub async fn get_assignment(&self, id: i64) -> Result<Assignment, DatabaseError> {
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

    pub async fn create_assignment(
        &self,
        assignment: &NewAssignment,
    ) -> Result<Assignment, DatabaseError> {
        let resp = self
            .request(Method::POST, TABLE)
            .header("Prefer", RETURN_REPRESENTATION)
            .json(assignment)
            .send()
            .await?;
        let created: Assignment = single_row(decode_rows(resp, TABLE).await?, TABLE)?;
        tracing::info!(
            id = created.id,
            assigned_to = %created.assigned_to,
            asset_path = %created.asset_path,
            "assignment created"
        );
        Ok(created)
    }

    /// Mark an open assignment as completed.
    ///
    /// # Errors
    ///
    /// `AlreadyCompleted` if it was submitted before (the row is left
    /// untouched); `NotFound` for an unknown id.
    pub async fn complete_assignment(&self, id: i64) -> Result<Assignment, DatabaseError> {
        let resp = self
            .request(Method::PATCH, TABLE)
            .query(&[("id", eq(id)), ("completed", "is.false".to_string())])
            .header("Prefer", RETURN_REPRESENTATION)
            .json(&serde_json::json!({ "completed": true }))
            .send()
            .await?;

        if let Some(updated) = decode_rows::<Assignment>(resp, TABLE)
            .await?
            .into_iter()
            .next()
        {
            tracing::info!(id, "assignment completed");
            return Ok(updated);
        }

        // nothing matched: either missing (NotFound propagates) or already done
        self.get_assignment(id).await?;
        Err(DatabaseError::AlreadyCompleted { id })
    }
}
