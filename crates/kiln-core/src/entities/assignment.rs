use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// A row of the `assignments` table: a task linking an asset path to a
/// responsible user with a due date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Assignment {
    pub id: i64,
    pub assigned_to: String,
    pub assigned_by: String,
    pub asset_path: String,
    pub upload_path: String,
    pub details: String,
    pub to_be_completed_by: NaiveDate,
    pub completed: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Assignment {
    /// Fail with [`CoreError::AlreadyCompleted`] if the assignment was submitted.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::AlreadyCompleted` when `completed` is set.
    pub fn ensure_open(&self) -> Result<(), CoreError> {
        if self.completed {
            return Err(CoreError::AlreadyCompleted { id: self.id });
        }
        Ok(())
    }
}

/// Insert payload for the `assignments` table, as posted by the assignment form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewAssignment {
    pub assigned_to: String,
    pub assigned_by: String,
    pub asset_path: String,
    pub upload_path: String,
    #[serde(alias = "assignment_details")]
    pub details: String,
    pub to_be_completed_by: NaiveDate,
    #[serde(default)]
    pub completed: bool,
}

impl NewAssignment {
    /// Check that every free-text field is filled in.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` naming the first empty field.
    pub fn validate(&self) -> Result<(), CoreError> {
        let fields = [
            ("assigned_to", &self.assigned_to),
            ("assigned_by", &self.assigned_by),
            ("asset_path", &self.asset_path),
            ("upload_path", &self.upload_path),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(CoreError::Validation(format!("missing field '{name}'")));
            }
        }
        Ok(())
    }
}
