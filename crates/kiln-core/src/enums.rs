//! Status and action enums for kiln.
//!
//! `ActivityStatus` serializes to the exact strings stored in the
//! `activity_log.status` column. Its state machine is exposed through
//! `allowed_next_states()` so the application layer can reject reversals.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// ActivityStatus
// ---------------------------------------------------------------------------

/// Review status of an activity log entry.
///
/// ```text
/// Action Needed → Approved
/// failure          (terminal, written when an upload exhausts its retries)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityStatus {
    #[serde(rename = "Action Needed")]
    ActionNeeded,
    #[serde(rename = "Approved")]
    Approved,
    #[serde(rename = "failure")]
    Failure,
}

impl ActivityStatus {
    /// Return the string representation stored in the backend.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ActionNeeded => "Action Needed",
            Self::Approved => "Approved",
            Self::Failure => "failure",
        }
    }

    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::ActionNeeded => &[Self::Approved],
            Self::Approved | Self::Failure => &[],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        self.allowed_next_states().is_empty()
    }
}

impl fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ActionType
// ---------------------------------------------------------------------------

/// Kind of event recorded in the activity log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    Upload,
    UploadFolder,
    Approve,
}

impl ActionType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Upload => "upload",
            Self::UploadFolder => "upload_folder",
            Self::Approve => "approve",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_needed_only_moves_to_approved() {
        let status = ActivityStatus::ActionNeeded;
        assert!(status.can_transition_to(ActivityStatus::Approved));
        assert!(!status.can_transition_to(ActivityStatus::Failure));
        assert!(!status.can_transition_to(ActivityStatus::ActionNeeded));
    }

    #[test]
    fn approved_and_failure_are_terminal() {
        assert!(ActivityStatus::Approved.is_terminal());
        assert!(ActivityStatus::Failure.is_terminal());
        assert!(!ActivityStatus::Approved.can_transition_to(ActivityStatus::ActionNeeded));
        assert!(!ActivityStatus::ActionNeeded.is_terminal());
    }

    #[test]
    fn status_serializes_to_backend_strings() {
        assert_eq!(
            serde_json::to_string(&ActivityStatus::ActionNeeded).unwrap(),
            "\"Action Needed\""
        );
        assert_eq!(
            serde_json::to_string(&ActivityStatus::Failure).unwrap(),
            "\"failure\""
        );
        let parsed: ActivityStatus = serde_json::from_str("\"Approved\"").unwrap();
        assert_eq!(parsed, ActivityStatus::Approved);
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(ActivityStatus::ActionNeeded.to_string(), "Action Needed");
        assert_eq!(ActionType::UploadFolder.to_string(), "upload_folder");
    }
}
