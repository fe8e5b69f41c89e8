use kiln_core::entities::ActivityLogEntry;
use kiln_core::enums::ActivityStatus;
use serde::Serialize;

/// Dashboard view model: the full log plus its two review buckets.
///
/// Failed uploads appear only in `activity_log`.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct DashboardView {
    pub activity_log: Vec<ActivityLogEntry>,
    pub attention_required: Vec<ActivityLogEntry>,
    pub completed: Vec<ActivityLogEntry>,
}

impl DashboardView {
    /// Partition entries by status, keeping the input order in every list.
    #[must_use]
    pub fn from_log(entries: Vec<ActivityLogEntry>) -> Self {
        let pick = |status: ActivityStatus| -> Vec<ActivityLogEntry> {
            entries
                .iter()
                .filter(|e| e.status == status)
                .cloned()
                .collect()
        };
        let attention_required = pick(ActivityStatus::ActionNeeded);
        let completed = pick(ActivityStatus::Approved);
        Self {
            activity_log: entries,
            attention_required,
            completed,
        }
    }
}
