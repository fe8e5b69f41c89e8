//! Narrow write interface used by the upload pipeline.

use async_trait::async_trait;
use kiln_core::entities::{ActivityLogEntry, NewActivity};

use crate::error::DatabaseError;
use crate::service::KilnDb;

/// Somewhere to append activity rows.
#[async_trait]
pub trait ActivityStore: Send + Sync {
    async fn record_activity(
        &self,
        activity: &NewActivity,
    ) -> Result<ActivityLogEntry, DatabaseError>;
}

#[async_trait]
impl ActivityStore for KilnDb {
    async fn record_activity(
        &self,
        activity: &NewActivity,
    ) -> Result<ActivityLogEntry, DatabaseError> {
        Self::record_activity(self, activity).await
    }
}
