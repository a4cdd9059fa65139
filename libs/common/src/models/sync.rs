//! Background sync payloads

use serde::{Deserialize, Serialize};

use super::Reminder;

/// Body of a sync request: the watermark of the last successful sync
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncRequest {
    /// Epoch milliseconds, 0 if never synced
    pub last_sync: i64,
}

/// Reminders changed since the requested watermark
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncResponse {
    #[serde(default)]
    pub reminders: Vec<Reminder>,
    /// Server time of this sync, epoch milliseconds
    pub synced_at: i64,
}
