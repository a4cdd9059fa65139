//! Background reminder sync
//!
//! Raised by the host under [`SYNC_TAG`] when connectivity comes back. The
//! trigger posts the persisted watermark to the backend and advances it
//! after a successful answer.

use std::time::Duration;

use client::ClientConfig;
use common::{
    Endpoint, KeyValueStore, StorageError, models::SyncRequest, models::SyncResponse,
    now_millis, storage::LAST_SYNC_KEY,
};
use tokio::time::sleep;
use tracing::{error, info, warn};

use crate::error::{NotifierError, NotifierResult};

/// Tag of the sync event that fetches reminders
pub const SYNC_TAG: &str = "sync-reminders";

/// How often a failed sync is attempted before giving up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    /// Delay after the first failure, doubled after each further one
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 1,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Delay to wait after the given failed attempt (1-based)
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.base_delay
            .saturating_mul(2u32.saturating_pow(attempt.saturating_sub(1)))
    }
}

/// Posts the sync watermark and records successful syncs
#[derive(Debug, Clone)]
pub struct SyncTrigger<S> {
    http: reqwest::Client,
    url: String,
    store: S,
    retry: RetryPolicy,
}

impl<S: KeyValueStore> SyncTrigger<S> {
    pub fn new(config: &ClientConfig, store: S, retry: RetryPolicy) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: config.url(&Endpoint::SyncReminders.path()),
            store,
            retry,
        }
    }

    /// Last successful sync in epoch milliseconds, 0 if none
    pub async fn watermark(&self) -> NotifierResult<i64> {
        let Some(raw) = self.store.get(LAST_SYNC_KEY).await? else {
            return Ok(0);
        };
        raw.trim().parse::<i64>().map_err(|e| {
            StorageError::Corrupt {
                key: LAST_SYNC_KEY.to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Fetch reminders changed since the last sync
    ///
    /// Never fails: errors are logged and `None` is returned, leaving the
    /// watermark untouched.
    pub async fn sync_reminders(&self) -> Option<SyncResponse> {
        let last_sync = match self.watermark().await {
            Ok(last_sync) => last_sync,
            Err(e) => {
                warn!("Unreadable sync watermark, syncing from scratch: {}", e);
                0
            }
        };

        let mut attempt = 0;
        let response = loop {
            attempt += 1;
            match self.post(last_sync).await {
                Ok(response) => break response,
                Err(e) => {
                    error!(
                        "Reminder sync failed (attempt {}/{}): {}",
                        attempt, self.retry.max_attempts, e
                    );
                    if attempt >= self.retry.max_attempts {
                        return None;
                    }
                    sleep(self.retry.delay_after(attempt)).await;
                }
            }
        };

        if let Err(e) = self.advance_watermark(last_sync).await {
            error!("Failed to persist sync watermark: {}", e);
        }
        info!(
            "Synced {} reminders since {}",
            response.reminders.len(),
            last_sync
        );
        Some(response)
    }

    async fn post(&self, last_sync: i64) -> NotifierResult<SyncResponse> {
        let response = self
            .http
            .post(&self.url)
            .json(&SyncRequest { last_sync })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifierError::HttpStatus(status.as_u16()));
        }
        Ok(response.json::<SyncResponse>().await?)
    }

    /// Store the sync time, never moving the watermark backwards
    async fn advance_watermark(&self, previous: i64) -> NotifierResult<()> {
        let stored = self.watermark().await.unwrap_or(previous);
        let next = now_millis().max(stored).max(previous);
        self.store.set(LAST_SYNC_KEY, &next.to_string()).await?;
        Ok(())
    }
}
