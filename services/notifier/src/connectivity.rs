//! Connectivity probe that raises the reminder sync
//!
//! The probe runs on a cron schedule and calls the backend health endpoint.
//! When a probe succeeds after the previous one failed (or on the first
//! success after startup) a [`SYNC_TAG`] sync event is dispatched.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use client::ClientConfig;
use common::Endpoint;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{debug, error, info, warn};

use crate::{
    error::NotifierResult,
    event::WorkerEvent,
    sync::SYNC_TAG,
    worker::WorkerHandle,
};

/// Tracks whether the backend is reachable
#[derive(Clone)]
pub struct ConnectivityMonitor {
    http: reqwest::Client,
    health_url: String,
    online: Arc<AtomicBool>,
    worker: WorkerHandle,
}

impl ConnectivityMonitor {
    pub fn new(config: &ClientConfig, worker: WorkerHandle) -> Self {
        Self {
            http: reqwest::Client::new(),
            health_url: config.url(&Endpoint::Health.path()),
            online: Arc::new(AtomicBool::new(false)),
            worker,
        }
    }

    /// Last known connectivity state
    pub fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }

    async fn probe(&self) -> bool {
        match self.http.get(&self.health_url).send().await {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                debug!("Health probe answered {}", response.status());
                false
            }
            Err(e) => {
                debug!("Health probe failed: {}", e);
                false
            }
        }
    }

    /// Probe once; returns whether connectivity was just restored
    ///
    /// On restoration the sync event is dispatched and awaited.
    pub async fn check(&self) -> NotifierResult<bool> {
        let online = self.probe().await;
        let was_online = self.online.swap(online, Ordering::SeqCst);

        if online == was_online {
            return Ok(false);
        }
        if !online {
            warn!("Backend unreachable at {}", self.health_url);
            return Ok(false);
        }

        info!("Connectivity restored, requesting {}", SYNC_TAG);
        self.worker
            .dispatch_and_wait(WorkerEvent::Sync {
                tag: SYNC_TAG.to_string(),
            })
            .await?;
        Ok(true)
    }

    /// Run [`check`](Self::check) on a cron schedule
    pub async fn schedule(&self, scheduler: &JobScheduler, schedule: &str) -> NotifierResult<()> {
        let monitor = self.clone();

        let job = Job::new_async(schedule, move |_, _| {
            let monitor = monitor.clone();
            Box::pin(async move {
                if let Err(e) = monitor.check().await {
                    error!("Connectivity check failed: {}", e);
                }
            })
        })?;

        scheduler.add(job).await?;
        info!("Scheduled connectivity probe with schedule: {}", schedule);
        Ok(())
    }
}
