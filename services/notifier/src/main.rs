use std::sync::Arc;

use anyhow::Result;
use common::RedisStore;
use tokio_cron_scheduler::JobScheduler;
use tracing::{Level, error, info};
use tracing_subscriber::EnvFilter;

use notifier::{
    ConnectivityMonitor, NotificationWorker, NotifierConfig, PushListener, StoreHost,
    SyncTrigger, WorkerEvent,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_max_level(Level::INFO)
        .init();

    info!("Starting notification worker");

    let config = NotifierConfig::from_env()?;
    info!("API base URL: {}", config.api.base_url());

    let store = Arc::new(RedisStore::new(&config.redis)?);
    store.health_check().await?;

    let host = Arc::new(StoreHost::new(store.clone()));
    let sync = SyncTrigger::new(&config.api, store.clone(), config.retry);
    let (worker, task) = NotificationWorker::new(host.clone(), sync).spawn();

    worker.dispatch_and_wait(WorkerEvent::Install).await?;
    worker.dispatch_and_wait(WorkerEvent::Activate).await?;

    // Probe connectivity; the first successful probe triggers a sync
    let mut scheduler = JobScheduler::new().await?;
    let monitor = ConnectivityMonitor::new(&config.api, worker.clone());
    monitor
        .schedule(&scheduler, &config.connectivity_schedule)
        .await?;
    scheduler.start().await?;

    let listener = PushListener::new(
        store.client().clone(),
        config.push_channel.clone(),
        config.click_channel.clone(),
        host,
        worker,
    );

    info!("Notification worker started successfully");

    tokio::select! {
        result = listener.run() => {
            if let Err(e) = result {
                error!("Push listener stopped: {}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutting down notification worker");
        }
    }

    scheduler.shutdown().await?;
    task.abort();

    Ok(())
}
