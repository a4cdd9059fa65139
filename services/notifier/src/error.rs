//! Error type for the notification worker

use common::StorageError;
use thiserror::Error;
use tokio_cron_scheduler::JobSchedulerError;

/// Errors surfaced by the notifier
///
/// Event handlers never return these to the host; they are logged inside
/// the worker. They reach callers only from setup code and from the
/// dispatch channel.
#[derive(Error, Debug)]
pub enum NotifierError {
    /// Required configuration is missing or invalid
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The host platform refused an operation
    #[error("Host error: {0}")]
    Host(String),

    /// The sync endpoint answered with a non-2xx status
    #[error("HTTP error, status={0}")]
    HttpStatus(u16),

    /// The request could not be sent or the response could not be read
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Pub/sub error: {0}")]
    PubSub(#[from] redis::RedisError),

    #[error("Scheduler error: {0}")]
    Scheduler(#[from] JobSchedulerError),

    /// The worker task is gone
    #[error("Notification worker stopped")]
    WorkerStopped,
}

/// Type alias for notifier results
pub type NotifierResult<T> = Result<T, NotifierError>;
