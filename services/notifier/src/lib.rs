//! Notification delivery worker and background sync trigger
//!
//! A [`NotificationWorker`] runs on its own task. Hosts feed it
//! [`WorkerEvent`]s through a [`WorkerHandle`] and wait on the returned
//! completion; the worker shows notifications, turns clicks into deep links
//! and runs the reminder sync.

pub mod config;
pub mod connectivity;
pub mod error;
pub mod event;
pub mod host;
pub mod notification;
pub mod push;
pub mod sync;
pub mod worker;

pub use self::config::NotifierConfig;
pub use connectivity::ConnectivityMonitor;
pub use error::{NotifierError, NotifierResult};
pub use event::{Completion, WorkerEvent};
pub use host::{NotificationHost, StoreHost};
pub use notification::{Notification, NotificationAction, PushPayload, build_notification};
pub use push::PushListener;
pub use sync::{RetryPolicy, SYNC_TAG, SyncTrigger};
pub use worker::{NotificationWorker, WorkerHandle};
