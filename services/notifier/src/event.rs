//! Events delivered to the notification worker

use tokio::sync::oneshot;

use crate::{
    error::{NotifierError, NotifierResult},
    notification::Notification,
};

/// Lifecycle, push, click and sync events raised by the host
#[derive(Debug, Clone, PartialEq)]
pub enum WorkerEvent {
    /// A new worker version was installed
    Install,
    /// The worker became the active one
    Activate,
    /// A push message arrived, possibly without data
    Push { data: Option<Vec<u8>> },
    /// The user clicked a displayed notification or one of its buttons
    NotificationClick {
        notification: Notification,
        action: Option<String>,
    },
    /// The host asks for a background sync
    Sync { tag: String },
}

impl WorkerEvent {
    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            WorkerEvent::Install => "install",
            WorkerEvent::Activate => "activate",
            WorkerEvent::Push { .. } => "push",
            WorkerEvent::NotificationClick { .. } => "notificationclick",
            WorkerEvent::Sync { .. } => "sync",
        }
    }
}

/// Keeps the host waiting until the worker has finished with an event
#[derive(Debug)]
pub struct LifecyclePermit(oneshot::Sender<()>);

impl LifecyclePermit {
    /// Create a permit and the completion it releases
    pub fn pair() -> (Self, Completion) {
        let (tx, rx) = oneshot::channel();
        (Self(tx), Completion(rx))
    }

    /// Signal that all work for the event is done
    pub fn release(self) {
        // The host may have stopped waiting.
        let _ = self.0.send(());
    }
}

/// Resolves once the worker releases the event's permit
#[derive(Debug)]
pub struct Completion(oneshot::Receiver<()>);

impl Completion {
    /// Wait for the event to be fully handled
    ///
    /// Fails only if the worker went away without handling the event.
    pub async fn wait(self) -> NotifierResult<()> {
        self.0.await.map_err(|_| NotifierError::WorkerStopped)
    }
}
