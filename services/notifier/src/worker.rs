//! The notification worker task
//!
//! The worker runs on its own tokio task and shares nothing with the code
//! that feeds it: events come in over a channel, effects go out through the
//! [`NotificationHost`] and the key-value store. Events are handled one at a
//! time, and each event's permit is released only after its handler,
//! including any display or network work, has completed.

use common::{KeyValueStore, now_millis};
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{debug, error, info};

use crate::{
    error::{NotifierError, NotifierResult},
    event::{Completion, LifecyclePermit, WorkerEvent},
    host::NotificationHost,
    notification::{build_notification, click_target, parse_push_payload, Notification},
    sync::{SYNC_TAG, SyncTrigger},
};

const CHANNEL_CAPACITY: usize = 64;

struct Envelope {
    event: WorkerEvent,
    permit: LifecyclePermit,
}

/// Sends events to a running worker
#[derive(Clone)]
pub struct WorkerHandle {
    tx: mpsc::Sender<Envelope>,
}

impl WorkerHandle {
    /// Queue an event; the returned [`Completion`] resolves once it is handled
    pub async fn dispatch(&self, event: WorkerEvent) -> NotifierResult<Completion> {
        let (permit, completion) = LifecyclePermit::pair();
        self.tx
            .send(Envelope { event, permit })
            .await
            .map_err(|_| NotifierError::WorkerStopped)?;
        Ok(completion)
    }

    /// Queue an event and wait until it is handled
    pub async fn dispatch_and_wait(&self, event: WorkerEvent) -> NotifierResult<()> {
        self.dispatch(event).await?.wait().await
    }
}

/// Handles push, click, lifecycle and sync events
pub struct NotificationWorker<H, S> {
    host: H,
    sync: SyncTrigger<S>,
}

impl<H, S> NotificationWorker<H, S>
where
    H: NotificationHost + 'static,
    S: KeyValueStore + 'static,
{
    pub fn new(host: H, sync: SyncTrigger<S>) -> Self {
        Self { host, sync }
    }

    /// Start the worker task
    ///
    /// The task ends once every [`WorkerHandle`] is dropped.
    pub fn spawn(self) -> (WorkerHandle, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let task = tokio::spawn(self.run(rx));
        (WorkerHandle { tx }, task)
    }

    async fn run(self, mut rx: mpsc::Receiver<Envelope>) {
        info!("Notification worker started");
        while let Some(Envelope { event, permit }) = rx.recv().await {
            debug!("Handling {} event", event.name());
            self.handle(event).await;
            permit.release();
        }
        info!("Notification worker stopped");
    }

    /// Handle one event. Failures are logged, never returned.
    pub async fn handle(&self, event: WorkerEvent) {
        let name = event.name();
        let result = match event {
            WorkerEvent::Install => self.host.skip_waiting().await,
            WorkerEvent::Activate => self.host.claim_clients().await,
            WorkerEvent::Push { data } => self.on_push(data.as_deref()).await,
            WorkerEvent::NotificationClick {
                notification,
                action,
            } => self.on_click(&notification, action.as_deref()).await,
            WorkerEvent::Sync { tag } => {
                self.on_sync(&tag).await;
                Ok(())
            }
        };

        if let Err(e) = result {
            error!("Failed to handle {} event: {}", name, e);
        }
    }

    async fn on_push(&self, data: Option<&[u8]>) -> NotifierResult<()> {
        let notification = build_notification(parse_push_payload(data), now_millis());
        self.host.show_notification(&notification).await
    }

    async fn on_click(&self, notification: &Notification, action: Option<&str>) -> NotifierResult<()> {
        if let Err(e) = self.host.close_notification(&notification.tag).await {
            error!("Failed to close notification {}: {}", notification.tag, e);
        }
        let link = click_target(notification, action);
        self.host.open_window(&link).await
    }

    async fn on_sync(&self, tag: &str) {
        if tag != SYNC_TAG {
            debug!("Ignoring sync event with tag {}", tag);
            return;
        }
        if let Some(response) = self.sync.sync_reminders().await {
            debug!("Sync completed at {}", response.synced_at);
        }
    }
}
