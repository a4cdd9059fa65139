//! The platform side of the worker: notification display and navigation

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::{DeepLink, KeyValueStore, storage::PENDING_DEEP_LINK_KEY};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::{error::NotifierResult, notification::Notification};

/// Operations the worker performs on its host
#[async_trait]
pub trait NotificationHost: Send + Sync {
    /// Activate a newly installed worker without waiting for old clients
    async fn skip_waiting(&self) -> NotifierResult<()>;

    /// Take control of already open application clients
    async fn claim_clients(&self) -> NotifierResult<()>;

    /// Display a notification, replacing any displayed one with the same tag
    async fn show_notification(&self, notification: &Notification) -> NotifierResult<()>;

    /// Dismiss the notification with the given tag
    async fn close_notification(&self, tag: &str) -> NotifierResult<()>;

    /// Open or focus the application at a deep link
    async fn open_window(&self, link: &DeepLink) -> NotifierResult<()>;
}

#[async_trait]
impl<T: NotificationHost + ?Sized> NotificationHost for Arc<T> {
    async fn skip_waiting(&self) -> NotifierResult<()> {
        (**self).skip_waiting().await
    }

    async fn claim_clients(&self) -> NotifierResult<()> {
        (**self).claim_clients().await
    }

    async fn show_notification(&self, notification: &Notification) -> NotifierResult<()> {
        (**self).show_notification(notification).await
    }

    async fn close_notification(&self, tag: &str) -> NotifierResult<()> {
        (**self).close_notification(tag).await
    }

    async fn open_window(&self, link: &DeepLink) -> NotifierResult<()> {
        (**self).open_window(link).await
    }
}

/// Default number of notifications tracked by [`StoreHost`]
pub const DEFAULT_DISPLAY_LIMIT: usize = 100;

/// Host backed by the key-value store
///
/// Displayed notifications are kept in memory by tag so click messages can
/// be resolved. At most `limit` are tracked; past that the one with the
/// oldest timestamp is dropped. Navigation requests are left in the store
/// under [`PENDING_DEEP_LINK_KEY`] for the application to pick up.
#[derive(Clone)]
pub struct StoreHost<S> {
    store: S,
    displayed: Arc<RwLock<HashMap<String, Notification>>>,
    limit: usize,
}

impl<S: KeyValueStore> StoreHost<S> {
    pub fn new(store: S) -> Self {
        Self::with_limit(store, DEFAULT_DISPLAY_LIMIT)
    }

    /// Track at most `limit` displayed notifications (at least one)
    pub fn with_limit(store: S, limit: usize) -> Self {
        Self {
            store,
            displayed: Arc::new(RwLock::new(HashMap::new())),
            limit: limit.max(1),
        }
    }

    /// The notification currently displayed under a tag
    pub async fn displayed(&self, tag: &str) -> Option<Notification> {
        self.displayed.read().await.get(tag).cloned()
    }

    /// Number of displayed notifications
    pub async fn displayed_count(&self) -> usize {
        self.displayed.read().await.len()
    }
}

#[async_trait]
impl<S: KeyValueStore> NotificationHost for StoreHost<S> {
    async fn skip_waiting(&self) -> NotifierResult<()> {
        info!("Worker installed, activating immediately");
        Ok(())
    }

    async fn claim_clients(&self) -> NotifierResult<()> {
        info!("Worker activated, controlling open clients");
        Ok(())
    }

    async fn show_notification(&self, notification: &Notification) -> NotifierResult<()> {
        let mut displayed = self.displayed.write().await;
        let replaced = displayed.insert(notification.tag.clone(), notification.clone());
        if replaced.is_some() {
            debug!("Replacing notification with tag {}", notification.tag);
        }

        while displayed.len() > self.limit {
            let Some(oldest) = displayed
                .iter()
                .filter(|(tag, _)| **tag != notification.tag)
                .min_by_key(|(_, shown)| shown.timestamp)
                .map(|(tag, _)| tag.clone())
            else {
                break;
            };
            displayed.remove(&oldest);
            debug!("Forgetting notification {}", oldest);
        }
        drop(displayed);

        info!("Showing notification {}: {}", notification.tag, notification.title);
        Ok(())
    }

    async fn close_notification(&self, tag: &str) -> NotifierResult<()> {
        self.displayed.write().await.remove(tag);
        debug!("Closed notification {}", tag);
        Ok(())
    }

    async fn open_window(&self, link: &DeepLink) -> NotifierResult<()> {
        let link = link.to_string();
        self.store.set(PENDING_DEEP_LINK_KEY, &link).await?;
        info!("Opening {}", link);
        Ok(())
    }
}
