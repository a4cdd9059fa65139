//! Redis pub/sub front end of the notifier host
//!
//! Push messages arrive on the push channel as raw payloads. Clicks arrive on
//! the click channel as `{"tag": "...", "action": "..."}` and refer to a
//! notification that is currently displayed.

use std::sync::Arc;

use common::KeyValueStore;
use futures_util::StreamExt;
use serde::Deserialize;
use tracing::{debug, error, info, warn};

use crate::{
    error::NotifierResult,
    event::{Completion, WorkerEvent},
    host::StoreHost,
    worker::WorkerHandle,
};

/// A notification interaction reported by the platform
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClickMessage {
    pub tag: String,
    #[serde(default)]
    pub action: Option<String>,
}

/// Subscribes to the push and click channels and feeds the worker
pub struct PushListener<S> {
    client: redis::Client,
    push_channel: String,
    click_channel: String,
    host: Arc<StoreHost<S>>,
    worker: WorkerHandle,
}

impl<S: KeyValueStore> PushListener<S> {
    pub fn new(
        client: redis::Client,
        push_channel: String,
        click_channel: String,
        host: Arc<StoreHost<S>>,
        worker: WorkerHandle,
    ) -> Self {
        Self {
            client,
            push_channel,
            click_channel,
            host,
            worker,
        }
    }

    /// Receive messages until the subscription ends
    pub async fn run(&self) -> NotifierResult<()> {
        let mut pubsub = self.client.get_async_pubsub().await?;
        pubsub.subscribe(&self.push_channel).await?;
        pubsub.subscribe(&self.click_channel).await?;
        info!(
            "Listening for pushes on {} and clicks on {}",
            self.push_channel, self.click_channel
        );

        let mut messages = pubsub.on_message();
        while let Some(message) = messages.next().await {
            let channel = message.get_channel_name().to_string();
            match self.route(&channel, message.get_payload_bytes()).await {
                Ok(Some(completion)) => {
                    if let Err(e) = completion.wait().await {
                        error!("Event from {} was not handled: {}", channel, e);
                    }
                }
                Ok(None) => {}
                Err(e) => error!("Failed to dispatch message from {}: {}", channel, e),
            }
        }

        warn!("Pub/sub subscription closed");
        Ok(())
    }

    /// Turn a channel message into a worker event and dispatch it
    ///
    /// Returns `None` when the message is ignored.
    pub async fn route(&self, channel: &str, payload: &[u8]) -> NotifierResult<Option<Completion>> {
        if channel == self.push_channel {
            let data = (!payload.is_empty()).then(|| payload.to_vec());
            return self
                .worker
                .dispatch(WorkerEvent::Push { data })
                .await
                .map(Some);
        }

        if channel == self.click_channel {
            let click = match serde_json::from_slice::<ClickMessage>(payload) {
                Ok(click) => click,
                Err(e) => {
                    warn!("Ignoring malformed click message: {}", e);
                    return Ok(None);
                }
            };
            let Some(notification) = self.host.displayed(&click.tag).await else {
                warn!("Click on unknown notification {}", click.tag);
                return Ok(None);
            };
            return self
                .worker
                .dispatch(WorkerEvent::NotificationClick {
                    notification,
                    action: click.action,
                })
                .await
                .map(Some);
        }

        debug!("Ignoring message on channel {}", channel);
        Ok(None)
    }
}
