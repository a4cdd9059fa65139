//! Persisted key-value storage
//!
//! The auth token and the sync watermark live here. Both the API client and
//! the notification worker only ever touch them through single get, set and
//! delete calls, so no read-modify-write protection is provided.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use redis::{AsyncCommands, Client};
use tokio::sync::RwLock;
use tracing::info;

use crate::error::{StorageError, StorageResult};

/// Key under which the bearer token is persisted
pub const AUTH_TOKEN_KEY: &str = "authToken";

/// Key under which the last successful sync time (epoch ms) is persisted
pub const LAST_SYNC_KEY: &str = "lastSync";

/// Key under which the worker leaves the last requested deep link
pub const PENDING_DEEP_LINK_KEY: &str = "pendingDeepLink";

/// Minimal async key-value store
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Get a value by key
    async fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Set a key-value pair
    async fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Delete a key. Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> StorageResult<()>;
}

#[async_trait]
impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value).await
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        (**self).delete(key).await
    }
}

/// Configuration for the Redis-backed store
#[derive(Debug, Clone, PartialEq)]
pub struct RedisConfig {
    /// Redis connection URL (e.g., "redis://localhost:6379")
    pub url: String,
    /// Prefix prepended to every key, so several devices can share one server
    pub namespace: String,
}

/// Redis-backed key-value store
#[derive(Clone)]
pub struct RedisStore {
    client: Client,
    namespace: String,
}

impl RedisStore {
    /// Open a Redis client. No connection is made until the first command.
    pub fn new(config: &RedisConfig) -> StorageResult<Self> {
        let client = Client::open(config.url.clone()).map_err(|e| {
            StorageError::Configuration(format!("Invalid Redis URL {}: {}", config.url, e))
        })?;
        info!("Redis client initialized with URL: {}", config.url);
        Ok(RedisStore {
            client,
            namespace: config.namespace.clone(),
        })
    }

    /// The underlying client, for pub/sub subscribers
    pub fn client(&self) -> &Client {
        &self.client
    }

    fn namespaced(&self, key: &str) -> String {
        format!("{}:{}", self.namespace, key)
    }

    async fn get_connection(&self) -> StorageResult<redis::aio::MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(StorageError::Connection)
    }

    /// Check if Redis is reachable
    pub async fn health_check(&self) -> StorageResult<bool> {
        let mut conn = self.get_connection().await?;
        let pong: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(StorageError::Command)?;
        Ok(pong == "PONG")
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let mut conn = self.get_connection().await?;
        let value: Option<String> = conn
            .get(self.namespaced(key))
            .await
            .map_err(StorageError::Command)?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut conn = self.get_connection().await?;
        let _: () = conn
            .set(self.namespaced(key), value)
            .await
            .map_err(StorageError::Command)?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        let mut conn = self.get_connection().await?;
        let _: u64 = conn
            .del(self.namespaced(key))
            .await
            .map_err(StorageError::Command)?;
        Ok(())
    }
}

/// In-process store, used by tests and by hosts without Redis
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}
