//! Common library for the MedTrack application
//!
//! This crate provides what the backend, the API client and the
//! notification worker share: canonical request and response shapes, the
//! endpoint registry, deep-link routes, and the persisted key-value store.

pub mod deep_link;
pub mod endpoints;
pub mod error;
pub mod models;
pub mod storage;

pub use deep_link::DeepLink;
pub use endpoints::Endpoint;
pub use error::{StorageError, StorageResult};
pub use storage::{KeyValueStore, MemoryStore, RedisConfig, RedisStore};

/// Current time in epoch milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
