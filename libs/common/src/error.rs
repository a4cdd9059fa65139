//! Custom error types for the common library
//!
//! This module defines the errors raised by the persisted key-value store
//! shared by the API client and the notification worker.

use redis::RedisError;
use thiserror::Error;

/// Custom error type for key-value store operations
#[derive(Error, Debug)]
pub enum StorageError {
    /// Error occurred while connecting to the store
    #[error("Storage connection error: {0}")]
    Connection(#[source] RedisError),

    /// Error occurred while executing a store command
    #[error("Storage command error: {0}")]
    Command(#[source] RedisError),

    /// A stored value could not be decoded
    #[error("Corrupt value for key {key}: {reason}")]
    Corrupt { key: String, reason: String },

    /// Configuration error
    #[error("Storage configuration error: {0}")]
    Configuration(String),
}

/// Type alias for Result with StorageError
pub type StorageResult<T> = Result<T, StorageError>;
