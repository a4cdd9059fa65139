use std::time::Duration;

use client::{ClientConfig, config::ENV_PREFIX};
use common::RedisConfig;
use config::{Config, Environment};

use crate::{
    error::{NotifierError, NotifierResult},
    sync::RetryPolicy,
};

/// Notifier host configuration
#[derive(Debug, Clone)]
pub struct NotifierConfig {
    pub api: ClientConfig,
    pub redis: RedisConfig,
    /// Channel carrying push message payloads
    pub push_channel: String,
    /// Channel carrying notification clicks, `{"tag": .., "action": ..}`
    pub click_channel: String,
    /// Cron schedule of the connectivity probe
    pub connectivity_schedule: String,
    pub retry: RetryPolicy,
}

impl NotifierConfig {
    /// Create a new NotifierConfig from environment variables
    ///
    /// # Environment Variables
    /// - `MEDTRACK_API_URL`: API base URL (required)
    /// - `MEDTRACK_REDIS_URL`: Redis URL (default: redis://localhost:6379)
    /// - `MEDTRACK_REDIS_NAMESPACE`: Key prefix (default: medtrack)
    /// - `MEDTRACK_PUSH_CHANNEL`: Push channel (default: medtrack:push)
    /// - `MEDTRACK_CLICK_CHANNEL`: Click channel (default: medtrack:click)
    /// - `MEDTRACK_CONNECTIVITY_SCHEDULE`: Probe schedule (default: every 30 seconds)
    /// - `MEDTRACK_SYNC_MAX_ATTEMPTS`: Sync attempts per event (default: 1)
    /// - `MEDTRACK_SYNC_RETRY_DELAY_SECS`: First backoff delay (default: 1)
    pub fn from_env() -> NotifierResult<Self> {
        Self::from_environment(Environment::with_prefix(ENV_PREFIX))
    }

    pub(crate) fn from_environment(environment: Environment) -> NotifierResult<Self> {
        let settings = Config::builder()
            .set_default("redis_url", "redis://localhost:6379")
            .and_then(|b| b.set_default("redis_namespace", "medtrack"))
            .and_then(|b| b.set_default("push_channel", "medtrack:push"))
            .and_then(|b| b.set_default("click_channel", "medtrack:click"))
            .and_then(|b| b.set_default("connectivity_schedule", "0/30 * * * * *"))
            .and_then(|b| b.set_default("sync_max_attempts", 1))
            .and_then(|b| b.set_default("sync_retry_delay_secs", 1))
            .and_then(|b| b.add_source(environment).build())
            .map_err(|e| NotifierError::Configuration(e.to_string()))?;

        let api_url = settings.get_string("api_url").map_err(|_| {
            NotifierError::Configuration(format!("{}_API_URL is not set", ENV_PREFIX))
        })?;
        let api = ClientConfig::new(&api_url)
            .map_err(|e| NotifierError::Configuration(e.to_string()))?;

        let string = |key: &str| {
            settings
                .get_string(key)
                .map_err(|e| NotifierError::Configuration(format!("{}: {}", key, e)))
        };
        let integer = |key: &str| {
            settings
                .get_int(key)
                .ok()
                .and_then(|value| u32::try_from(value).ok())
                .ok_or_else(|| {
                    NotifierError::Configuration(format!("{} must be a non-negative integer", key))
                })
        };

        let max_attempts = integer("sync_max_attempts")?;
        if max_attempts == 0 {
            return Err(NotifierError::Configuration(
                "sync_max_attempts must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            api,
            redis: RedisConfig {
                url: string("redis_url")?,
                namespace: string("redis_namespace")?,
            },
            push_channel: string("push_channel")?,
            click_channel: string("click_channel")?,
            connectivity_schedule: string("connectivity_schedule")?,
            retry: RetryPolicy {
                max_attempts,
                base_delay: Duration::from_secs(u64::from(integer("sync_retry_delay_secs")?)),
            },
        })
    }
}
