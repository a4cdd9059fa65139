//! Client configuration
//!
//! The API base URL has no default: a build or deployment that forgets to
//! set it must fail at startup, not talk to some fallback host.

use config::{Config, Environment};
use reqwest::Url;

use crate::error::{ClientError, ClientResult};

/// Prefix of every environment variable read by the client
pub const ENV_PREFIX: &str = "MEDTRACK";

/// Client configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Absolute base URL, without trailing slash
    base_url: String,
}

impl ClientConfig {
    /// Validate an explicit base URL
    pub fn new(base_url: &str) -> ClientResult<Self> {
        let trimmed = base_url.trim();
        if trimmed.is_empty() {
            return Err(ClientError::Configuration(
                "API base URL is not configured".to_string(),
            ));
        }

        let url = Url::parse(trimmed).map_err(|e| {
            ClientError::Configuration(format!("Invalid API base URL {}: {}", trimmed, e))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ClientError::Configuration(format!(
                "API base URL must be http or https: {}",
                trimmed
            )));
        }

        Ok(Self {
            base_url: trimmed.trim_end_matches('/').to_string(),
        })
    }

    /// Create a new ClientConfig from environment variables
    ///
    /// # Environment Variables
    /// - `MEDTRACK_API_URL`: API base URL (required)
    pub fn from_env() -> ClientResult<Self> {
        Self::from_environment(Environment::with_prefix(ENV_PREFIX))
    }

    pub(crate) fn from_environment(environment: Environment) -> ClientResult<Self> {
        let settings = Config::builder()
            .add_source(environment)
            .build()
            .map_err(|e| ClientError::Configuration(e.to_string()))?;

        let base_url = settings.get_string("api_url").map_err(|_| {
            ClientError::Configuration(format!("{}_API_URL is not set", ENV_PREFIX))
        })?;

        Self::new(&base_url)
    }

    /// The configured base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL of an endpoint path
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
