//! Configuration for the API service

use anyhow::Result;

use crate::jwt::JwtConfig;

/// API service configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Address the HTTP server binds to
    pub bind_addr: String,
    /// Token signing configuration
    pub jwt: JwtConfig,
}

impl ApiConfig {
    /// Create a new ApiConfig from environment variables
    ///
    /// # Environment Variables
    /// - `API_BIND_ADDR`: Listen address (default: "0.0.0.0:3001")
    /// - see [`JwtConfig::from_env`]
    pub fn from_env() -> Result<Self> {
        let bind_addr = std::env::var("API_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3001".to_string());
        let jwt = JwtConfig::from_env()?;

        Ok(ApiConfig { bind_addr, jwt })
    }
}
