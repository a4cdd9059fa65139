//! Authenticated API client for the MedTrack backend
//!
//! ```rust,no_run
//! use client::ApiClient;
//! use common::{MemoryStore, models::LoginRequest};
//!
//! # async fn run() -> Result<(), client::ClientError> {
//! let client = ApiClient::from_env(MemoryStore::new())?;
//! client
//!     .login(&LoginRequest {
//!         email: "a@b.com".to_string(),
//!         password: "x".to_string(),
//!     })
//!     .await?;
//! let medications = client.get_medications().await?;
//! println!("{} medications", medications.len());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;
mod resources;
pub mod token;

pub use api::{ApiClient, RequestOptions};
pub use self::config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use token::TokenStore;
