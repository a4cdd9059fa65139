//! Authenticated request primitive

use common::{Endpoint, KeyValueStore};
use reqwest::Method;
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::{
    config::ClientConfig,
    error::{ClientError, ClientResult},
    token::TokenStore,
};

/// Per-request options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestOptions {
    /// Attach the persisted bearer token, when there is one
    pub authenticated: bool,
}

impl RequestOptions {
    /// Never send a token, even if one is stored
    pub const ANONYMOUS: Self = Self {
        authenticated: false,
    };
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            authenticated: true,
        }
    }
}

/// HTTP client for the MedTrack REST API
///
/// The bearer token lives in the key-value store, not in the client, so a
/// token saved or cleared by another client sharing the store is picked up
/// on the next request.
#[derive(Debug, Clone)]
pub struct ApiClient<S> {
    http: reqwest::Client,
    config: ClientConfig,
    pub(crate) tokens: TokenStore<S>,
}

impl<S: KeyValueStore> ApiClient<S> {
    /// Create a client for an already validated configuration
    pub fn new(config: ClientConfig, store: S) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            tokens: TokenStore::new(store),
        }
    }

    /// Create a client from `MEDTRACK_API_URL`
    ///
    /// Fails before any network access when the base URL is missing.
    pub fn from_env(store: S) -> ClientResult<Self> {
        Ok(Self::new(ClientConfig::from_env()?, store))
    }

    /// The client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Whether a token is currently stored
    pub async fn is_authenticated(&self) -> ClientResult<bool> {
        Ok(self.tokens.get().await?.is_some())
    }

    /// Send a request and decode its JSON response
    ///
    /// Non-2xx responses become [`ClientError::Http`]. An empty 2xx body is
    /// decoded as JSON `null`.
    pub async fn request<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        options: RequestOptions,
    ) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.config.url(path);
        let mut request = self.http.request(method.clone(), &url);

        if options.authenticated {
            if let Some(token) = self.tokens.get().await? {
                request = request.bearer_auth(token);
            }
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        debug!("{} {}", method, url);
        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let error = ClientError::from_response(status, &bytes);
            warn!("{} {} failed: {}", method, url, error);
            return Err(error);
        }

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(serde_json::from_slice(b"null")?);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Authenticated request without a body
    pub(crate) async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: Endpoint,
    ) -> ClientResult<T> {
        self.request::<(), T>(method, &endpoint.path(), None, RequestOptions::default())
            .await
    }

    /// Authenticated request with a JSON body
    pub(crate) async fn call_with<B, T>(
        &self,
        method: Method,
        endpoint: Endpoint,
        body: &B,
    ) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(method, &endpoint.path(), Some(body), RequestOptions::default())
            .await
    }
}
