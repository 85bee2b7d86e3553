//! HTTP client for OpenCode Server API.

mod builder;

use crate::request::ApiRequest;
use crate::transport::Transport;
use crate::union::{DecodeMode, Decoder, UnionRegistry};
use crate::Error;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

pub use builder::ClientBuilder;

/// Base URL used by [`Client::from_env`] when `OPENCODE_BASE_URL` is unset.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:4096";

/// Environment variable read by [`Client::from_env`].
pub const BASE_URL_ENV: &str = "OPENCODE_BASE_URL";

/// OpenCode Server API client.
///
/// Provides type-safe access to the OpenCode Server endpoints. Cloning is cheap:
/// the transport and the union registry are shared.
#[derive(Debug, Clone)]
pub struct Client {
    pub(crate) base_url: String,
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) registry: Arc<UnionRegistry>,
    pub(crate) mode: DecodeMode,
}

impl Client {
    /// Creates a new client for the given base URL.
    ///
    /// Panics if the underlying reqwest client fails to build (e.g. TLS init).
    /// For fallible construction use [`Client::builder`](Self::builder)(base_url).try_build().
    ///
    /// # Example
    ///
    /// ```
    /// use opencode_sdk::Client;
    ///
    /// let client = Client::new("http://127.0.0.1:4096");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::builder(base_url).build()
    }

    /// Returns a builder for configuring the client.
    pub fn builder(base_url: impl Into<String>) -> ClientBuilder {
        ClientBuilder {
            base_url: base_url.into(),
            timeout: Some(Duration::from_secs(30)),
            pool_max_idle_per_host: None,
            pool_idle_timeout: None,
            strict_unions: false,
            registry: None,
            transport: None,
        }
    }

    /// Creates a client for `OPENCODE_BASE_URL`, or [`DEFAULT_BASE_URL`] when unset.
    pub fn from_env() -> Result<Self, Error> {
        let base_url = std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::builder(base_url).try_build()
    }

    /// Returns the base URL of the OpenCode Server.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Union registry used to decode polymorphic responses.
    pub fn registry(&self) -> &UnionRegistry {
        &self.registry
    }

    /// Decoder over this client's registry, in the configured mode.
    pub fn decoder(&self) -> Decoder<'_> {
        Decoder::new(&self.registry).with_mode(self.mode)
    }

    /// Performs a GET request to the health endpoint.
    ///
    /// Use this to verify the server is running and check its version.
    pub async fn health(&self) -> Result<HealthResponse, Error> {
        self.send_json(ApiRequest::get("/global/health")).await
    }

    /// Disposes all OpenCode instances, releasing all resources.
    ///
    /// `POST /global/dispose`
    pub async fn global_dispose(&self) -> Result<bool, Error> {
        self.send_json(ApiRequest::post("/global/dispose")).await
    }

    pub(crate) async fn send(&self, request: ApiRequest) -> Result<Bytes, Error> {
        debug!(method = %request.method, path = %request.path, "sending request");
        self.transport.execute(request).await
    }

    /// Sends `request` and decodes a plain (non-union) JSON response.
    pub(crate) async fn send_json<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, Error> {
        let body = self.send(request).await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Response from `/global/health`.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct HealthResponse {
    /// Server version string.
    pub version: String,
}
