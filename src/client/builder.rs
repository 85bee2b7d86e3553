//! ClientBuilder for configuring the OpenCode HTTP client.
//!
//! Supports request timeout, optional connection pool settings, strict union
//! decoding, and injection of a prebuilt union registry or custom transport.

use crate::transport::{ReqwestTransport, Transport};
use crate::union::{DecodeMode, UnionRegistry};
use crate::Error;
use reqwest::Client as ReqwestClient;
use std::sync::Arc;
use std::time::Duration;

use super::Client;

/// Builder for configuring the OpenCode client.
#[derive(Debug)]
pub struct ClientBuilder {
    pub(super) base_url: String,
    pub(super) timeout: Option<Duration>,
    /// Max idle connections per host (reqwest default: no limit). Set for high concurrency.
    pub(super) pool_max_idle_per_host: Option<usize>,
    /// Idle socket keep-alive timeout (reqwest default: 90s). Pass None to use default.
    pub(super) pool_idle_timeout: Option<Duration>,
    pub(super) strict_unions: bool,
    pub(super) registry: Option<Arc<UnionRegistry>>,
    pub(super) transport: Option<Arc<dyn Transport>>,
}

impl ClientBuilder {
    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the maximum idle connections per host in the connection pool.
    ///
    /// Useful for high-throughput scenarios. Reqwest default is effectively unlimited.
    pub fn pool_max_idle_per_host(mut self, max: usize) -> Self {
        self.pool_max_idle_per_host = Some(max);
        self
    }

    /// Sets how long idle sockets are kept in the pool before being closed.
    ///
    /// Reqwest default is 90 seconds. Pass `None` to use the default.
    pub fn pool_idle_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.pool_idle_timeout = timeout;
        self
    }

    /// Fail on unknown union variants instead of falling back to `Unknown`.
    ///
    /// Applies at every depth: a message with an unknown part kind fails too.
    pub fn strict_unions(mut self, strict: bool) -> Self {
        self.strict_unions = strict;
        self
    }

    /// Uses a prebuilt registry instead of [`UnionRegistry::with_defaults`].
    pub fn registry(mut self, registry: Arc<UnionRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Uses a custom transport. Timeout and pool settings are then ignored.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Builds the client. Panics if reqwest client build fails.
    /// Prefer [`try_build`](Self::try_build) when you need to handle errors.
    pub fn build(self) -> Client {
        self.try_build().expect("opencode client build")
    }

    /// Builds the client, returning an error if the reqwest client or the default
    /// registry cannot be built.
    pub fn try_build(self) -> Result<Client, Error> {
        let base_url = self.base_url.trim_end_matches('/').to_string();
        let transport = match self.transport {
            Some(transport) => transport,
            None => {
                let mut builder = ReqwestClient::builder();
                if let Some(timeout) = self.timeout {
                    builder = builder.timeout(timeout);
                }
                if let Some(max) = self.pool_max_idle_per_host {
                    builder = builder.pool_max_idle_per_host(max);
                }
                if let Some(t) = self.pool_idle_timeout {
                    builder = builder.pool_idle_timeout(t);
                }
                let http = builder
                    .build()
                    .map_err(|e| Error::ClientBuildFailed(e.to_string()))?;
                Arc::new(ReqwestTransport::new(base_url.clone(), http))
            }
        };
        let registry = match self.registry {
            Some(registry) => registry,
            None => Arc::new(UnionRegistry::with_defaults()?),
        };
        let mode = if self.strict_unions {
            DecodeMode::Strict
        } else {
            DecodeMode::Lenient
        };
        Ok(Client {
            base_url,
            transport,
            registry,
            mode,
        })
    }
}
