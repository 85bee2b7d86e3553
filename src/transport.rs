//! Transport: executes an [`ApiRequest`] and returns the raw response body.
//!
//! [`ReqwestTransport`] is the default. Timeouts and connection pooling belong to
//! the underlying `reqwest::Client`; the SDK performs no retries.

use crate::request::ApiRequest;
use crate::Error;
use async_trait::async_trait;
use bytes::Bytes;
use futures::{Stream, StreamExt};
use reqwest::Client as ReqwestClient;
use std::fmt;
use std::pin::Pin;
use std::time::Duration;
use tracing::debug;

/// Default SSE stream timeout (seconds).
const SSE_STREAM_TIMEOUT_SECS: u64 = 3600;

/// Chunked response body, used for server-sent events.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, Error>> + Send>>;

/// Executes HTTP requests for the [`Client`](crate::Client).
#[async_trait]
pub trait Transport: Send + Sync + fmt::Debug {
    /// Sends `request` and returns the full body of a 2xx response.
    ///
    /// Non-2xx responses fail with [`Error::Status`]; network failures with [`Error::Http`].
    async fn execute(&self, request: ApiRequest) -> Result<Bytes, Error>;

    /// Sends `request` expecting `text/event-stream` and returns the body as a stream.
    async fn open_stream(&self, request: ApiRequest) -> Result<ByteStream, Error>;
}

/// [`Transport`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    base_url: String,
    http: ReqwestClient,
}

impl ReqwestTransport {
    pub fn new(base_url: impl Into<String>, http: ReqwestClient) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn builder(&self, request: &ApiRequest) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, request.path);
        let mut builder = self.http.request(request.method.clone(), &url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        builder
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, Error> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                debug!(status = status.as_u16(), error = %e, "failed to read error body");
                String::new()
            }
        };
        debug!(status = status.as_u16(), body = %body, "request failed");
        Err(Error::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: ApiRequest) -> Result<Bytes, Error> {
        let response = self.builder(&request).send().await?;
        let response = Self::check(response).await?;
        Ok(response.bytes().await?)
    }

    async fn open_stream(&self, request: ApiRequest) -> Result<ByteStream, Error> {
        let response = self
            .builder(&request)
            .header("Accept", "text/event-stream")
            .timeout(Duration::from_secs(SSE_STREAM_TIMEOUT_SECS))
            .send()
            .await?;
        let response = Self::check(response).await?;
        Ok(Box::pin(response.bytes_stream().map(|chunk| chunk.map_err(Error::from))))
    }
}
