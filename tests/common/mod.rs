//! In-memory transport for API tests: records every request and replays queued responses.

#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream;
use opencode_sdk::{ApiRequest, ByteStream, Client, Error, Transport};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
pub struct RecordingTransport {
    calls: Mutex<Vec<ApiRequest>>,
    responses: Mutex<VecDeque<Result<Bytes, Error>>>,
    streams: Mutex<VecDeque<Vec<Bytes>>>,
}

impl RecordingTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queues a 2xx response body.
    pub fn respond(&self, body: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(Bytes::from(body.to_string())));
    }

    /// Queues a non-2xx response.
    pub fn respond_status(&self, status: u16, body: &str) {
        self.responses.lock().unwrap().push_back(Err(Error::Status {
            status,
            body: body.to_string(),
        }));
    }

    /// Queues an SSE body delivered in the given chunks.
    pub fn stream(&self, chunks: &[&str]) {
        self.streams
            .lock()
            .unwrap()
            .push_back(chunks.iter().map(|c| Bytes::from(c.to_string())).collect());
    }

    pub fn calls(&self) -> Vec<ApiRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn execute(&self, request: ApiRequest) -> Result<Bytes, Error> {
        self.calls.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(Error::Status {
                    status: 599,
                    body: "no response queued".to_string(),
                })
            })
    }

    async fn open_stream(&self, request: ApiRequest) -> Result<ByteStream, Error> {
        self.calls.lock().unwrap().push(request);
        let chunks = self.streams.lock().unwrap().pop_front().unwrap_or_default();
        Ok(Box::pin(stream::iter(chunks.into_iter().map(Ok))))
    }
}

pub fn client(transport: &Arc<RecordingTransport>) -> Client {
    Client::builder("http://opencode.test")
        .transport(transport.clone())
        .try_build()
        .unwrap()
}

pub fn strict_client(transport: &Arc<RecordingTransport>) -> Client {
    Client::builder("http://opencode.test")
        .transport(transport.clone())
        .strict_unions(true)
        .try_build()
        .unwrap()
}

/// Assistant message JSON with the given id, parts and completion time.
pub fn assistant_json(id: &str, parts: &str, completed: Option<u64>) -> String {
    let time = match completed {
        Some(t) => format!(r#"{{"created":1,"completed":{}}}"#, t),
        None => r#"{"created":1}"#.to_string(),
    };
    format!(
        r#"{{"id":"{id}","role":"assistant","sessionID":"ses_1","cost":0.01,"modelID":"claude","providerID":"anthropic","path":{{"cwd":"/p","root":"/p"}},"system":[],"time":{time},"tokens":{{"input":10,"output":20,"reasoning":0,"cache":{{"read":0,"write":0}}}},"parts":{parts}}}"#
    )
}

pub const SESSION: &str =
    r#"{"id":"ses_1","title":"demo","version":"0.5.0","time":{"created":1,"updated":2}}"#;
