//! Event stream for real-time updates.
//!
//! Subscribes to `GET /event` for streaming updates including
//! `message.part.updated` with text deltas. Events decode through the union
//! registry into [`Event`].
//!
//! Full SSE event payloads are logged at `trace` level. To inspect them,
//! set `RUST_LOG=opencode_sdk::event=trace`.

mod completion;
mod connect;
mod delta;
mod types;

use crate::client::Client;
use crate::request::require;
use crate::Error;
use futures::StreamExt;
use std::path::Path;
use tracing::{debug, info};

pub use connect::EventStream;
pub use types::*;

impl Client {
    /// Streams events, invokes `on_text` for each text delta of `session_id`, and
    /// returns when a completion event is seen or the stream ends.
    ///
    /// Use this after [`Client::session_prompt_async`] instead of polling the message list.
    /// Events that fail to decode are logged and skipped.
    pub async fn stream_session_text<F>(
        &self,
        directory: Option<&Path>,
        session_id: &str,
        mut on_text: F,
    ) -> Result<(), Error>
    where
        F: FnMut(&str) + Send,
    {
        let session_id = require("id", session_id)?;
        let mut stream = self.event_stream(directory).await?;
        while let Some(result) = stream.next().await {
            let event = match result {
                Ok(event) => event,
                Err(e @ Error::EventStream(_)) => return Err(e),
                Err(e) => {
                    debug!(error = %e, "skipping undecodable event");
                    continue;
                }
            };
            let event_type = event.tag().unwrap_or("");
            if let Some(text) = event.variant().text_delta_for(session_id) {
                info!("stream chunk: {}", text);
                on_text(text);
            } else {
                debug!(event_type, "event (no text delta for session)");
            }
            if event.variant().is_completion_for(session_id) {
                info!(event_type, "completion event received");
                return Ok(());
            }
        }
        debug!("event stream ended");
        Ok(())
    }
}
