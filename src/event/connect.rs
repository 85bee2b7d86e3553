//! SSE connection: `Client::event_stream`.

use crate::client::Client;
use crate::request::ApiRequest;
use crate::union::{Decoder, UnionValue};
use crate::Error;
use eventsource_stream::Eventsource;
use futures::{Stream, StreamExt};
use std::path::Path;
use std::pin::Pin;
use std::sync::Arc;
use tracing::trace;

use super::Event;

/// Stream of decoded events from `GET /event`.
pub type EventStream = Pin<Box<dyn Stream<Item = Result<UnionValue<Event>, Error>> + Send>>;

impl Client {
    /// Connects to `GET /event` (instance-level SSE) and returns a stream of decoded events.
    ///
    /// Events with empty `data` are skipped. An event that fails to decode is yielded
    /// as `Err` and the stream continues; transport failures surface as
    /// [`Error::EventStream`].
    pub async fn event_stream(&self, directory: Option<&Path>) -> Result<EventStream, Error> {
        let bytes = self
            .transport
            .open_stream(ApiRequest::get("/event").with_directory(directory))
            .await?;
        let registry = Arc::clone(&self.registry);
        let mode = self.mode;
        let stream = bytes.eventsource().filter_map(move |result| {
            let registry = Arc::clone(&registry);
            async move {
                match result {
                    Ok(ev) if ev.data.is_empty() => None,
                    Ok(ev) => {
                        trace!(data = %ev.data, "event payload");
                        Some(
                            Decoder::new(&registry)
                                .with_mode(mode)
                                .decode_str::<Event>(&ev.data),
                        )
                    }
                    Err(e) => Some(Err(Error::EventStream(e.to_string()))),
                }
            }
        });
        Ok(Box::pin(stream))
    }
}
