//! Message list parsing.
//!
//! Turns `GET /session/{id}/message` bodies into decoded [`Message`] values.

use crate::union::{Decoder, UnionValue};
use crate::Error;
use serde_json::value::RawValue;
use serde_json::{Map, Value};
use tracing::{debug, info};

use super::Message;

/// Decodes a message list. Handles the bare array, the `{messages: [...]}` wrapper,
/// and items shaped `{info: {...}, parts: [...]}`.
pub(crate) fn decode_message_list(
    decoder: Decoder<'_>,
    body: &[u8],
) -> Result<Vec<UnionValue<Message>>, Error> {
    let items = decoder.raw_items::<Message>(body, "messages")?;
    let messages = items
        .into_iter()
        .map(|item| decode_message_item(decoder, item))
        .collect::<Result<Vec<_>, _>>()?;
    info!(count = messages.len(), "received message list");
    for (msg_index, message) in messages.iter().enumerate() {
        debug!(
            msg_index,
            message_id = message.variant().id().unwrap_or(""),
            role = message.tag().unwrap_or(""),
            unknown = message.is_unknown(),
            "received message"
        );
    }
    Ok(messages)
}

/// Decodes one message item. An `{info, parts}` item is decoded from its merged
/// view but keeps its wire text as the raw payload.
pub(crate) fn decode_message_item(
    decoder: Decoder<'_>,
    item: Box<RawValue>,
) -> Result<UnionValue<Message>, Error> {
    match flatten_info_item(&item) {
        Some(merged) => decoder.decode_with_view::<Message>(item, merged),
        None => decoder.decode_raw::<Message>(item),
    }
}

/// Merges `info` and `parts` of an `{info, parts}` item into one message object.
///
/// Returns `None` for items without an `info` object.
fn flatten_info_item(item: &RawValue) -> Option<Map<String, Value>> {
    let Ok(Value::Object(mut object)) = serde_json::from_str::<Value>(item.get()) else {
        return None;
    };
    let Some(Value::Object(mut merged)) = object.remove("info") else {
        return None;
    };
    if let Some(parts) = object.remove("parts") {
        merged.insert("parts".to_string(), parts);
    }
    Some(merged)
}
