//! Event payloads from `GET /event`.
//!
//! Every event is `{"type": "...", "properties": {...}}`; the `properties`
//! object differs per type.

use crate::session::{AssistantMessageError, Message, Part, Session};
use crate::union::{nested_union, Shape, TaggedUnion, UnionDescriptor, UnknownVariant};
use serde::Deserialize;
use serde_json::Value;

/// `message.part.updated`
#[derive(Debug, Clone, Deserialize)]
pub struct MessagePartUpdated {
    pub properties: MessagePartUpdatedProperties,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessagePartUpdatedProperties {
    pub part: Part,
    /// Text appended since the previous update of this part, when the server streams deltas.
    #[serde(default)]
    pub delta: Option<String>,
}

impl Shape for MessagePartUpdated {
    const REQUIRED: &'static [&'static str] = &["properties"];
}

/// `message.updated`
#[derive(Debug, Clone, Deserialize)]
pub struct MessageUpdated {
    pub properties: MessageInfoProperties,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageInfoProperties {
    pub info: Message,
}

impl Shape for MessageUpdated {
    const REQUIRED: &'static [&'static str] = &["properties"];
}

/// `session.updated` and `session.deleted`
#[derive(Debug, Clone, Deserialize)]
pub struct SessionChanged {
    pub properties: SessionInfoProperties,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionInfoProperties {
    pub info: Session,
}

impl Shape for SessionChanged {
    const REQUIRED: &'static [&'static str] = &["properties"];
}

/// `session.idle`
#[derive(Debug, Clone, Deserialize)]
pub struct SessionIdle {
    pub properties: SessionIdProperties,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionIdProperties {
    #[serde(rename = "sessionID")]
    pub session_id: String,
}

impl Shape for SessionIdle {
    const REQUIRED: &'static [&'static str] = &["properties"];
}

/// `session.status`
#[derive(Debug, Clone, Deserialize)]
pub struct SessionStatusChanged {
    pub properties: SessionStatusProperties,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionStatusProperties {
    #[serde(rename = "sessionID")]
    pub session_id: String,
    pub status: SessionStatus,
}

impl Shape for SessionStatusChanged {
    const REQUIRED: &'static [&'static str] = &["properties"];
}

/// `session.error`
#[derive(Debug, Clone, Deserialize)]
pub struct SessionErrorEvent {
    pub properties: SessionErrorProperties,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionErrorProperties {
    #[serde(rename = "sessionID", default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub error: Option<AssistantMessageError>,
}

impl Shape for SessionErrorEvent {
    const REQUIRED: &'static [&'static str] = &["properties"];
}

/// `file.edited`
#[derive(Debug, Clone, Deserialize)]
pub struct FileEdited {
    pub properties: FileEditedProperties,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FileEditedProperties {
    pub file: String,
}

impl Shape for FileEdited {
    const REQUIRED: &'static [&'static str] = &["properties"];
}

/// `installation.updated`
#[derive(Debug, Clone, Deserialize)]
pub struct InstallationUpdated {
    pub properties: InstallationUpdatedProperties,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InstallationUpdatedProperties {
    pub version: String,
}

impl Shape for InstallationUpdated {
    const REQUIRED: &'static [&'static str] = &["properties"];
}

/// Server-sent event keyed by `type`.
#[derive(Debug, Clone)]
pub enum Event {
    MessagePartUpdated(MessagePartUpdated),
    MessageUpdated(MessageUpdated),
    SessionUpdated(SessionChanged),
    SessionDeleted(SessionChanged),
    SessionIdle(SessionIdle),
    SessionStatus(SessionStatusChanged),
    SessionError(SessionErrorEvent),
    FileEdited(FileEdited),
    InstallationUpdated(InstallationUpdated),
    Unknown(UnknownVariant),
}

impl Event {
    /// Session the event belongs to, if any.
    pub fn session_id(&self) -> Option<&str> {
        match self {
            Event::MessagePartUpdated(ev) => ev.properties.part.session_id(),
            Event::MessageUpdated(ev) => ev.properties.info.session_id(),
            Event::SessionUpdated(ev) | Event::SessionDeleted(ev) => {
                Some(&ev.properties.info.id)
            }
            Event::SessionIdle(ev) => Some(&ev.properties.session_id),
            Event::SessionStatus(ev) => Some(&ev.properties.session_id),
            Event::SessionError(ev) => ev.properties.session_id.as_deref(),
            Event::FileEdited(_) | Event::InstallationUpdated(_) => None,
            Event::Unknown(payload) => payload
                .get("properties")
                .and_then(|p| p.get("sessionID"))
                .and_then(Value::as_str),
        }
    }

    /// False when the event belongs to a different session. Events without a
    /// session are not filtered out.
    pub(crate) fn concerns(&self, session_id: &str) -> bool {
        self.session_id().map_or(true, |s| s == session_id)
    }
}

impl TaggedUnion for Event {
    fn descriptor() -> UnionDescriptor<Self> {
        UnionDescriptor::new("Event", "type")
            .variant::<MessagePartUpdated>("message.part.updated", Event::MessagePartUpdated)
            .variant::<MessageUpdated>("message.updated", Event::MessageUpdated)
            .variant::<SessionChanged>("session.updated", Event::SessionUpdated)
            .variant::<SessionChanged>("session.deleted", Event::SessionDeleted)
            .variant::<SessionIdle>("session.idle", Event::SessionIdle)
            .variant::<SessionStatusChanged>("session.status", Event::SessionStatus)
            .variant::<SessionErrorEvent>("session.error", Event::SessionError)
            .variant::<FileEdited>("file.edited", Event::FileEdited)
            .variant::<InstallationUpdated>("installation.updated", Event::InstallationUpdated)
    }

    fn unknown(payload: UnknownVariant) -> Self {
        Event::Unknown(payload)
    }

    fn as_unknown(&self) -> Option<&UnknownVariant> {
        match self {
            Event::Unknown(payload) => Some(payload),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Session status
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StatusIdle {}

impl Shape for StatusIdle {
    const REQUIRED: &'static [&'static str] = &[];
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StatusBusy {}

impl Shape for StatusBusy {
    const REQUIRED: &'static [&'static str] = &[];
}

/// Waiting before retrying a failed provider call.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StatusRetry {
    pub attempt: u32,
    pub message: String,
    /// Time of the next attempt (ms since epoch).
    pub next: f64,
}

impl Shape for StatusRetry {
    const REQUIRED: &'static [&'static str] = &["attempt", "message", "next"];
}

/// Run state of a session, keyed by `type`.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionStatus {
    Idle(StatusIdle),
    Busy(StatusBusy),
    Retry(StatusRetry),
    Unknown(UnknownVariant),
}

impl SessionStatus {
    pub fn is_idle(&self) -> bool {
        matches!(self, SessionStatus::Idle(_))
    }
}

impl TaggedUnion for SessionStatus {
    fn descriptor() -> UnionDescriptor<Self> {
        UnionDescriptor::new("SessionStatus", "type")
            .variant::<StatusIdle>("idle", SessionStatus::Idle)
            .variant::<StatusBusy>("busy", SessionStatus::Busy)
            .variant::<StatusRetry>("retry", SessionStatus::Retry)
    }

    fn unknown(payload: UnknownVariant) -> Self {
        SessionStatus::Unknown(payload)
    }

    fn as_unknown(&self) -> Option<&UnknownVariant> {
        match self {
            SessionStatus::Unknown(payload) => Some(payload),
            _ => None,
        }
    }
}

nested_union!(Event, SessionStatus);
