//! Session and message request/response types.
//!
//! Polymorphic payloads (`Message`, the part unions, `ToolState`,
//! `AssistantMessageError`) are closed enums implementing
//! [`TaggedUnion`]; everything else is a plain serde struct.

use crate::union::{nested_union, Shape, TaggedUnion, UnionDescriptor, UnknownVariant};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Session as returned by the server.
#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    /// Session ID (e.g. "ses_...").
    pub id: String,
    pub time: SessionTime,
    pub title: String,
    /// Server version that created the session.
    pub version: String,
    #[serde(rename = "parentID", default)]
    pub parent_id: Option<String>,
    /// Present while part of the session is reverted.
    #[serde(default)]
    pub revert: Option<SessionRevert>,
    /// Present once the session has been shared.
    #[serde(default)]
    pub share: Option<SessionShare>,
}

/// Creation and update timestamps (ms since epoch).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SessionTime {
    pub created: f64,
    pub updated: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionRevert {
    #[serde(rename = "messageID")]
    pub message_id: String,
    #[serde(default)]
    pub part: Option<f64>,
    #[serde(rename = "partID", default)]
    pub part_id: Option<String>,
    #[serde(default)]
    pub snapshot: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionShare {
    pub url: String,
}

// ---------------------------------------------------------------------------
// Parts
// ---------------------------------------------------------------------------

/// Plain text content.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TextPart {
    pub text: String,
    /// Part ID (e.g. "prt_..."). Older servers omit it.
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "sessionID", default)]
    pub session_id: Option<String>,
    #[serde(rename = "messageID", default)]
    pub message_id: Option<String>,
}

impl Shape for TextPart {
    const REQUIRED: &'static [&'static str] = &["text"];
}

/// File attachment referenced by URL.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FilePart {
    pub mime: String,
    pub url: String,
    #[serde(default)]
    pub filename: Option<String>,
}

impl Shape for FilePart {
    const REQUIRED: &'static [&'static str] = &["mime", "url"];
}

/// A tool invocation and its current state.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ToolPart {
    pub id: String,
    /// Tool name, e.g. "bash" or "read".
    pub tool: String,
    pub state: ToolState,
    #[serde(rename = "sessionID", default)]
    pub session_id: Option<String>,
    #[serde(rename = "messageID", default)]
    pub message_id: Option<String>,
}

impl Shape for ToolPart {
    const REQUIRED: &'static [&'static str] = &["id", "tool", "state"];
}

/// Marks the start of a model step. Carries no content.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StepStartPart {
    #[serde(default)]
    pub id: Option<String>,
}

impl Shape for StepStartPart {
    const REQUIRED: &'static [&'static str] = &[];
}

/// Marks the end of a model step.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StepFinishPart {
    #[serde(default)]
    pub id: Option<String>,
    /// Finish reason, e.g. "stop" or "tool-calls".
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(rename = "sessionID", default)]
    pub session_id: Option<String>,
}

impl Shape for StepFinishPart {
    const REQUIRED: &'static [&'static str] = &[];
}

/// Parts of a user message: `text` or `file`.
#[derive(Debug, Clone, PartialEq)]
pub enum UserMessagePart {
    Text(TextPart),
    File(FilePart),
    Unknown(UnknownVariant),
}

impl TaggedUnion for UserMessagePart {
    fn descriptor() -> UnionDescriptor<Self> {
        UnionDescriptor::new("UserMessagePart", "type")
            .variant::<TextPart>("text", UserMessagePart::Text)
            .variant::<FilePart>("file", UserMessagePart::File)
    }

    fn unknown(payload: UnknownVariant) -> Self {
        UserMessagePart::Unknown(payload)
    }

    fn as_unknown(&self) -> Option<&UnknownVariant> {
        match self {
            UserMessagePart::Unknown(payload) => Some(payload),
            _ => None,
        }
    }
}

/// Parts of an assistant message: `text`, `tool` or `step-start`.
#[derive(Debug, Clone, PartialEq)]
pub enum AssistantMessagePart {
    Text(TextPart),
    Tool(ToolPart),
    StepStart(StepStartPart),
    Unknown(UnknownVariant),
}

impl TaggedUnion for AssistantMessagePart {
    fn descriptor() -> UnionDescriptor<Self> {
        UnionDescriptor::new("AssistantMessagePart", "type")
            .variant::<TextPart>("text", AssistantMessagePart::Text)
            .variant::<ToolPart>("tool", AssistantMessagePart::Tool)
            .variant::<StepStartPart>("step-start", AssistantMessagePart::StepStart)
    }

    fn unknown(payload: UnknownVariant) -> Self {
        AssistantMessagePart::Unknown(payload)
    }

    fn as_unknown(&self) -> Option<&UnknownVariant> {
        match self {
            AssistantMessagePart::Unknown(payload) => Some(payload),
            _ => None,
        }
    }
}

/// Any message part, as carried by `message.part.updated` events.
#[derive(Debug, Clone, PartialEq)]
pub enum Part {
    Text(TextPart),
    File(FilePart),
    Tool(ToolPart),
    StepStart(StepStartPart),
    StepFinish(StepFinishPart),
    Unknown(UnknownVariant),
}

impl Part {
    /// Session the part belongs to, when the server included it.
    pub fn session_id(&self) -> Option<&str> {
        match self {
            Part::Text(part) => part.session_id.as_deref(),
            Part::Tool(part) => part.session_id.as_deref(),
            Part::StepFinish(part) => part.session_id.as_deref(),
            Part::Unknown(payload) => payload.get("sessionID").and_then(Value::as_str),
            Part::File(_) | Part::StepStart(_) => None,
        }
    }
}

impl TaggedUnion for Part {
    fn descriptor() -> UnionDescriptor<Self> {
        UnionDescriptor::new("Part", "type")
            .variant::<TextPart>("text", Part::Text)
            .variant::<FilePart>("file", Part::File)
            .variant::<ToolPart>("tool", Part::Tool)
            .variant::<StepStartPart>("step-start", Part::StepStart)
            .variant::<StepFinishPart>("step-finish", Part::StepFinish)
    }

    fn unknown(payload: UnknownVariant) -> Self {
        Part::Unknown(payload)
    }

    fn as_unknown(&self) -> Option<&UnknownVariant> {
        match self {
            Part::Unknown(payload) => Some(payload),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tool state
// ---------------------------------------------------------------------------

/// Tool call queued but not started.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ToolStatePending {}

impl Shape for ToolStatePending {
    const REQUIRED: &'static [&'static str] = &[];
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ToolStateRunning {
    pub time: ToolTimeStart,
    #[serde(default)]
    pub input: Option<Value>,
    #[serde(default)]
    pub title: Option<String>,
}

impl Shape for ToolStateRunning {
    const REQUIRED: &'static [&'static str] = &["time"];
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ToolStateCompleted {
    pub metadata: Map<String, Value>,
    pub output: String,
    pub time: ToolTimeRange,
    pub title: String,
    #[serde(default)]
    pub input: Option<Value>,
}

impl Shape for ToolStateCompleted {
    const REQUIRED: &'static [&'static str] = &["metadata", "output", "time", "title"];
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ToolTimeStart {
    pub start: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ToolTimeRange {
    pub start: f64,
    pub end: f64,
}

/// Tool execution state keyed by `status`.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolState {
    Pending(ToolStatePending),
    Running(ToolStateRunning),
    Completed(ToolStateCompleted),
    Unknown(UnknownVariant),
}

impl ToolState {
    /// Tool output, once completed.
    pub fn output(&self) -> Option<&str> {
        match self {
            ToolState::Completed(state) => Some(&state.output),
            _ => None,
        }
    }
}

impl TaggedUnion for ToolState {
    fn descriptor() -> UnionDescriptor<Self> {
        UnionDescriptor::new("ToolState", "status")
            .variant::<ToolStatePending>("pending", ToolState::Pending)
            .variant::<ToolStateRunning>("running", ToolState::Running)
            .variant::<ToolStateCompleted>("completed", ToolState::Completed)
    }

    fn unknown(payload: UnknownVariant) -> Self {
        ToolState::Unknown(payload)
    }

    fn as_unknown(&self) -> Option<&UnknownVariant> {
        match self {
            ToolState::Unknown(payload) => Some(payload),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Assistant errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProviderAuthError {
    pub data: ProviderAuthErrorData,
}

impl Shape for ProviderAuthError {
    const REQUIRED: &'static [&'static str] = &["data"];
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProviderAuthErrorData {
    pub message: String,
    #[serde(rename = "providerID")]
    pub provider_id: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UnknownError {
    pub data: UnknownErrorData,
}

impl Shape for UnknownError {
    const REQUIRED: &'static [&'static str] = &["data"];
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UnknownErrorData {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MessageOutputLengthError {
    #[serde(default)]
    pub data: Value,
}

impl Shape for MessageOutputLengthError {
    const REQUIRED: &'static [&'static str] = &[];
}

/// Error attached to an assistant message, keyed by `name`.
#[derive(Debug, Clone, PartialEq)]
pub enum AssistantMessageError {
    ProviderAuth(ProviderAuthError),
    Unknown(UnknownError),
    MessageOutputLength(MessageOutputLengthError),
    /// A `name` this SDK does not know.
    Other(UnknownVariant),
}

impl AssistantMessageError {
    /// Human-readable message, when the variant carries one.
    pub fn message(&self) -> Option<&str> {
        match self {
            AssistantMessageError::ProviderAuth(e) => Some(&e.data.message),
            AssistantMessageError::Unknown(e) => Some(&e.data.message),
            AssistantMessageError::MessageOutputLength(_) => None,
            AssistantMessageError::Other(payload) => payload
                .get("data")
                .and_then(|data| data.get("message"))
                .and_then(Value::as_str),
        }
    }
}

impl TaggedUnion for AssistantMessageError {
    fn descriptor() -> UnionDescriptor<Self> {
        UnionDescriptor::new("AssistantMessageError", "name")
            .variant::<ProviderAuthError>("ProviderAuthError", AssistantMessageError::ProviderAuth)
            .variant::<UnknownError>("UnknownError", AssistantMessageError::Unknown)
            .variant::<MessageOutputLengthError>(
                "MessageOutputLengthError",
                AssistantMessageError::MessageOutputLength,
            )
    }

    fn unknown(payload: UnknownVariant) -> Self {
        AssistantMessageError::Other(payload)
    }

    fn as_unknown(&self) -> Option<&UnknownVariant> {
        match self {
            AssistantMessageError::Other(payload) => Some(payload),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserMessage {
    pub id: String,
    #[serde(rename = "sessionID")]
    pub session_id: String,
    pub time: UserMessageTime,
    /// Required by the server schema but defaulted here. The `info` object of
    /// `message.updated` events carries no parts, and neither does the `info`
    /// half of an `{info, parts}` list item.
    #[serde(default)]
    pub parts: Vec<UserMessagePart>,
}

impl Shape for UserMessage {
    const REQUIRED: &'static [&'static str] = &["id", "sessionID", "time"];
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct UserMessageTime {
    pub created: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AssistantMessage {
    pub id: String,
    #[serde(rename = "sessionID")]
    pub session_id: String,
    pub cost: f64,
    #[serde(rename = "modelID")]
    pub model_id: String,
    #[serde(rename = "providerID")]
    pub provider_id: String,
    pub path: MessagePath,
    /// System prompts used for this turn.
    pub system: Vec<String>,
    pub time: AssistantMessageTime,
    pub tokens: TokenUsage,
    /// Defaulted like [`UserMessage::parts`].
    #[serde(default)]
    pub parts: Vec<AssistantMessagePart>,
    #[serde(default)]
    pub error: Option<AssistantMessageError>,
    /// True when the message is a session summary.
    #[serde(default)]
    pub summary: Option<bool>,
}

impl Shape for AssistantMessage {
    const REQUIRED: &'static [&'static str] = &[
        "id",
        "sessionID",
        "cost",
        "modelID",
        "providerID",
        "path",
        "system",
        "time",
        "tokens",
    ];
}

impl AssistantMessage {
    /// True once the server recorded a completion time.
    pub fn is_completed(&self) -> bool {
        self.time.completed.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MessagePath {
    pub cwd: String,
    pub root: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct AssistantMessageTime {
    pub created: f64,
    #[serde(default)]
    pub completed: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct TokenUsage {
    pub input: f64,
    pub output: f64,
    pub reasoning: f64,
    pub cache: TokenCache,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct TokenCache {
    pub read: f64,
    pub write: f64,
}

/// A session message keyed by `role`.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    User(UserMessage),
    Assistant(AssistantMessage),
    Unknown(UnknownVariant),
}

impl Message {
    pub fn id(&self) -> Option<&str> {
        match self {
            Message::User(m) => Some(&m.id),
            Message::Assistant(m) => Some(&m.id),
            Message::Unknown(payload) => payload.get("id").and_then(Value::as_str),
        }
    }

    pub fn session_id(&self) -> Option<&str> {
        match self {
            Message::User(m) => Some(&m.session_id),
            Message::Assistant(m) => Some(&m.session_id),
            Message::Unknown(payload) => payload.get("sessionID").and_then(Value::as_str),
        }
    }

    /// Extracts all text parts, concatenated with newlines.
    pub fn text_content(&self) -> String {
        let texts: Vec<&str> = match self {
            Message::User(m) => m
                .parts
                .iter()
                .filter_map(|p| match p {
                    UserMessagePart::Text(t) => Some(t.text.as_str()),
                    _ => None,
                })
                .collect(),
            Message::Assistant(m) => m
                .parts
                .iter()
                .filter_map(|p| match p {
                    AssistantMessagePart::Text(t) => Some(t.text.as_str()),
                    _ => None,
                })
                .collect(),
            Message::Unknown(_) => Vec::new(),
        };
        texts.join("\n")
    }
}

impl TaggedUnion for Message {
    fn descriptor() -> UnionDescriptor<Self> {
        UnionDescriptor::new("Message", "role")
            .variant::<UserMessage>("user", Message::User)
            .variant::<AssistantMessage>("assistant", Message::Assistant)
    }

    fn unknown(payload: UnknownVariant) -> Self {
        Message::Unknown(payload)
    }

    fn as_unknown(&self) -> Option<&UnknownVariant> {
        match self {
            Message::Unknown(payload) => Some(payload),
            _ => None,
        }
    }
}

nested_union!(
    UserMessagePart,
    AssistantMessagePart,
    Part,
    ToolState,
    AssistantMessageError,
    Message,
);

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Request body for `POST /session`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateSessionRequest {
    /// Optional parent session ID (pattern: ^ses.*).
    #[serde(rename = "parentID", skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Request body for `PATCH /session/{id}`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateSessionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Message part sent by the client.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PartInput {
    Text {
        text: String,
    },
    File {
        mime: String,
        url: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        filename: Option<String>,
    },
}

impl PartInput {
    /// Creates a text part.
    pub fn text(content: impl Into<String>) -> Self {
        PartInput::Text {
            text: content.into(),
        }
    }

    /// Creates a file part referencing `url`.
    pub fn file(mime: impl Into<String>, url: impl Into<String>) -> Self {
        PartInput::File {
            mime: mime.into(),
            url: url.into(),
            filename: None,
        }
    }
}

/// Request body for `POST /session/{id}/message` and `/prompt_async`.
///
/// # Examples
///
/// ```
/// use opencode_sdk::session::{PartInput, SendMessageRequest};
///
/// let req = SendMessageRequest::new("anthropic", "claude-sonnet-4", vec![PartInput::text("Hello")]);
/// assert_eq!(req.parts.len(), 1);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct SendMessageRequest {
    #[serde(rename = "providerID")]
    pub provider_id: String,
    #[serde(rename = "modelID")]
    pub model_id: String,
    pub parts: Vec<PartInput>,
    /// Optional message ID (pattern: ^msg.*).
    #[serde(rename = "messageID", skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
}

impl SendMessageRequest {
    /// Creates a request for the given model; optional fields are `None`.
    pub fn new(
        provider_id: impl Into<String>,
        model_id: impl Into<String>,
        parts: Vec<PartInput>,
    ) -> Self {
        Self {
            provider_id: provider_id.into(),
            model_id: model_id.into(),
            parts,
            message_id: None,
            agent: None,
            system: None,
        }
    }
}

/// Provider and model selection, used by `init` and `summarize`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelSelection {
    #[serde(rename = "providerID")]
    pub provider_id: String,
    #[serde(rename = "modelID")]
    pub model_id: String,
}

impl ModelSelection {
    pub fn new(provider_id: impl Into<String>, model_id: impl Into<String>) -> Self {
        Self {
            provider_id: provider_id.into(),
            model_id: model_id.into(),
        }
    }
}

/// Request body for `POST /session/{id}/revert`.
#[derive(Debug, Clone, Serialize)]
pub struct RevertRequest {
    #[serde(rename = "messageID")]
    pub message_id: String,
    #[serde(rename = "partID", skip_serializing_if = "Option::is_none")]
    pub part_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::union::{Decoder, UnionRegistry};

    fn assistant_json() -> serde_json::Value {
        serde_json::json!({
            "id": "msg_2",
            "role": "assistant",
            "sessionID": "ses_1",
            "cost": 0.0012,
            "modelID": "claude-sonnet-4",
            "providerID": "anthropic",
            "path": { "cwd": "/work", "root": "/work" },
            "system": ["be brief"],
            "time": { "created": 1.0, "completed": 2.0 },
            "tokens": { "input": 10, "output": 5, "reasoning": 0, "cache": { "read": 0, "write": 0 } },
            "parts": [
                { "type": "step-start" },
                { "type": "text", "text": "done" },
                {
                    "type": "tool", "id": "prt_1", "tool": "bash",
                    "state": {
                        "status": "completed", "output": "ok", "title": "ls",
                        "metadata": {}, "time": { "start": 1.0, "end": 2.0 }
                    }
                },
                { "type": "reasoning", "text": "thinking" }
            ],
            "error": { "name": "ProviderAuthError", "data": { "message": "bad key", "providerID": "anthropic" } }
        })
    }

    /// Given an assistant message with mixed parts,
    /// When decoded as a Message,
    /// Then nested part, tool state and error unions resolve by discriminator
    /// and the unfamiliar "reasoning" part falls back to Unknown.
    #[test]
    fn assistant_message_decodes_nested_unions() {
        let registry = UnionRegistry::with_defaults().unwrap();
        let value = Decoder::new(&registry)
            .decode_value::<Message>(&assistant_json())
            .unwrap();
        assert_eq!(value.tag(), Some("assistant"));

        let Message::Assistant(message) = value.variant() else {
            panic!("expected assistant message");
        };
        assert!(message.is_completed());
        assert_eq!(message.parts.len(), 4);
        assert!(matches!(message.parts[0], AssistantMessagePart::StepStart(_)));
        let AssistantMessagePart::Tool(tool) = &message.parts[2] else {
            panic!("expected tool part");
        };
        assert_eq!(tool.state.output(), Some("ok"));
        let AssistantMessagePart::Unknown(reasoning) = &message.parts[3] else {
            panic!("expected unknown part");
        };
        assert_eq!(reasoning.tag(), Some("reasoning"));
        assert_eq!(
            message.error.as_ref().and_then(AssistantMessageError::message),
            Some("bad key")
        );
        assert_eq!(value.variant().text_content(), "done");
    }

    /// Given a user message with text and file parts,
    /// When decoded,
    /// Then it narrows to User and exposes its session.
    #[test]
    fn user_message_decodes() {
        let registry = UnionRegistry::with_defaults().unwrap();
        let raw = r#"{"id":"msg_1","role":"user","sessionID":"ses_1","time":{"created":1},"parts":[{"type":"text","text":"hi"},{"type":"file","mime":"text/plain","url":"file:///a.txt"}]}"#;
        let value = Decoder::new(&registry).decode_str::<Message>(raw).unwrap();
        assert_eq!(value.variant().session_id(), Some("ses_1"));
        let Message::User(user) = value.into_variant() else {
            panic!("expected user message");
        };
        assert!(matches!(&user.parts[1], UserMessagePart::File(f) if f.mime == "text/plain"));
    }

    /// Given an assistant message without its tokens,
    /// When decoded,
    /// Then MissingRequiredField names the field.
    #[test]
    fn assistant_message_missing_tokens() {
        let registry = UnionRegistry::with_defaults().unwrap();
        let mut json = assistant_json();
        json.as_object_mut().unwrap().remove("tokens");
        let err = Decoder::new(&registry)
            .decode_value::<Message>(&json)
            .unwrap_err();
        assert!(matches!(
            err,
            crate::Error::MissingRequiredField { union: "Message", field: "tokens", .. }
        ));
    }

    #[test]
    fn running_tool_state_requires_time() {
        let registry = UnionRegistry::with_defaults().unwrap();
        let decoder = Decoder::new(&registry);
        let running = decoder
            .decode_str::<ToolState>(r#"{"status":"running","time":{"start":5},"input":{"cmd":"ls"}}"#)
            .unwrap();
        assert!(matches!(running.variant(), ToolState::Running(s) if s.time.start == 5.0));
        assert!(decoder
            .decode_str::<ToolState>(r#"{"status":"running"}"#)
            .is_err());
        let pending = decoder
            .decode_str::<ToolState>(r#"{"status":"pending"}"#)
            .unwrap();
        assert_eq!(pending.into_variant(), ToolState::Pending(ToolStatePending {}));
    }

    #[test]
    fn unknown_error_name_keeps_message() {
        let registry = UnionRegistry::with_defaults().unwrap();
        let value = Decoder::new(&registry)
            .decode_str::<AssistantMessageError>(
                r#"{"name":"APIError","data":{"message":"rate limited","statusCode":429}}"#,
            )
            .unwrap();
        assert!(value.is_unknown());
        assert_eq!(value.variant().message(), Some("rate limited"));
    }

    #[test]
    fn send_message_request_uses_wire_names() {
        let mut req = SendMessageRequest::new(
            "anthropic",
            "claude-sonnet-4",
            vec![PartInput::text("hi"), PartInput::file("image/png", "data:...")],
        );
        req.message_id = Some("msg_9".to_string());
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "providerID": "anthropic",
                "modelID": "claude-sonnet-4",
                "messageID": "msg_9",
                "parts": [
                    { "type": "text", "text": "hi" },
                    { "type": "file", "mime": "image/png", "url": "data:..." }
                ]
            })
        );
    }
}
