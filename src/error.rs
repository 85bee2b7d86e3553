//! Error types for the OpenCode SDK.

use thiserror::Error;

/// Errors that can occur when using the OpenCode SDK.
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed (connection, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status code.
    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },

    /// JSON serialization or deserialization of a plain (non-union) type failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Payload is not valid JSON, not an object, or has an unusable discriminator.
    #[error("malformed {union} payload: {reason}")]
    MalformedPayload { union: &'static str, reason: String },

    /// A variant matched but one of its required fields is absent or null.
    #[error("{union} variant `{variant}` is missing required field `{field}`")]
    MissingRequiredField {
        union: &'static str,
        variant: String,
        field: &'static str,
    },

    /// A required path parameter was empty; no request was sent.
    #[error("missing required {0} parameter")]
    MissingRequiredParameter(&'static str),

    /// Discriminator value matched no registered variant (strict mode only).
    #[error("unknown {union} variant: {field} = {value:?}")]
    UnknownVariant {
        union: &'static str,
        field: &'static str,
        value: String,
    },

    /// The same discriminator value was registered twice for one union.
    #[error("duplicate {union} variant registered for {value:?}")]
    DuplicateVariant { union: &'static str, value: String },

    /// Decoding was requested for a union type missing from the registry.
    #[error("union {0} is not registered")]
    UnregisteredUnion(&'static str),

    /// Failed to build the underlying HTTP client.
    #[error("failed to build HTTP client: {0}")]
    ClientBuildFailed(String),

    /// Server-sent event stream failed.
    #[error("event stream error: {0}")]
    EventStream(String),
}
