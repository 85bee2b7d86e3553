//! Decoded union values: raw bytes, generic view and concrete variant.

use super::TaggedUnion;
use serde::{Serialize, Serializer};
use serde_json::value::RawValue;
use serde_json::{Map, Value};

/// Result of decoding one union payload.
///
/// Carries the original bytes (re-serialized verbatim), a generic view of the
/// top-level fields for access without a type check, and the concrete variant
/// for exhaustive `match`.
#[derive(Debug, Clone)]
pub struct UnionValue<U> {
    raw: Box<RawValue>,
    tag: Option<String>,
    fields: Map<String, Value>,
    variant: U,
}

impl<U> UnionValue<U> {
    pub(crate) fn new(
        raw: Box<RawValue>,
        tag: Option<String>,
        fields: Map<String, Value>,
        variant: U,
    ) -> Self {
        Self {
            raw,
            tag,
            fields,
            variant,
        }
    }

    /// Original JSON text exactly as received.
    pub fn raw(&self) -> &str {
        self.raw.get()
    }

    pub fn raw_bytes(&self) -> &[u8] {
        self.raw.get().as_bytes()
    }

    /// Discriminator value as sent by the server.
    ///
    /// `None` when the payload had no discriminator and the default variant was used.
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Top-level field by JSON name, whatever the variant.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Narrows to the concrete variant.
    pub fn variant(&self) -> &U {
        &self.variant
    }

    pub fn into_variant(self) -> U {
        self.variant
    }
}

impl<U: TaggedUnion> UnionValue<U> {
    /// True when no registered variant matched (lenient fallback).
    pub fn is_unknown(&self) -> bool {
        self.variant.as_unknown().is_some()
    }
}

impl<U> AsRef<U> for UnionValue<U> {
    fn as_ref(&self) -> &U {
        &self.variant
    }
}

impl<U> Serialize for UnionValue<U> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}
