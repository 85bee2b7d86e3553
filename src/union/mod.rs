//! Tagged-union JSON decoding.
//!
//! Several opencode payloads are polymorphic: a message is a user or an
//! assistant message (`role`), a part is text, a file or a tool call
//! (`type`), a tool state is pending, running or completed (`status`).
//! Each such union is a closed Rust enum implementing [`TaggedUnion`], with
//! an explicit `Unknown` case for discriminator values this SDK does not
//! know yet.
//!
//! Decoding goes through a [`UnionRegistry`], built once (usually by the
//! [`Client`](crate::Client)) and then shared read-only, and a [`Decoder`]
//! that picks lenient or strict handling of unknown variants:
//!
//! ```
//! use opencode_sdk::session::AssistantMessagePart;
//! use opencode_sdk::union::{Decoder, UnionRegistry};
//!
//! let registry = UnionRegistry::with_defaults().unwrap();
//! let part = Decoder::new(&registry)
//!     .decode_str::<AssistantMessagePart>(r#"{"type":"text","text":"hi"}"#)
//!     .unwrap();
//! assert_eq!(part.tag(), Some("text"));
//! match part.variant() {
//!     AssistantMessagePart::Text(text) => assert_eq!(text.text, "hi"),
//!     other => panic!("unexpected part: {:?}", other),
//! }
//! ```

mod decode;
mod descriptor;
mod registry;
mod value;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

pub use decode::{deserialize_nested, DecodeMode, Decoder};
pub use descriptor::{Shape, UnionDescriptor, Variant};
pub use registry::UnionRegistry;
pub use value::UnionValue;

/// A closed sum type decoded by discriminator.
pub trait TaggedUnion: Sized + 'static {
    /// Built-in descriptor; registered by [`UnionRegistry::register_union`].
    fn descriptor() -> UnionDescriptor<Self>;

    /// Wraps a payload whose discriminator matched no variant.
    fn unknown(payload: UnknownVariant) -> Self;

    /// Returns the fallback payload when this value is the unknown case.
    fn as_unknown(&self) -> Option<&UnknownVariant>;
}

/// Fallback payload for an unrecognised discriminator value.
///
/// Keeps every top-level key/value pair so nothing the server sent is lost.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnknownVariant {
    tag: Option<String>,
    fields: Map<String, Value>,
}

impl UnknownVariant {
    pub fn new(tag: Option<String>, fields: Map<String, Value>) -> Self {
        Self { tag, fields }
    }

    /// Discriminator value as sent by the server, if it had one.
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

impl Serialize for UnknownVariant {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

/// Implements `Deserialize` for a [`TaggedUnion`] so it can appear as a field
/// of ordinary serde structs.
macro_rules! nested_union {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl<'de> serde::Deserialize<'de> for $ty {
                fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
                where
                    D: serde::Deserializer<'de>,
                {
                    $crate::union::deserialize_nested(deserializer)
                }
            }
        )+
    };
}

pub(crate) use nested_union;
