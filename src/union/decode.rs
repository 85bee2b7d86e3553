//! Discriminator-driven decoding.
//!
//! Unions nested inside a variant shape (parts inside a message, the state of
//! a tool part) are decoded by serde through [`deserialize_nested`]. While a
//! [`Decoder`] runs, a thread-local [`DecodeScope`] exposes its registry and
//! mode to those nested calls, and carries their typed [`Error`] back out of
//! serde.

use super::{TaggedUnion, UnionDescriptor, UnionRegistry, UnionValue, UnknownVariant};
use crate::Error;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::value::RawValue;
use serde_json::{Map, Value};
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::debug;

thread_local! {
    /// Registry and mode of the decode running on this thread.
    static SCOPE: RefCell<Option<(UnionRegistry, DecodeMode)>> = const { RefCell::new(None) };
    /// Typed error of the innermost nested decode that failed.
    static NESTED_ERROR: RefCell<Option<Error>> = const { RefCell::new(None) };
}

/// Held while a [`Decoder`] hands a payload to serde. Restores the previous
/// scope on drop.
struct DecodeScope {
    previous: Option<(UnionRegistry, DecodeMode)>,
}

impl DecodeScope {
    fn enter(registry: &UnionRegistry, mode: DecodeMode) -> Self {
        let previous = SCOPE.with(|cell| cell.replace(Some((registry.clone(), mode))));
        NESTED_ERROR.with(|cell| cell.borrow_mut().take());
        Self { previous }
    }
}

impl Drop for DecodeScope {
    fn drop(&mut self) {
        SCOPE.with(|cell| *cell.borrow_mut() = self.previous.take());
        NESTED_ERROR.with(|cell| cell.borrow_mut().take());
    }
}

/// Registry used by [`deserialize_nested`] outside of any [`Decoder`].
fn default_registry() -> &'static UnionRegistry {
    static DEFAULTS: OnceLock<UnionRegistry> = OnceLock::new();
    DEFAULTS.get_or_init(|| UnionRegistry::with_defaults().unwrap_or_default())
}

/// How to treat a discriminator value that matches no registered variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DecodeMode {
    /// Fall back to the union's `Unknown` case.
    #[default]
    Lenient,
    /// Fail with [`Error::UnknownVariant`].
    Strict,
}

/// Decodes union payloads against a [`UnionRegistry`].
///
/// Holds no per-call state; copy it freely. The registry and mode apply to
/// every union in the payload, nested ones included.
#[derive(Debug, Clone, Copy)]
pub struct Decoder<'r> {
    registry: &'r UnionRegistry,
    mode: DecodeMode,
}

impl<'r> Decoder<'r> {
    /// Lenient decoder over `registry`.
    pub fn new(registry: &'r UnionRegistry) -> Self {
        Self {
            registry,
            mode: DecodeMode::Lenient,
        }
    }

    pub fn with_mode(mut self, mode: DecodeMode) -> Self {
        self.mode = mode;
        self
    }

    /// Switches to [`DecodeMode::Strict`].
    pub fn strict(self) -> Self {
        self.with_mode(DecodeMode::Strict)
    }

    pub fn mode(&self) -> DecodeMode {
        self.mode
    }

    /// Decodes one JSON object into `U`.
    ///
    /// # Errors
    ///
    /// - [`Error::MalformedPayload`]: not JSON, not an object, unusable or absent
    ///   discriminator (without a default variant), or a field of the wrong type.
    /// - [`Error::MissingRequiredField`]: the matched variant, or a union nested
    ///   in it, lacks a required field.
    /// - [`Error::UnknownVariant`]: unmatched discriminator in strict mode, at any depth.
    /// - [`Error::UnregisteredUnion`]: `U`, or a union nested in it, was never registered.
    pub fn decode<U: TaggedUnion>(&self, raw: &[u8]) -> Result<UnionValue<U>, Error> {
        let raw = self.parse_raw::<U>(raw)?;
        self.decode_raw(raw)
    }

    pub fn decode_str<U: TaggedUnion>(&self, raw: &str) -> Result<UnionValue<U>, Error> {
        self.decode(raw.as_bytes())
    }

    /// Decodes an already parsed value. The retained raw text is its compact serialization.
    pub fn decode_value<U: TaggedUnion>(&self, value: &Value) -> Result<UnionValue<U>, Error> {
        let descriptor = self.descriptor::<U>()?;
        let raw = serde_json::value::to_raw_value(value).map_err(|e| malformed(descriptor, e))?;
        self.decode_raw_with(descriptor, raw)
    }

    /// Decodes a single raw JSON value, keeping its text verbatim.
    pub fn decode_raw<U: TaggedUnion>(&self, raw: Box<RawValue>) -> Result<UnionValue<U>, Error> {
        let descriptor = self.descriptor::<U>()?;
        self.decode_raw_with(descriptor, raw)
    }

    /// Decodes `object` as `U` while retaining `raw` as the payload's original text.
    ///
    /// Used when the wire form wraps the union object (e.g. `{info, parts}`
    /// message items) and `object` is the unwrapped view of `raw`.
    pub(crate) fn decode_with_view<U: TaggedUnion>(
        &self,
        raw: Box<RawValue>,
        object: Map<String, Value>,
    ) -> Result<UnionValue<U>, Error> {
        let descriptor = self.descriptor::<U>()?;
        self.decode_object_with(descriptor, raw, object)
    }

    /// Decodes a JSON array of union objects.
    pub fn decode_list<U: TaggedUnion>(&self, raw: &[u8]) -> Result<Vec<UnionValue<U>>, Error> {
        let descriptor = self.descriptor::<U>()?;
        let items: Vec<Box<RawValue>> =
            serde_json::from_slice(raw).map_err(|e| malformed(descriptor, e))?;
        items
            .into_iter()
            .map(|item| self.decode_raw_with(descriptor, item))
            .collect()
    }

    /// Decodes a JSON array that may also arrive wrapped as `{"<key>": [...]}`.
    pub fn decode_wrapped_list<U: TaggedUnion>(
        &self,
        raw: &[u8],
        key: &str,
    ) -> Result<Vec<UnionValue<U>>, Error> {
        self.raw_items::<U>(raw, key)?
            .into_iter()
            .map(|item| self.decode_raw::<U>(item))
            .collect()
    }

    /// Parses `raw` as one JSON value without decoding it; invalid JSON is a
    /// [`Error::MalformedPayload`] of `U`.
    pub(crate) fn parse_raw<U: TaggedUnion>(&self, raw: &[u8]) -> Result<Box<RawValue>, Error> {
        let descriptor = self.descriptor::<U>()?;
        serde_json::from_slice(raw).map_err(|e| malformed(descriptor, e))
    }

    /// Splits a list body (bare or wrapped under `key`) into raw items.
    ///
    /// An object body without `key` is a [`Error::MalformedPayload`].
    pub(crate) fn raw_items<U: TaggedUnion>(
        &self,
        raw: &[u8],
        key: &str,
    ) -> Result<Vec<Box<RawValue>>, Error> {
        let descriptor = self.descriptor::<U>()?;
        let body: Box<RawValue> =
            serde_json::from_slice(raw).map_err(|e| malformed(descriptor, e))?;
        if body.get().trim_start().starts_with('{') {
            let mut wrapper: HashMap<String, Box<RawValue>> =
                serde_json::from_str(body.get()).map_err(|e| malformed(descriptor, e))?;
            let list = wrapper.remove(key).ok_or_else(|| Error::MalformedPayload {
                union: descriptor.name(),
                reason: format!("expected an array or an object with `{}`", key),
            })?;
            return serde_json::from_str(list.get()).map_err(|e| malformed(descriptor, e));
        }
        serde_json::from_str(body.get()).map_err(|e| malformed(descriptor, e))
    }

    fn descriptor<U: TaggedUnion>(&self) -> Result<&'r UnionDescriptor<U>, Error> {
        self.registry
            .get::<U>()
            .ok_or(Error::UnregisteredUnion(std::any::type_name::<U>()))
    }

    fn decode_raw_with<U: TaggedUnion>(
        &self,
        descriptor: &UnionDescriptor<U>,
        raw: Box<RawValue>,
    ) -> Result<UnionValue<U>, Error> {
        let value = serde_json::from_str::<Value>(raw.get()).map_err(|e| malformed(descriptor, e))?;
        let object = into_object(descriptor, value)?;
        self.decode_object_with(descriptor, raw, object)
    }

    fn decode_object_with<U: TaggedUnion>(
        &self,
        descriptor: &UnionDescriptor<U>,
        raw: Box<RawValue>,
        object: Map<String, Value>,
    ) -> Result<UnionValue<U>, Error> {
        let tag = read_tag(descriptor, &object)?;
        let fields = object.clone();
        let variant = {
            let _scope = DecodeScope::enter(self.registry, self.mode);
            decode_object(descriptor, self.mode, tag.clone(), object)?
        };
        Ok(UnionValue::new(raw, tag, fields, variant))
    }
}

/// `Deserialize` body for unions nested inside serde structs.
///
/// Inside a [`Decoder`] the nested union is decoded with that decoder's registry
/// and mode, and a failure reaches the caller as the same typed [`Error`] a
/// top-level decode would return. Plain serde use outside a decoder falls back
/// to the default registry, leniently.
pub fn deserialize_nested<'de, D, U>(deserializer: D) -> Result<U, D::Error>
where
    D: Deserializer<'de>,
    U: TaggedUnion,
{
    let value = Value::deserialize(deserializer)?;
    let scope = SCOPE.with(|cell| cell.borrow().clone());
    let result = match scope {
        Some((registry, mode)) => match registry.get::<U>() {
            Some(descriptor) => decode_nested_value(descriptor, mode, value),
            None => Err(Error::UnregisteredUnion(std::any::type_name::<U>())),
        },
        None => match default_registry().get::<U>() {
            Some(descriptor) => decode_nested_value(descriptor, DecodeMode::Lenient, value),
            None => decode_nested_value(&U::descriptor(), DecodeMode::Lenient, value),
        },
    };
    result.map_err(|e| {
        let message = e.to_string();
        NESTED_ERROR.with(|cell| *cell.borrow_mut() = Some(e));
        D::Error::custom(message)
    })
}

fn decode_nested_value<U: TaggedUnion>(
    descriptor: &UnionDescriptor<U>,
    mode: DecodeMode,
    value: Value,
) -> Result<U, Error> {
    let object = into_object(descriptor, value)?;
    let tag = read_tag(descriptor, &object)?;
    decode_object(descriptor, mode, tag, object)
}

fn into_object<U>(descriptor: &UnionDescriptor<U>, value: Value) -> Result<Map<String, Value>, Error> {
    match value {
        Value::Object(object) => Ok(object),
        other => Err(Error::MalformedPayload {
            union: descriptor.name(),
            reason: format!("expected a JSON object, got {}", json_kind(&other)),
        }),
    }
}

/// Reads the discriminator as a string. Numbers and booleans are stringified.
fn read_tag<U>(
    descriptor: &UnionDescriptor<U>,
    object: &Map<String, Value>,
) -> Result<Option<String>, Error> {
    match object.get(descriptor.discriminator()) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(Error::MalformedPayload {
            union: descriptor.name(),
            reason: format!(
                "discriminator `{}` must be a scalar, got {}",
                descriptor.discriminator(),
                json_kind(other)
            ),
        }),
    }
}

fn decode_object<U: TaggedUnion>(
    descriptor: &UnionDescriptor<U>,
    mode: DecodeMode,
    tag: Option<String>,
    object: Map<String, Value>,
) -> Result<U, Error> {
    let selected = match (tag.as_deref(), descriptor.default_variant_value()) {
        (Some(tag), _) => tag,
        (None, Some(default)) => default,
        (None, None) => {
            return Err(Error::MalformedPayload {
                union: descriptor.name(),
                reason: format!("missing discriminator field `{}`", descriptor.discriminator()),
            })
        }
    };

    let Some(variant) = descriptor.find(selected) else {
        return match mode {
            DecodeMode::Strict => Err(Error::UnknownVariant {
                union: descriptor.name(),
                field: descriptor.discriminator(),
                value: selected.to_string(),
            }),
            DecodeMode::Lenient => {
                debug!(
                    union = descriptor.name(),
                    tag = %selected,
                    "unknown variant, keeping raw fields"
                );
                Ok(U::unknown(UnknownVariant::new(tag, object)))
            }
        };
    };

    if let Some(field) = variant
        .required()
        .iter()
        .find(|field| object.get(**field).map_or(true, Value::is_null))
    {
        return Err(Error::MissingRequiredField {
            union: descriptor.name(),
            variant: selected.to_string(),
            field: *field,
        });
    }

    variant.decode(Value::Object(object)).map_err(|e| {
        // A nested union failed: report its typed error, not serde's message.
        NESTED_ERROR
            .with(|cell| cell.borrow_mut().take())
            .unwrap_or_else(|| Error::MalformedPayload {
                union: descriptor.name(),
                reason: format!("variant `{}`: {}", selected, e),
            })
    })
}

fn malformed<U>(descriptor: &UnionDescriptor<U>, e: serde_json::Error) -> Error {
    Error::MalformedPayload {
        union: descriptor.name(),
        reason: e.to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
