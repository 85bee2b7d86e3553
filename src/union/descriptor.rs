//! Union descriptors: the discriminator field plus the ordered variant table.

use crate::Error;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;

/// A concrete variant struct of a tagged union.
///
/// `REQUIRED` lists the JSON field names that must be present and non-null
/// before the payload is handed to serde. The discriminator field itself is
/// not listed; the enum variant already carries it.
pub trait Shape: DeserializeOwned {
    const REQUIRED: &'static [&'static str];
}

type DecodeFn<U> = Box<dyn Fn(Value) -> Result<U, serde_json::Error> + Send + Sync>;

/// One `(discriminator value -> shape)` entry of a union.
pub struct Variant<U> {
    value: &'static str,
    required: &'static [&'static str],
    decode: DecodeFn<U>,
}

impl<U> Variant<U> {
    /// Discriminator value selecting this variant (exact, case-sensitive).
    pub fn value(&self) -> &'static str {
        self.value
    }

    /// Required JSON fields of the target shape.
    pub fn required(&self) -> &'static [&'static str] {
        self.required
    }

    pub(crate) fn decode(&self, object: Value) -> Result<U, serde_json::Error> {
        (self.decode)(object)
    }
}

impl<U> fmt::Debug for Variant<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Variant")
            .field("value", &self.value)
            .field("required", &self.required)
            .finish()
    }
}

/// Describes how to decode one union type `U`.
///
/// # Example
///
/// ```
/// use opencode_sdk::union::UnionDescriptor;
/// use opencode_sdk::session::{AssistantMessagePart, StepStartPart, TextPart, ToolPart};
///
/// let descriptor = UnionDescriptor::new("AssistantMessagePart", "type")
///     .variant::<TextPart>("text", AssistantMessagePart::Text)
///     .variant::<ToolPart>("tool", AssistantMessagePart::Tool)
///     .variant::<StepStartPart>("step-start", AssistantMessagePart::StepStart);
/// assert_eq!(descriptor.variants().len(), 3);
/// ```
pub struct UnionDescriptor<U> {
    name: &'static str,
    discriminator: &'static str,
    default_variant: Option<&'static str>,
    variants: Vec<Variant<U>>,
}

impl<U: 'static> UnionDescriptor<U> {
    /// Starts a descriptor for the union `name` keyed by the `discriminator` field.
    pub fn new(name: &'static str, discriminator: &'static str) -> Self {
        Self {
            name,
            discriminator,
            default_variant: None,
            variants: Vec::new(),
        }
    }

    /// Appends a variant: payloads whose discriminator equals `value` decode as `S`
    /// and are wrapped into the union with `wrap`.
    pub fn variant<S>(mut self, value: &'static str, wrap: fn(S) -> U) -> Self
    where
        S: Shape + 'static,
    {
        self.variants.push(Variant {
            value,
            required: S::REQUIRED,
            decode: Box::new(move |object| serde_json::from_value::<S>(object).map(wrap)),
        });
        self
    }

    /// Variant used when the discriminator field is absent from the payload.
    pub fn default_variant(mut self, value: &'static str) -> Self {
        self.default_variant = Some(value);
        self
    }
}

impl<U> UnionDescriptor<U> {
    /// Union name used in errors and logs.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Name of the discriminator field.
    pub fn discriminator(&self) -> &'static str {
        self.discriminator
    }

    pub fn default_variant_value(&self) -> Option<&'static str> {
        self.default_variant
    }

    /// Registered variants in registration order.
    pub fn variants(&self) -> &[Variant<U>] {
        &self.variants
    }

    /// First variant whose value equals `value`.
    pub fn find(&self, value: &str) -> Option<&Variant<U>> {
        self.variants.iter().find(|v| v.value == value)
    }

    /// Rejects tables that register the same discriminator value twice.
    pub(crate) fn check_duplicates(&self) -> Result<(), Error> {
        let mut seen = HashSet::new();
        for variant in &self.variants {
            if !seen.insert(variant.value) {
                return Err(Error::DuplicateVariant {
                    union: self.name,
                    value: variant.value.to_string(),
                });
            }
        }
        Ok(())
    }
}

impl<U> fmt::Debug for UnionDescriptor<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnionDescriptor")
            .field("name", &self.name)
            .field("discriminator", &self.discriminator)
            .field("default_variant", &self.default_variant)
            .field("variants", &self.variants)
            .finish()
    }
}
