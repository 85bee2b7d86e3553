//! Registry of union descriptors, built once and shared read-only.

use super::{TaggedUnion, UnionDescriptor};
use crate::event::{Event, SessionStatus};
use crate::session::{AssistantMessageError, AssistantMessagePart, Message, Part, ToolState, UserMessagePart};
use crate::Error;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
struct Entry {
    name: &'static str,
    discriminator: &'static str,
    descriptor: Arc<dyn Any + Send + Sync>,
}

/// Maps each union type to its descriptor.
///
/// Registration needs `&mut self`; once the registry is wrapped in an `Arc` and
/// handed to a [`Client`](crate::Client) it can only be read, so decoders never
/// observe a table that is still changing. Cloning shares the table.
#[derive(Clone, Default)]
pub struct UnionRegistry {
    entries: Arc<HashMap<TypeId, Entry>>,
}

impl UnionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every union used by the SDK's response types.
    pub fn with_defaults() -> Result<Self, Error> {
        let mut registry = Self::new();
        registry
            .register_union::<Message>()?
            .register_union::<UserMessagePart>()?
            .register_union::<AssistantMessagePart>()?
            .register_union::<Part>()?
            .register_union::<ToolState>()?
            .register_union::<AssistantMessageError>()?
            .register_union::<Event>()?
            .register_union::<SessionStatus>()?;
        Ok(registry)
    }

    /// Registers `descriptor` for `U`.
    ///
    /// Registering a union that is already present replaces its descriptor.
    /// A descriptor listing the same discriminator value twice is rejected with
    /// [`Error::DuplicateVariant`] and leaves the registry unchanged.
    pub fn register<U: TaggedUnion>(
        &mut self,
        descriptor: UnionDescriptor<U>,
    ) -> Result<&mut Self, Error> {
        descriptor.check_duplicates()?;
        let entry = Entry {
            name: descriptor.name(),
            discriminator: descriptor.discriminator(),
            descriptor: Arc::new(descriptor),
        };
        let entries = Arc::make_mut(&mut self.entries);
        if let Some(previous) = entries.insert(TypeId::of::<U>(), entry) {
            debug!(union = previous.name, "replaced union registration");
        }
        Ok(self)
    }

    /// Registers the built-in descriptor of `U`.
    pub fn register_union<U: TaggedUnion>(&mut self) -> Result<&mut Self, Error> {
        self.register(U::descriptor())
    }

    /// Descriptor registered for `U`, if any.
    pub fn get<U: TaggedUnion>(&self) -> Option<&UnionDescriptor<U>> {
        self.entries
            .get(&TypeId::of::<U>())
            .and_then(|entry| entry.descriptor.downcast_ref::<UnionDescriptor<U>>())
    }

    pub fn contains<U: TaggedUnion>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<U>())
    }

    /// Number of registered unions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for UnionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut unions: Vec<_> = self
            .entries
            .values()
            .map(|entry| (entry.name, entry.discriminator))
            .collect();
        unions.sort_unstable();
        f.debug_struct("UnionRegistry").field("unions", &unions).finish()
    }
}
