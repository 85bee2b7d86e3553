//! OpenCode SDK for Rust
//!
//! Type-safe HTTP client for [OpenCode Server](https://opencode.ai/docs/server) API.
//!
//! Polymorphic responses (messages, parts, tool states, errors, events) are
//! tagged unions: closed enums decoded through a [`UnionRegistry`] built once and
//! shared by the [`Client`]. Unknown variants decode to an explicit `Unknown` case
//! unless the client is built with [`ClientBuilder::strict_unions`].
//!
//! ```no_run
//! use opencode_sdk::Client;
//!
//! # async fn run() -> Result<(), opencode_sdk::Error> {
//! let client = Client::from_env()?;
//! for message in client.session_messages("ses_123", None).await? {
//!     println!("{:?}: {}", message.tag(), message.variant().text_content());
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod event;
pub mod file;
pub mod log;
pub mod request;
pub mod session;
pub mod transport;
pub mod union;

pub use client::{Client, ClientBuilder, HealthResponse, DEFAULT_BASE_URL};
pub use error::Error;
pub use event::{Event, EventStream};
pub use log::init_logger;
pub use request::ApiRequest;
pub use transport::{ByteStream, ReqwestTransport, Transport};
pub use union::{DecodeMode, Decoder, TaggedUnion, UnionRegistry, UnionValue, UnknownVariant};
