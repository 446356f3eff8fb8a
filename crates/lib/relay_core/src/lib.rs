//! # relay_core
//!
//! Core relay logic: chat shapes, upstream configuration and the relay itself.

pub mod chat;
pub mod config;
pub mod error;
pub mod log;
pub mod relay;

pub use chat::{ChatRequest, ChatResponse};
pub use config::{Credential, RelayConfig};
pub use error::{ErrorKind, RelayError};
pub use log::{RelayEvent, RelayLog, TracingLog};
pub use relay::{MAX_UPSTREAM_BODY_BYTES, Relay};

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
