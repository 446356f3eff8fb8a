//! Relay log capability.
//!
//! The relay reports each stage of a request through a [`RelayLog`] instead
//! of calling a logger directly, so callers can swap in their own sink.
//! [`TracingLog`] is the default and emits structured `tracing` events.

use std::time::Duration;

use chrono::{DateTime, Local};
use tracing::{debug, error, info};

use crate::error::RelayError;

/// A stage of a successful relay pass.
#[derive(Debug, Clone, PartialEq)]
pub enum RelayEvent<'a> {
    Received {
        at: DateTime<Local>,
        message: &'a str,
    },
    CredentialResolved,
    PayloadBuilt {
        model: &'a str,
        turns: usize,
    },
    UpstreamStarted {
        endpoint: &'a str,
    },
    UpstreamFinished {
        status: u16,
        elapsed: Duration,
    },
    ReplyReceived {
        preview: &'a str,
    },
    Completed {
        elapsed: Duration,
    },
}

/// Sink for relay progress and failures. Implementations must not fail or block.
pub trait RelayLog: Send + Sync {
    fn info(&self, event: RelayEvent<'_>);

    fn error(&self, failure: &RelayError, at: DateTime<Local>);
}

/// Forwards relay events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLog;

impl RelayLog for TracingLog {
    fn info(&self, event: RelayEvent<'_>) {
        match event {
            RelayEvent::Received { at, message } => {
                info!(
                    at = %at.to_rfc3339(),
                    chars = message.chars().count(),
                    "chat request received"
                );
                debug!(text = message, "chat request message");
            }
            RelayEvent::CredentialResolved => info!("upstream credential configured"),
            RelayEvent::PayloadBuilt { model, turns } => {
                info!(model, turns, "upstream payload built");
            }
            RelayEvent::UpstreamStarted { endpoint } => {
                info!(endpoint, "sending request upstream");
            }
            RelayEvent::UpstreamFinished { status, elapsed } => {
                info!(status, elapsed_secs = elapsed.as_secs_f64(), "upstream responded");
            }
            RelayEvent::ReplyReceived { preview } => info!(preview, "upstream reply"),
            RelayEvent::Completed { elapsed } => {
                info!(elapsed_secs = elapsed.as_secs_f64(), "chat request completed");
            }
        }
    }

    fn error(&self, failure: &RelayError, at: DateTime<Local>) {
        error!(
            kind = ?failure.kind(),
            at = %at.to_rfc3339(),
            "chat request failed: {failure}"
        );
    }
}
