//! The chat relay — forwards one message upstream and returns the reply.
//!
//! Each call to [`Relay::handle`] is a single stateless pass:
//! 1. Resolve the credential (fail before any I/O when absent)
//! 2. Build a single-turn upstream payload
//! 3. POST it once, bounded by the configured timeout (no retries, no redirects)
//! 4. Map a non-2xx status to [`RelayError::Upstream`]
//! 5. Decode the completion and return the first choice's content

use std::sync::Arc;
use std::time::Instant;

use chrono::Local;
use reqwest::redirect::Policy;
use reqwest::{Client, Response};

use crate::chat::{ChatRequest, ChatResponse, Completion, PREVIEW_CHARS, UpstreamPayload, preview};
use crate::config::RelayConfig;
use crate::error::RelayError;
use crate::log::{RelayEvent, RelayLog, TracingLog};

/// Largest upstream body the relay will buffer.
pub const MAX_UPSTREAM_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Relays chat messages to the upstream completion API.
///
/// Cheap to share behind an `Arc`; holds a pooled HTTP client and read-only
/// configuration.
pub struct Relay {
    client: Client,
    config: RelayConfig,
    log: Arc<dyn RelayLog>,
}

impl Relay {
    /// Builds a relay that logs through [`TracingLog`].
    pub fn new(config: RelayConfig) -> Result<Self, RelayError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .redirect(Policy::none())
            .build()
            .map_err(|e| RelayError::Internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            config,
            log: Arc::new(TracingLog),
        })
    }

    /// Replaces the log sink.
    pub fn with_log(mut self, log: Arc<dyn RelayLog>) -> Self {
        self.log = log;
        self
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Relays `request` upstream. Every failure is logged before it is returned.
    pub async fn handle(&self, request: &ChatRequest) -> Result<ChatResponse, RelayError> {
        let started = Instant::now();
        self.log.info(RelayEvent::Received {
            at: Local::now(),
            message: &request.message,
        });

        let result = self.forward(&request.message).await;

        match &result {
            Ok(_) => self.log.info(RelayEvent::Completed {
                elapsed: started.elapsed(),
            }),
            Err(e) => self.log.error(e, Local::now()),
        }
        result
    }

    async fn forward(&self, message: &str) -> Result<ChatResponse, RelayError> {
        let credential = self
            .config
            .credential
            .as_ref()
            .ok_or(RelayError::MissingCredential)?;
        self.log.info(RelayEvent::CredentialResolved);

        let payload = UpstreamPayload::single_turn(message);
        self.log.info(RelayEvent::PayloadBuilt {
            model: payload.model,
            turns: payload.messages.len(),
        });

        self.log.info(RelayEvent::UpstreamStarted {
            endpoint: &self.config.endpoint,
        });
        let call_started = Instant::now();
        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(credential.expose())
            .json(&payload)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        self.log.info(RelayEvent::UpstreamFinished {
            status: status.as_u16(),
            elapsed: call_started.elapsed(),
        });

        let body = self.read_body(response).await?;

        if !status.is_success() {
            return Err(RelayError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let reply = serde_json::from_str::<Completion>(&body)?
            .into_reply()
            .ok_or_else(|| RelayError::Internal("upstream response contained no choices".into()))?;

        self.log.info(RelayEvent::ReplyReceived {
            preview: preview(&reply, PREVIEW_CHARS),
        });

        Ok(ChatResponse { response: reply })
    }

    /// Buffers the upstream body, refusing anything over [`MAX_UPSTREAM_BODY_BYTES`].
    async fn read_body(&self, mut response: Response) -> Result<String, RelayError> {
        let mut buf = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(|e| self.transport_error(e))? {
            if buf.len() + chunk.len() > MAX_UPSTREAM_BODY_BYTES {
                return Err(RelayError::Internal(format!(
                    "upstream response exceeded {MAX_UPSTREAM_BODY_BYTES} bytes"
                )));
            }
            buf.extend_from_slice(&chunk);
        }
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    fn transport_error(&self, e: reqwest::Error) -> RelayError {
        if e.is_timeout() {
            RelayError::Internal(format!(
                "upstream request timed out after {:?}",
                self.config.timeout
            ))
        } else {
            RelayError::from(e)
        }
    }
}
