//! Relay error types.

use thiserror::Error;

/// Coarse classification used by the HTTP boundary to pick a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Upstream,
    Internal,
}

/// Errors that can occur while relaying a chat message.
///
/// `Display` is the caller-visible message. It never contains the credential.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("DEEPSEEK_API_KEY not found in environment variables")]
    MissingCredential,

    #[error("API Error: {body}")]
    Upstream { status: u16, body: String },

    #[error("{0}")]
    Internal(String),
}

impl RelayError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RelayError::MissingCredential => ErrorKind::Configuration,
            RelayError::Upstream { .. } => ErrorKind::Upstream,
            RelayError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Status the upstream answered with, for [`ErrorKind::Upstream`] errors.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            RelayError::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for RelayError {
    fn from(e: reqwest::Error) -> Self {
        // The endpoint stays out of caller-visible messages.
        RelayError::Internal(e.without_url().to_string())
    }
}

impl From<serde_json::Error> for RelayError {
    fn from(e: serde_json::Error) -> Self {
        RelayError::Internal(format!("invalid upstream response: {e}"))
    }
}
