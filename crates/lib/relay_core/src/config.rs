//! Relay configuration.

use std::fmt;
use std::time::Duration;

/// Upstream chat-completion endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "https://api.deepseek.com/v1/chat/completions";

/// Upstream call timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable holding the upstream credential.
pub const CREDENTIAL_VAR: &str = "DEEPSEEK_API_KEY";

/// Bearer token for the upstream API.
///
/// Formatting never reveals the value; use [`Credential::expose`] when
/// building the authorization header.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wraps a raw token. Returns `None` for an empty string.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        (!raw.is_empty()).then_some(Self(raw))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

/// Configuration for [`crate::Relay`].
#[derive(Clone, Debug)]
pub struct RelayConfig {
    /// Chat-completion URL the relay posts to.
    pub endpoint: String,
    /// Upper bound on a single upstream call.
    pub timeout: Duration,
    /// Upstream credential. Absence is reported per request, not at load time.
    pub credential: Option<Credential>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
            timeout: DEFAULT_TIMEOUT,
            credential: None,
        }
    }
}

impl RelayConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable             | Default                                          |
    /// |----------------------|--------------------------------------------------|
    /// | `DEEPSEEK_API_KEY`   | unset (requests fail with a configuration error) |
    /// | `RELAY_UPSTREAM_URL` | `https://api.deepseek.com/v1/chat/completions`   |
    /// | `RELAY_TIMEOUT_SECS` | `30`                                             |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`RelayConfig::from_env`] over an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            endpoint: lookup("RELAY_UPSTREAM_URL")
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.endpoint),
            timeout: lookup("RELAY_TIMEOUT_SECS")
                .and_then(|v| v.trim().parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            credential: lookup(CREDENTIAL_VAR).and_then(Credential::new),
        }
    }

    /// Builder-style credential override.
    pub fn with_credential(mut self, raw: impl Into<String>) -> Self {
        self.credential = Credential::new(raw);
        self
    }
}
