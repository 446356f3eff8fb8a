//! API server configuration.

use relay_core::RelayConfig;

/// Address the HTTP listener binds to when `BIND_ADDR` is unset.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "0.0.0.0:8000").
    pub bind_addr: String,
    /// Upstream relay settings.
    pub relay: RelayConfig,
}

impl ApiConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable    | Default        |
    /// |-------------|----------------|
    /// | `BIND_ADDR` | `0.0.0.0:8000` |
    ///
    /// Relay variables are documented on [`RelayConfig::from_env`].
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.into()),
            relay: RelayConfig::from_env(),
        }
    }
}
