//! Client configuration.
//!
//! # Examples
//!
//! ```
//! use streamr_client::client::ClientConfig;
//!
//! let config = ClientConfig {
//!     api_key: "my-api-key".to_string(),
//!     request_timeout_ms: 5_000,
//!     ..Default::default()
//! };
//! assert_eq!(config.base_url, "https://www.streamr.com/api/v1/");
//! ```

use crate::error::{Result, StreamrError};
use std::time::Duration;

/// Production API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://www.streamr.com/api/v1/";

/// Environment variable holding the API key.
pub const ENV_API_KEY: &str = "STREAMR_API_KEY";
/// Environment variable overriding the base URL.
pub const ENV_BASE_URL: &str = "STREAMR_BASE_URL";
/// Environment variable overriding the request timeout, in milliseconds.
pub const ENV_TIMEOUT_MS: &str = "STREAMR_TIMEOUT_MS";

/// Configuration for [`StreamrClient`](crate::StreamrClient).
#[derive(Clone)]
pub struct ClientConfig {
    /// API root every request path is resolved against
    pub base_url: String,

    /// Key sent as `Authorization: Token <api_key>`
    ///
    /// Opaque to the client; it is not validated locally.
    pub api_key: String,

    /// Deadline for a whole request, from connect to the last body byte
    pub request_timeout_ms: u64,

    /// Deadline for establishing a connection
    pub connect_timeout_ms: u64,

    /// Emit `tracing` events for dispatched requests
    pub enable_logging: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            request_timeout_ms: 30_000,
            connect_timeout_ms: 10_000,
            enable_logging: true,
        }
    }
}

impl ClientConfig {
    /// Default configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        ClientConfig {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Read configuration from `STREAMR_API_KEY`, `STREAMR_BASE_URL` and
    /// `STREAMR_TIMEOUT_MS`. Only the API key is required.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = lookup(ENV_API_KEY)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| StreamrError::Config(format!("{} is not set", ENV_API_KEY)))?;

        let mut config = ClientConfig::new(api_key);
        if let Some(base_url) = lookup(ENV_BASE_URL) {
            config.base_url = base_url;
        }
        if let Some(timeout) = lookup(ENV_TIMEOUT_MS) {
            config.request_timeout_ms = timeout.trim().parse().map_err(|_| {
                StreamrError::Config(format!("{} must be a number, got '{}'", ENV_TIMEOUT_MS, timeout))
            })?;
        }
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would make every request fail.
    pub fn validate(&self) -> Result<()> {
        if self.request_timeout_ms == 0 {
            return Err(StreamrError::Config(
                "request timeout must be greater than zero".to_string(),
            ));
        }
        if self.connect_timeout_ms == 0 {
            return Err(StreamrError::Config(
                "connect timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Point the client at another API root, mostly for tests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the per-request deadline.
    ///
    /// Durations beyond `u64::MAX` milliseconds saturate.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Per-request deadline.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Connection deadline.
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("request_timeout_ms", &self.request_timeout_ms)
            .field("connect_timeout_ms", &self.connect_timeout_ms)
            .field("enable_logging", &self.enable_logging)
            .finish()
    }
}
