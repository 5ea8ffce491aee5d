//! Remote API client configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_scheme() -> String {
    "http".to_string()
}

fn default_api_prefix() -> String {
    "/api".to_string()
}

/// Default number of cascade queries kept in flight at once.
const fn default_max_in_flight() -> usize {
    8
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    /// URL scheme used to reach the API server (`http` or `https`).
    #[serde(default = "default_scheme")]
    pub scheme: String,

    /// Path prefix prepended to every endpoint path.
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,

    /// Per-request timeout in seconds. `0` keeps the transport default.
    #[serde(default)]
    pub request_timeout_secs: u64,

    /// Upper bound on concurrent read queries during a cascade.
    #[serde(default = "default_max_in_flight")]
    pub max_in_flight: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            scheme: default_scheme(),
            api_prefix: default_api_prefix(),
            request_timeout_secs: 0,
            max_in_flight: default_max_in_flight(),
        }
    }
}

impl ClientConfig {
    #[must_use]
    pub const fn request_timeout(&self) -> Option<Duration> {
        if self.request_timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.request_timeout_secs))
        }
    }

    /// Reject values the client cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for an unsupported scheme or a
    /// zero `max_in_flight`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !matches!(self.scheme.as_str(), "http" | "https") {
            return Err(ConfigError::InvalidValue {
                field: "client.scheme".into(),
                reason: format!("expected 'http' or 'https', got '{}'", self.scheme),
            });
        }
        if self.max_in_flight == 0 {
            return Err(ConfigError::InvalidValue {
                field: "client.max_in_flight".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// `api_prefix` with exactly one leading slash and no trailing slash.
    #[must_use]
    pub fn normalized_prefix(&self) -> String {
        let trimmed = self.api_prefix.trim_matches('/');
        if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{trimmed}")
        }
    }
}
