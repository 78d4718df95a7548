use std::time::Duration;

use crate::ConfigError;

/// Timeout used when a query does not set one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);

const BASE_URL_VAR: &str = "NETWORK_BASE_URL";
const TIMEOUT_VAR: &str = "NETWORK_TIMEOUT_MS";

/// Client wide configuration.
/// Established once when the client is provided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    /// Base URL every query path is joined onto.
    pub base_url: String,
    /// Timeout for queries that don't set one.
    pub default_timeout: Duration,
}

impl NetworkConfig {
    /// Configuration with the given base URL and the default timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            default_timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Reads `NETWORK_BASE_URL` and, if set, `NETWORK_TIMEOUT_MS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url =
            std::env::var(BASE_URL_VAR).map_err(|_| ConfigError::Missing(BASE_URL_VAR))?;
        let config = NetworkConfig::new(base_url);

        match std::env::var(TIMEOUT_VAR) {
            Ok(timeout) => {
                let millis = timeout
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidTimeout(timeout.clone()))?;
                Ok(config.set_default_timeout(Duration::from_millis(millis)))
            }
            Err(_) => Ok(config),
        }
    }

    /// Set the default timeout.
    pub fn set_default_timeout(self, default_timeout: Duration) -> Self {
        NetworkConfig {
            default_timeout,
            ..self
        }
    }

    /// Joins `path` onto the base URL with a single `/`.
    pub fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
