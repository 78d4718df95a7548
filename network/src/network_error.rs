/// A failed request, as observed through [`RequestState::error`](crate::RequestState).
///
/// Every failure the executor can run into collapses into one of these two variants.
/// The underlying cause is logged, never surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum NetworkError {
    /// Non-ok response, undecodable body, or a transport failure.
    #[error("Something went wrong")]
    Generic,
    /// The timeout elapsed before the response arrived.
    #[error("TIME_OUT_ERROR")]
    Timeout,
}

impl NetworkError {
    /// The user facing message.
    pub fn message(&self) -> &'static str {
        match self {
            NetworkError::Generic => "Something went wrong",
            NetworkError::Timeout => "TIME_OUT_ERROR",
        }
    }

    /// Short name of the failure kind.
    pub fn name(&self) -> &'static str {
        match self {
            NetworkError::Generic => "error",
            NetworkError::Timeout => "AbortError",
        }
    }
}

/// Failure reported by a [`Transport`](crate::transport::Transport).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The method could not be turned into an HTTP method token.
    #[error("invalid http method: {0}")]
    InvalidMethod(String),
    /// The request could not be sent or the response body could not be read.
    #[error("request failed: {0}")]
    Request(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        TransportError::Request(error.to_string())
    }
}

/// Failure while loading a [`NetworkConfig`](crate::NetworkConfig) from the environment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is not set.
    #[error("missing environment variable {0}")]
    Missing(&'static str),
    /// The timeout variable is not a whole number of milliseconds.
    #[error("invalid timeout {0:?}, expected milliseconds")]
    InvalidTimeout(String),
}

/// Unknown request method name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown request method {0:?}")]
pub struct ParseMethodError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_display() {
        assert_eq!(NetworkError::Generic.to_string(), "Something went wrong");
        assert_eq!(NetworkError::Generic.message(), "Something went wrong");
        assert_eq!(NetworkError::Timeout.to_string(), "TIME_OUT_ERROR");
        assert_eq!(NetworkError::Timeout.message(), "TIME_OUT_ERROR");
    }

    #[test]
    fn names() {
        assert_eq!(NetworkError::Generic.name(), "error");
        assert_eq!(NetworkError::Timeout.name(), "AbortError");
    }
}
