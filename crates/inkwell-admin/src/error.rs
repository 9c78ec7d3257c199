//! Request errors surfaced to widgets

use thiserror::Error;

/// Result type alias for backend calls
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors produced by a backend call
///
/// Every variant carries only strings so that an error can be cloned into
/// a widget's error slot and compared in tests.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// No usable base URL; the call was not attempted
    #[error("API base URL is not configured")]
    NotConfigured,

    /// Network failure, timeout or connection refusal
    #[error("Request failed: {message}")]
    Transport {
        /// Error message
        message: String,
    },

    /// Non-success HTTP status
    #[error("HTTP {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Message from the response body, or the canonical reason
        message: String,
    },

    /// Response body could not be parsed
    #[error("Invalid response body: {message}")]
    Decode {
        /// Error message
        message: String,
    },

    /// Successful response that reports an application error
    #[error("{message}")]
    Backend {
        /// Error message
        message: String,
    },
}

impl ApiError {
    /// Create a new transport error
    #[must_use]
    pub fn transport<S: Into<String>>(message: S) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a new decode error
    #[must_use]
    pub fn decode<S: Into<String>>(message: S) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a new backend error
    #[must_use]
    pub fn backend<S: Into<String>>(message: S) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    /// Whether the error stems from missing configuration rather than the
    /// network or the backend
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::NotConfigured)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::decode(err.to_string())
        } else if err.is_timeout() {
            Self::transport(format!("timed out: {err}"))
        } else {
            Self::transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            ApiError::NotConfigured.to_string(),
            "API base URL is not configured"
        );
        assert_eq!(
            ApiError::transport("connection refused").to_string(),
            "Request failed: connection refused"
        );
        assert_eq!(
            ApiError::Status {
                status: 503,
                message: "Service Unavailable".to_string(),
            }
            .to_string(),
            "HTTP 503: Service Unavailable"
        );
        assert_eq!(ApiError::backend("db offline").to_string(), "db offline");
    }

    #[test]
    fn test_configuration_classification() {
        assert!(ApiError::NotConfigured.is_configuration());
        assert!(!ApiError::decode("eof").is_configuration());
    }
}
