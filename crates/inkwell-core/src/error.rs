//! Error types for the Inkwell admin dashboard

use thiserror::Error;

/// Main error type for startup and configuration concerns
///
/// Request failures inside widgets never use this type; they are stored as
/// messages in the widget that issued them.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {message}")]
    Configuration {
        /// Error message
        message: String,
    },

    /// Logging subsystem could not be initialized
    #[error("Logging error: {message}")]
    Logging {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a new configuration error
    #[must_use]
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a new logging error
    #[must_use]
    pub fn logging<S: Into<String>>(message: S) -> Self {
        Self::Logging {
            message: message.into(),
        }
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Self::configuration(err.to_string())
    }
}
