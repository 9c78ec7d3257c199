//! Core types and utilities for the Inkwell admin dashboard

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{AdminConfig, ApiConfig, LoggingConfig, UiConfig};
pub use error::{Error, Result};
pub use types::{DbTime, FeatureFlag, HealthSnapshot};

/// Initialize the logging system
///
/// `RUST_LOG` takes precedence over `level`. `format` selects between
/// `json` and human-readable `pretty` output. Logs go to stderr so that
/// rendered views on stdout stay clean.
///
/// # Errors
///
/// Returns an error if the level is not a valid filter or a global
/// subscriber has already been installed.
pub fn init_logging(level: &str, format: &str) -> Result<()> {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)
            .map_err(|e| Error::logging(format!("invalid log level '{level}': {e}")))?,
    };

    let subscriber = tracing_subscriber::registry().with(env_filter);

    let result = if format == "json" {
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
            .try_init()
    };

    result.map_err(|e| Error::logging(e.to_string()))
}
