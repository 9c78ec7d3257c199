//! Configuration management for the Inkwell admin dashboard

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment variable holding the backend base URL
pub const BASE_URL_ENV: &str = "INKWELL_API_BASE_URL";

/// Prefix for all other environment overrides (`INKWELL_UI__NOTICE_TTL_SECS`)
pub const ENV_PREFIX: &str = "INKWELL";

/// Default configuration file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "inkwell-admin";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminConfig {
    /// Backend API configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Dashboard behaviour
    #[serde(default)]
    pub ui: UiConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the backend; `None` leaves the dashboard misconfigured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Dashboard behaviour configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    /// How long a success notice stays visible, in seconds
    #[serde(default = "default_notice_ttl_secs")]
    pub notice_ttl_secs: u64,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format (pretty, json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

const fn default_timeout_secs() -> u64 {
    30
}

const fn default_notice_ttl_secs() -> u64 {
    3
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            notice_ttl_secs: default_notice_ttl_secs(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl AdminConfig {
    /// Load configuration from the default file and the environment
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or parsed.
    pub fn load() -> crate::Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration from an explicit file (required) or the default
    /// file (optional), then apply environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if the explicit file is missing, or if any source
    /// cannot be parsed.
    pub fn load_from(path: Option<&Path>) -> crate::Result<Self> {
        let builder = config::Config::builder();

        let builder = match path {
            Some(path) => builder.add_source(config::File::from(path).required(true)),
            None => builder.add_source(config::File::with_name(DEFAULT_CONFIG_FILE).required(false)),
        };

        let config = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("api.base_url", std::env::var(BASE_URL_ENV).ok())?
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Per-request timeout
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    /// Lifetime of a success notice
    #[must_use]
    pub const fn notice_ttl(&self) -> Duration {
        Duration::from_secs(self.ui.notice_ttl_secs)
    }
}
