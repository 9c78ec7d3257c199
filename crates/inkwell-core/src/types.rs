//! Wire types exchanged with the Inkwell backend API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Response of `GET /healthz`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthSnapshot {
    /// Whether the backend considers itself healthy
    pub ok: bool,

    /// Process uptime in seconds, possibly fractional
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uptime: Option<f64>,

    /// Failure reason reported by the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HealthSnapshot {
    /// Uptime rounded to whole seconds; negative or non-finite values are dropped
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn uptime_seconds(&self) -> Option<u64> {
        self.uptime
            .filter(|uptime| uptime.is_finite() && *uptime >= 0.0)
            .map(|uptime| uptime.round() as u64)
    }
}

/// Response of `GET /api/db/now`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbTime {
    /// Database server time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub now: Option<DateTime<Utc>>,

    /// Error reported instead of a timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Backend-owned boolean flag, as read from and written to
/// `/api/admin/coming-soon`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureFlag {
    /// Whether the flag is on
    pub enabled: bool,
}

impl FeatureFlag {
    /// Create a flag with the given state
    #[must_use]
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Short state label
    #[must_use]
    pub const fn label(self) -> &'static str {
        if self.enabled { "Enabled" } else { "Disabled" }
    }

    /// What the coming-soon flag means for site visitors
    #[must_use]
    pub const fn visitor_label(self) -> &'static str {
        if self.enabled {
            "Visitors Blocked"
        } else {
            "Site Live"
        }
    }
}
