//! Self-contained widgets, each owning its own request lifecycle

pub mod status;
pub mod toggle;

use chrono::{DateTime, Utc};
use inkwell_core::HealthSnapshot;

pub use status::StatusWidget;
pub use toggle::{Notice, Phase, ToggleIntent, ToggleWidget};

/// Backend health check
pub type HealthWidget = StatusWidget<HealthSnapshot>;

/// Database clock check
pub type DbTimeWidget = StatusWidget<DateTime<Utc>>;

/// Generic API ping showing the echoed JSON
pub type ApiTestWidget = StatusWidget<serde_json::Value>;
