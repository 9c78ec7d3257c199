//! Plain-text rendering of banners, widgets, pages and navigation

use crate::pages::{ApiTestPage, DashboardPage, SettingsPage};
use crate::shell::Shell;
use crate::state::RequestStatus;
use crate::widgets::{StatusWidget, ToggleWidget};
use chrono::{DateTime, Utc};
use inkwell_core::HealthSnapshot;
use inkwell_core::config::BASE_URL_ENV;

/// Persistent warning shown while the API base URL is missing
#[must_use]
pub fn misconfiguration_banner(misconfigured: bool) -> Option<String> {
    misconfigured.then(|| {
        format!(
            "WARNING: API base URL is not configured. Set {BASE_URL_ENV} to enable backend checks."
        )
    })
}

/// One-line summary of a health snapshot
#[must_use]
pub fn health_summary(health: &HealthSnapshot) -> String {
    match (health.ok, health.uptime_seconds(), health.error.as_deref()) {
        (true, Some(uptime), _) => format!("Healthy, uptime {uptime} seconds"),
        (true, None, _) => "Healthy".to_string(),
        (false, _, Some(error)) => format!("Unhealthy: {error}"),
        (false, _, None) => "Unhealthy".to_string(),
    }
}

/// One-line summary of the database clock
#[must_use]
pub fn db_time_summary(now: &DateTime<Utc>) -> String {
    format!("Database time {}", now.format("%Y-%m-%d %H:%M:%S UTC"))
}

/// Render a status widget as `Title: state`
pub fn status_line<T>(
    title: &str,
    widget: &StatusWidget<T>,
    describe: impl FnOnce(&T) -> String,
) -> String {
    let state = match (widget.status(), widget.data(), widget.error()) {
        (RequestStatus::Loading, _, _) => "Loading...".to_string(),
        (RequestStatus::Success, Some(data), _) => describe(data),
        (RequestStatus::Failure, _, Some(error)) => format!("Error: {error}"),
        _ => "Not checked".to_string(),
    };
    format!("{title}: {state}")
}

/// Render the coming-soon toggle
///
/// A cached value whose latest read failed is marked unconfirmed.
#[must_use]
pub fn toggle_lines(widget: &ToggleWidget) -> Vec<String> {
    let state = match (widget.cached(), widget.read().error()) {
        _ if widget.is_busy() => "Updating...".to_string(),
        (Some(flag), Some(error)) => format!(
            "{} ({}, unconfirmed: {error})",
            flag.label(),
            flag.visitor_label()
        ),
        (Some(flag), None) => format!("{} ({})", flag.label(), flag.visitor_label()),
        (None, Some(error)) => format!("Unknown (Error: {error})"),
        (None, None) => "Unknown".to_string(),
    };

    let mut lines = vec![format!("Coming soon mode: {state}")];
    if let Some(notice) = widget.notice() {
        lines.push(format!("  {}", notice.message()));
    }
    if let Some(error) = widget.toggle_error() {
        lines.push(format!("  Error: {error}"));
    }
    lines
}

/// Render the navigation bar, marking the active entry
#[must_use]
pub fn nav_line(shell: &Shell) -> String {
    shell
        .nav_items()
        .iter()
        .map(|item| {
            if item.active {
                format!("[{}]", item.label)
            } else {
                item.label.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

fn with_banner(misconfigured: bool, body: Vec<String>) -> String {
    misconfiguration_banner(misconfigured)
        .into_iter()
        .chain(body)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the dashboard page
#[must_use]
pub fn dashboard(page: &DashboardPage, misconfigured: bool) -> String {
    with_banner(
        misconfigured,
        vec![
            status_line("Health", page.health(), health_summary),
            status_line("Database", page.db_time(), db_time_summary),
        ],
    )
}

/// Render the settings page
#[must_use]
pub fn settings(page: &SettingsPage, misconfigured: bool) -> String {
    with_banner(misconfigured, toggle_lines(page.coming_soon()))
}

/// Render the API test page
#[must_use]
pub fn api_test(page: &ApiTestPage, misconfigured: bool) -> String {
    with_banner(
        misconfigured,
        vec![status_line("API", page.hello(), |value| {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        })],
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::mock::{MockBackend, WriteFailure};
    use crate::widgets::HealthWidget;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    #[test]
    fn test_banner_only_when_misconfigured() {
        assert!(misconfiguration_banner(false).is_none());
        assert!(
            misconfiguration_banner(true)
                .unwrap()
                .contains("INKWELL_API_BASE_URL")
        );
    }

    #[test]
    fn test_health_summary_rounds_uptime() {
        let health = HealthSnapshot {
            ok: true,
            uptime: Some(12345.0),
            error: None,
        };
        assert_eq!(health_summary(&health), "Healthy, uptime 12345 seconds");

        let unhealthy = HealthSnapshot {
            ok: false,
            uptime: None,
            error: Some("database unreachable".to_string()),
        };
        assert_eq!(health_summary(&unhealthy), "Unhealthy: database unreachable");
    }

    #[test]
    fn test_db_time_summary() {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 14, 25, 30).unwrap();
        assert_eq!(db_time_summary(&now), "Database time 2024-03-15 14:25:30 UTC");
    }

    #[test]
    fn test_status_line_states() {
        let mut widget = HealthWidget::new("health");
        assert_eq!(
            status_line("Health", &widget, health_summary),
            "Health: Not checked"
        );

        let ticket = widget.trigger().unwrap();
        assert_eq!(
            status_line("Health", &widget, health_summary),
            "Health: Loading..."
        );

        widget.settle(ticket, Err("HTTP 503: Service Unavailable".to_string()));
        assert_eq!(
            status_line("Health", &widget, health_summary),
            "Health: Error: HTTP 503: Service Unavailable"
        );
    }

    #[test]
    fn test_nav_line_marks_active_route() {
        assert_eq!(
            nav_line(&Shell::at("/settings/general")),
            "Dashboard | [Settings] | API Test"
        );
    }

    #[tokio::test]
    async fn test_settings_render_after_toggle() {
        let backend = MockBackend::new();
        let mut page = SettingsPage::mount(&backend, Duration::from_secs(3)).await;
        assert_eq!(settings(&page, false), "Coming soon mode: Disabled (Site Live)");

        page.toggle_coming_soon(&backend).await;

        assert_eq!(
            settings(&page, false),
            "Coming soon mode: Enabled (Visitors Blocked)\n  Coming soon mode enabled"
        );
    }

    #[tokio::test]
    async fn test_settings_render_marks_unconfirmed_value() {
        let backend = MockBackend::new()
            .with_write_failure(WriteFailure::AppliedThenFailed, ApiError::transport("reset"));
        let mut page = SettingsPage::mount(&backend, Duration::from_secs(3)).await;
        backend.set_read_failure(Some(ApiError::transport("offline")));

        page.toggle_coming_soon(&backend).await;

        assert_eq!(
            toggle_lines(page.coming_soon()),
            vec![
                "Coming soon mode: Disabled (Site Live, unconfirmed: Request failed: offline)"
                    .to_string(),
                "  Error: Failed to update coming soon mode: Request failed: reset".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_misconfigured_dashboard_shows_banner_and_errors() {
        let backend = MockBackend::new().misconfigured();
        let page = DashboardPage::mount(&backend).await;

        let text = dashboard(&page, true);

        assert!(text.starts_with("WARNING: API base URL is not configured"));
        assert!(text.contains("Health: Error: API base URL is not configured"));
    }
}
