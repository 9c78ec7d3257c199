//! Dashboard shell: route table, active-route highlighting and sign-out

use crate::backend::AdminBackend;
use tracing::{info, warn};

/// Pages reachable in the admin dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Health and database checks
    Dashboard,
    /// Site settings
    Settings,
    /// API connectivity test
    ApiTest,
    /// Public landing page, outside the shell
    Login,
    /// No matching route
    NotFound,
}

/// One navigation entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteEntry {
    /// Target route
    pub route: Route,
    /// Path segment
    pub path: &'static str,
    /// Navigation label
    pub label: &'static str,
    /// Index routes only match exactly
    pub index: bool,
}

/// Where sign-out lands
pub const LANDING_PATH: &str = "/login";

/// Navigation entries shown in the shell, in display order
pub const NAV_ROUTES: &[RouteEntry] = &[
    RouteEntry {
        route: Route::Dashboard,
        path: "/",
        label: "Dashboard",
        index: true,
    },
    RouteEntry {
        route: Route::Settings,
        path: "/settings",
        label: "Settings",
        index: false,
    },
    RouteEntry {
        route: Route::ApiTest,
        path: "/api-test",
        label: "API Test",
        index: false,
    },
];

/// Strip query, fragment and trailing slashes; empty becomes `/`
fn normalize(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let trimmed = path.get(..end).unwrap_or(path).trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

impl RouteEntry {
    /// Whether this entry should be highlighted for `current`
    ///
    /// Index entries match exactly; others match their path or anything
    /// nested below it on a segment boundary.
    #[must_use]
    pub fn is_active(&self, current: &str) -> bool {
        let current = normalize(current);
        if self.index {
            return current == self.path;
        }
        current
            .strip_prefix(self.path)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    }
}

/// Resolve a path to a route
#[must_use]
pub fn resolve(path: &str) -> Route {
    if normalize(path) == LANDING_PATH {
        return Route::Login;
    }
    NAV_ROUTES
        .iter()
        .find(|entry| entry.is_active(path))
        .map_or(Route::NotFound, |entry| entry.route)
}

/// Rendered navigation item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    /// Label
    pub label: &'static str,
    /// Target path
    pub path: &'static str,
    /// Whether it matches the current location
    pub active: bool,
}

/// Navigation state of the admin shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shell {
    current_path: String,
}

impl Default for Shell {
    fn default() -> Self {
        Self::new()
    }
}

impl Shell {
    /// Start at the dashboard
    #[must_use]
    pub fn new() -> Self {
        Self::at("/")
    }

    /// Start at a given path
    #[must_use]
    pub fn at(path: &str) -> Self {
        Self {
            current_path: normalize(path).to_string(),
        }
    }

    /// Move to `path` and return the route it resolves to
    pub fn navigate(&mut self, path: &str) -> Route {
        self.current_path = normalize(path).to_string();
        resolve(&self.current_path)
    }

    /// Current location
    #[must_use]
    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    /// Route for the current location
    #[must_use]
    pub fn current_route(&self) -> Route {
        resolve(&self.current_path)
    }

    /// Navigation entries with active highlighting
    #[must_use]
    pub fn nav_items(&self) -> Vec<NavItem> {
        NAV_ROUTES
            .iter()
            .map(|entry| NavItem {
                label: entry.label,
                path: entry.path,
                active: entry.is_active(&self.current_path),
            })
            .collect()
    }

    /// End the session and go to the landing page
    ///
    /// Navigation happens whether or not logout succeeds; a failure is
    /// only logged.
    pub async fn sign_out<B: AdminBackend + ?Sized>(&mut self, backend: &B) -> Route {
        match backend.sign_out().await {
            Ok(()) => info!("Signed out"),
            Err(e) => warn!("Sign-out failed, leaving anyway: {}", e),
        }
        self.navigate(LANDING_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::mock::MockBackend;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("/", Route::Dashboard)]
    #[case("", Route::Dashboard)]
    #[case("/?tab=health", Route::Dashboard)]
    #[case("/settings", Route::Settings)]
    #[case("/settings/", Route::Settings)]
    #[case("/settings/general", Route::Settings)]
    #[case("/settingsx", Route::NotFound)]
    #[case("/api-test#result", Route::ApiTest)]
    #[case("/login", Route::Login)]
    #[case("/posts", Route::NotFound)]
    fn test_resolve(#[case] path: &str, #[case] expected: Route) {
        assert_eq!(resolve(path), expected);
    }

    #[rstest]
    #[case("/", true, false)]
    #[case("/settings", false, true)]
    #[case("/settings/general", false, true)]
    #[case("/settings-old", false, false)]
    #[case("/api-test", false, false)]
    fn test_active_highlighting(
        #[case] current: &str,
        #[case] dashboard: bool,
        #[case] settings: bool,
    ) {
        let shell = Shell::at(current);
        let items = shell.nav_items();

        let active = |label: &str| items.iter().any(|item| item.label == label && item.active);
        assert_eq!(active("Dashboard"), dashboard);
        assert_eq!(active("Settings"), settings);
    }

    #[test]
    fn test_navigate_updates_location() {
        let mut shell = Shell::new();

        assert_eq!(shell.navigate("/settings/general/"), Route::Settings);
        assert_eq!(shell.current_path(), "/settings/general");
        assert_eq!(shell.current_route(), Route::Settings);
    }

    #[tokio::test]
    async fn test_sign_out_navigates_to_landing() {
        let backend = MockBackend::new();
        let mut shell = Shell::at("/settings");

        assert_eq!(shell.sign_out(&backend).await, Route::Login);
        assert_eq!(shell.current_path(), LANDING_PATH);
        assert_eq!(backend.calls().sign_outs, 1);
    }

    #[tokio::test]
    async fn test_sign_out_failure_still_navigates() {
        let backend = MockBackend::new().with_logout_failure(ApiError::transport("offline"));
        let mut shell = Shell::at("/settings");

        assert_eq!(shell.sign_out(&backend).await, Route::Login);
        assert_eq!(shell.current_path(), LANDING_PATH);
    }
}
