//! Dashboard page showing backend health and the database clock

use crate::backend::AdminBackend;
use crate::widgets::{DbTimeWidget, HealthWidget};

/// Main dashboard page
///
/// Both widgets load on mount. [`refresh_all`](Self::refresh_all) triggers
/// them together; each settles on its own as its response arrives.
#[derive(Debug, Clone)]
pub struct DashboardPage {
    health: HealthWidget,
    db_time: DbTimeWidget,
}

impl Default for DashboardPage {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardPage {
    /// Create the page without loading anything
    #[must_use]
    pub fn new() -> Self {
        Self {
            health: HealthWidget::new("health"),
            db_time: DbTimeWidget::new("db-time"),
        }
    }

    /// Create the page and run the mount-time checks
    pub async fn mount<B: AdminBackend + ?Sized>(backend: &B) -> Self {
        let mut page = Self::new();
        page.refresh_all(backend).await;
        page
    }

    /// Re-run the health check
    pub async fn refresh_health<B: AdminBackend + ?Sized>(&mut self, backend: &B) -> bool {
        self.health.refresh(|| backend.health()).await
    }

    /// Re-run the database clock check
    pub async fn refresh_db_time<B: AdminBackend + ?Sized>(&mut self, backend: &B) -> bool {
        self.db_time.refresh(|| backend.db_now()).await
    }

    /// Trigger every widget at once
    pub async fn refresh_all<B: AdminBackend + ?Sized>(&mut self, backend: &B) {
        let Self { health, db_time } = self;
        tokio::join!(
            health.refresh(|| backend.health()),
            db_time.refresh(|| backend.db_now()),
        );
    }

    /// Drop any responses still in flight
    pub fn unmount(&mut self) {
        self.health.unmount();
        self.db_time.unmount();
    }

    /// Health widget
    #[must_use]
    pub const fn health(&self) -> &HealthWidget {
        &self.health
    }

    /// Database clock widget
    #[must_use]
    pub const fn db_time(&self) -> &DbTimeWidget {
        &self.db_time
    }
}
