//! Settings page with the coming-soon toggle

use crate::backend::AdminBackend;
use crate::widgets::ToggleWidget;
use std::time::Duration;

/// Site settings page
#[derive(Debug, Clone)]
pub struct SettingsPage {
    coming_soon: ToggleWidget,
}

impl SettingsPage {
    /// Create the page without loading anything
    #[must_use]
    pub fn new(notice_ttl: Duration) -> Self {
        Self {
            coming_soon: ToggleWidget::with_notice_ttl("coming-soon", notice_ttl),
        }
    }

    /// Create the page and read the current flag
    pub async fn mount<B: AdminBackend + ?Sized>(backend: &B, notice_ttl: Duration) -> Self {
        let mut page = Self::new(notice_ttl);
        page.coming_soon.fetch_status(backend).await;
        page
    }

    /// Re-read the flag
    pub async fn refresh<B: AdminBackend + ?Sized>(&mut self, backend: &B) -> bool {
        self.coming_soon.fetch_status(backend).await
    }

    /// Flip the coming-soon flag
    pub async fn toggle_coming_soon<B: AdminBackend + ?Sized>(&mut self, backend: &B) -> bool {
        self.coming_soon.toggle(backend).await
    }

    /// Drop any responses still in flight
    pub fn unmount(&mut self) {
        self.coming_soon.unmount();
    }

    /// Coming-soon toggle
    #[must_use]
    pub const fn coming_soon(&self) -> &ToggleWidget {
        &self.coming_soon
    }
}
