//! API connectivity test page

use crate::backend::AdminBackend;
use crate::widgets::ApiTestWidget;

/// Page that pings the echo endpoint on demand
#[derive(Debug, Clone)]
pub struct ApiTestPage {
    hello: ApiTestWidget,
}

impl Default for ApiTestPage {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiTestPage {
    /// Create the page; nothing is requested until [`ping`](Self::ping)
    #[must_use]
    pub fn new() -> Self {
        Self {
            hello: ApiTestWidget::new("api-test"),
        }
    }

    /// Call the echo endpoint
    pub async fn ping<B: AdminBackend + ?Sized>(&mut self, backend: &B) -> bool {
        self.hello.refresh(|| backend.hello()).await
    }

    /// Drop any response still in flight
    pub fn unmount(&mut self) {
        self.hello.unmount();
    }

    /// Echo widget
    #[must_use]
    pub const fn hello(&self) -> &ApiTestWidget {
        &self.hello
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockBackend;
    use crate::state::RequestStatus;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_ping_echoes_json() {
        let backend = MockBackend::new().with_hello(Ok(serde_json::json!({ "hello": "world" })));
        let mut page = ApiTestPage::new();
        assert_eq!(page.hello().status(), RequestStatus::Idle);

        assert!(page.ping(&backend).await);

        assert_eq!(page.hello().data(), Some(&serde_json::json!({ "hello": "world" })));
    }
}
