//! Common helpers for HTTP contract tests

#![allow(dead_code, clippy::unwrap_used)]

use inkwell_admin::ApiClient;
use std::sync::Once;
use std::time::Duration;
use wiremock::MockServer;

static LOGGING: Once = Once::new();

/// Initialize logging once for the whole test binary
pub fn init_test_logging() {
    LOGGING.call_once(|| {
        // Another test harness may already own the global subscriber.
        let _ = inkwell_core::init_logging("debug", "pretty");
    });
}

/// Start a mock backend and a client pointed at it
pub async fn backend_and_client() -> (MockServer, ApiClient) {
    init_test_logging();
    let server = MockServer::start().await;
    let client = ApiClient::new(Some(&server.uri()), Duration::from_secs(5)).unwrap();
    (server, client)
}
