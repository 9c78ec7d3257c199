//! In-memory backend for tests and offline runs

use crate::backend::AdminBackend;
use crate::error::{ApiError, ApiResult};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use inkwell_core::{FeatureFlag, HealthSnapshot};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::time::{Duration, sleep};

/// How a failed flag write leaves the server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteFailure {
    /// Nothing was stored
    Rejected,
    /// The value was stored but the response was lost
    AppliedThenFailed,
}

#[derive(Debug)]
struct MockState {
    health: ApiResult<HealthSnapshot>,
    db_now: ApiResult<DateTime<Utc>>,
    hello: ApiResult<serde_json::Value>,
    coming_soon: bool,
    read_failure: Option<ApiError>,
    write_failure: Option<(WriteFailure, ApiError)>,
    logout_failure: Option<ApiError>,
    calls: MockCalls,
}

/// Number of calls made per endpoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MockCalls {
    /// `health` calls
    pub health: usize,
    /// `db_now` calls
    pub db_now: usize,
    /// `hello` calls
    pub hello: usize,
    /// `coming_soon` reads
    pub flag_reads: usize,
    /// `set_coming_soon` writes
    pub flag_writes: usize,
    /// `sign_out` calls
    pub sign_outs: usize,
}

/// Mock backend with scripted responses
///
/// Clones share state, so a test can keep a handle and inspect the server
/// side after handing a clone to a widget.
#[derive(Debug, Clone)]
pub struct MockBackend {
    state: Arc<Mutex<MockState>>,
    delay: Duration,
    misconfigured: bool,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBackend {
    /// Create a healthy backend with the coming-soon flag off
    #[must_use]
    pub fn new() -> Self {
        let db_now = Utc
            .with_ymd_and_hms(2024, 3, 15, 14, 25, 30)
            .single()
            .ok_or_else(|| ApiError::backend("invalid mock timestamp"));

        Self {
            state: Arc::new(Mutex::new(MockState {
                health: Ok(HealthSnapshot {
                    ok: true,
                    uptime: Some(12345.0),
                    error: None,
                }),
                db_now,
                hello: Ok(serde_json::json!({ "message": "Hello from Inkwell" })),
                coming_soon: false,
                read_failure: None,
                write_failure: None,
                logout_failure: None,
                calls: MockCalls::default(),
            })),
            delay: Duration::ZERO,
            misconfigured: false,
        }
    }

    /// Delay every response
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Report missing configuration and fail every call like an
    /// unconfigured [`ApiClient`](crate::ApiClient)
    #[must_use]
    pub const fn misconfigured(mut self) -> Self {
        self.misconfigured = true;
        self
    }

    /// Script the health response
    #[must_use]
    pub fn with_health(self, health: ApiResult<HealthSnapshot>) -> Self {
        self.lock().health = health;
        self
    }

    /// Script the database clock response
    #[must_use]
    pub fn with_db_now(self, db_now: ApiResult<DateTime<Utc>>) -> Self {
        self.lock().db_now = db_now;
        self
    }

    /// Script the echo response
    #[must_use]
    pub fn with_hello(self, hello: ApiResult<serde_json::Value>) -> Self {
        self.lock().hello = hello;
        self
    }

    /// Set the server-side coming-soon flag
    #[must_use]
    pub fn with_coming_soon(self, enabled: bool) -> Self {
        self.set_server_flag(enabled);
        self
    }

    /// Fail flag writes
    #[must_use]
    pub fn with_write_failure(self, mode: WriteFailure, error: ApiError) -> Self {
        self.lock().write_failure = Some((mode, error));
        self
    }

    /// Fail sign-out
    #[must_use]
    pub fn with_logout_failure(self, error: ApiError) -> Self {
        self.lock().logout_failure = Some(error);
        self
    }

    /// Fail or restore flag reads
    pub fn set_read_failure(&self, error: Option<ApiError>) {
        self.lock().read_failure = error;
    }

    /// Change the server-side flag behind the client's back
    pub fn set_server_flag(&self, enabled: bool) {
        self.lock().coming_soon = enabled;
    }

    /// Current server-side flag
    #[must_use]
    pub fn server_flag(&self) -> bool {
        self.lock().coming_soon
    }

    /// Calls made so far
    #[must_use]
    pub fn calls(&self) -> MockCalls {
        self.lock().calls
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn respond(&self) -> ApiResult<()> {
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
        if self.misconfigured {
            return Err(ApiError::NotConfigured);
        }
        Ok(())
    }
}

#[async_trait]
impl AdminBackend for MockBackend {
    fn is_misconfigured(&self) -> bool {
        self.misconfigured
    }

    async fn health(&self) -> ApiResult<HealthSnapshot> {
        self.lock().calls.health += 1;
        self.respond().await?;
        self.lock().health.clone()
    }

    async fn db_now(&self) -> ApiResult<DateTime<Utc>> {
        self.lock().calls.db_now += 1;
        self.respond().await?;
        self.lock().db_now.clone()
    }

    async fn hello(&self) -> ApiResult<serde_json::Value> {
        self.lock().calls.hello += 1;
        self.respond().await?;
        self.lock().hello.clone()
    }

    async fn coming_soon(&self) -> ApiResult<FeatureFlag> {
        self.lock().calls.flag_reads += 1;
        self.respond().await?;
        let state = self.lock();
        match &state.read_failure {
            Some(error) => Err(error.clone()),
            None => Ok(FeatureFlag::new(state.coming_soon)),
        }
    }

    async fn set_coming_soon(&self, enabled: bool) -> ApiResult<FeatureFlag> {
        self.lock().calls.flag_writes += 1;
        self.respond().await?;
        let mut state = self.lock();
        match state.write_failure.clone() {
            Some((WriteFailure::Rejected, error)) => Err(error),
            Some((WriteFailure::AppliedThenFailed, error)) => {
                state.coming_soon = enabled;
                Err(error)
            }
            None => {
                state.coming_soon = enabled;
                Ok(FeatureFlag::new(state.coming_soon))
            }
        }
    }

    async fn sign_out(&self) -> ApiResult<()> {
        self.lock().calls.sign_outs += 1;
        self.respond().await?;
        self.lock().logout_failure.clone().map_or(Ok(()), Err)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_flag_write_updates_server() {
        let backend = MockBackend::new();

        let stored = backend.set_coming_soon(true).await.unwrap();

        assert!(stored.enabled);
        assert!(backend.server_flag());
        assert_eq!(backend.calls().flag_writes, 1);
    }

    #[tokio::test]
    async fn test_rejected_write_leaves_server_unchanged() {
        let backend =
            MockBackend::new().with_write_failure(WriteFailure::Rejected, ApiError::transport("boom"));

        assert!(backend.set_coming_soon(true).await.is_err());
        assert!(!backend.server_flag());
    }

    #[tokio::test]
    async fn test_applied_write_failure_changes_server() {
        let backend = MockBackend::new()
            .with_write_failure(WriteFailure::AppliedThenFailed, ApiError::transport("reset"));

        assert!(backend.set_coming_soon(true).await.is_err());
        assert!(backend.server_flag());
    }

    #[tokio::test]
    async fn test_misconfigured_backend_fails_every_call() {
        let backend = MockBackend::new().misconfigured();

        assert!(AdminBackend::is_misconfigured(&backend));
        assert_eq!(backend.health().await, Err(ApiError::NotConfigured));
        assert_eq!(backend.sign_out().await, Err(ApiError::NotConfigured));
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let backend = MockBackend::new();
        let handle = backend.clone();

        backend.set_server_flag(true);

        assert!(handle.coming_soon().await.unwrap().enabled);
        assert_eq!(handle.calls().flag_reads, 1);
    }
}
