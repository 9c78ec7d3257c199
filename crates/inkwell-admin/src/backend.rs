//! Backend seam used by widgets, pages and the shell

use crate::api_client::ApiClient;
use crate::error::ApiResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use inkwell_core::{FeatureFlag, HealthSnapshot};

/// Operations the dashboard needs from the Inkwell backend
///
/// Implemented by [`ApiClient`] for real deployments and by
/// [`MockBackend`](crate::mock::MockBackend) for tests and offline runs.
#[async_trait]
pub trait AdminBackend: Send + Sync {
    /// Whether required deployment configuration is missing
    fn is_misconfigured(&self) -> bool {
        false
    }

    /// `GET /healthz`
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unreachable or misconfigured, or
    /// answers with a non-success status or an unreadable body.
    async fn health(&self) -> ApiResult<HealthSnapshot>;

    /// `GET /api/db/now`
    ///
    /// # Errors
    ///
    /// As [`health`](Self::health); also fails when the backend reports an
    /// `error` instead of a timestamp.
    async fn db_now(&self) -> ApiResult<DateTime<Utc>>;

    /// `GET /api/hello`
    ///
    /// # Errors
    ///
    /// As [`health`](Self::health).
    async fn hello(&self) -> ApiResult<serde_json::Value>;

    /// `GET /api/admin/coming-soon`
    ///
    /// # Errors
    ///
    /// As [`health`](Self::health).
    async fn coming_soon(&self) -> ApiResult<FeatureFlag>;

    /// `POST /api/admin/coming-soon`; returns the stored value
    ///
    /// # Errors
    ///
    /// As [`health`](Self::health). The write may still have been applied
    /// when the response is lost.
    async fn set_coming_soon(&self, enabled: bool) -> ApiResult<FeatureFlag>;

    /// End the current session
    ///
    /// # Errors
    ///
    /// Returns an error if the logout request fails or is rejected.
    async fn sign_out(&self) -> ApiResult<()>;
}

#[async_trait]
impl AdminBackend for ApiClient {
    fn is_misconfigured(&self) -> bool {
        Self::is_misconfigured(self)
    }

    async fn health(&self) -> ApiResult<HealthSnapshot> {
        Self::health(self).await
    }

    async fn db_now(&self) -> ApiResult<DateTime<Utc>> {
        Self::db_now(self).await
    }

    async fn hello(&self) -> ApiResult<serde_json::Value> {
        Self::hello(self).await
    }

    async fn coming_soon(&self) -> ApiResult<FeatureFlag> {
        Self::coming_soon(self).await
    }

    async fn set_coming_soon(&self, enabled: bool) -> ApiResult<FeatureFlag> {
        Self::set_coming_soon(self, enabled).await
    }

    async fn sign_out(&self) -> ApiResult<()> {
        Self::sign_out(self).await
    }
}
