//! HTTP client for communicating with the Inkwell backend API

use crate::error::{ApiError, ApiResult};
use chrono::{DateTime, Utc};
use inkwell_core::{AdminConfig, DbTime, FeatureFlag, HealthSnapshot};
use reqwest::{Client, Response, Url};
use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;
use tracing::{debug, warn};

/// Backend health endpoint
pub const HEALTH_PATH: &str = "/healthz";
/// Database clock endpoint
pub const DB_NOW_PATH: &str = "/api/db/now";
/// Echo endpoint used by the API test page
pub const HELLO_PATH: &str = "/api/hello";
/// Coming-soon flag endpoint (GET reads, POST writes)
pub const COMING_SOON_PATH: &str = "/api/admin/coming-soon";
/// Session logout endpoint
pub const LOGOUT_PATH: &str = "/api/auth/logout";

/// API client for making HTTP requests to the Inkwell backend
///
/// The base URL is injected at construction. A missing or unusable base URL
/// does not fail construction; the client reports itself as misconfigured
/// and every call returns [`ApiError::NotConfigured`].
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Option<String>,
}

impl ApiClient {
    /// Create a new API client
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the HTTP client cannot be built,
    /// for example when no TLS backend is available.
    pub fn new(base_url: Option<&str>, timeout: Duration) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(5)))
            .build()
            .map_err(|e| ApiError::transport(format!("failed to build HTTP client: {e}")))?;

        let base_url = base_url.and_then(normalize_base_url);
        if base_url.is_none() {
            warn!("API base URL is missing or invalid; backend calls are disabled");
        }

        Ok(Self { client, base_url })
    }

    /// Create a client from loaded configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &AdminConfig) -> ApiResult<Self> {
        Self::new(config.api.base_url.as_deref(), config.request_timeout())
    }

    /// Whether the client has no usable base URL
    #[must_use]
    pub const fn is_misconfigured(&self) -> bool {
        self.base_url.is_none()
    }

    /// The normalized base URL, if configured
    #[must_use]
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    fn url(&self, path: &str) -> ApiResult<String> {
        let base = self.base_url.as_deref().ok_or(ApiError::NotConfigured)?;
        if path.starts_with('/') {
            Ok(format!("{base}{path}"))
        } else {
            Ok(format!("{base}/{path}"))
        }
    }

    /// Issue a GET request and parse the JSON body
    ///
    /// # Errors
    ///
    /// Returns an error if the client is misconfigured, the request fails,
    /// the status is not a success, or the body cannot be parsed.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = self.url(path)?;
        debug!(%url, "GET");

        let response = self.client.get(&url).send().await?;
        parse_json(ensure_success(response).await?).await
    }

    /// Issue a POST request with a JSON body and parse the JSON response
    ///
    /// # Errors
    ///
    /// Returns an error if the client is misconfigured, the request fails,
    /// the status is not a success, or the body cannot be parsed.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = self.url(path)?;
        debug!(%url, "POST");

        let response = self.client.post(&url).json(body).send().await?;
        parse_json(ensure_success(response).await?).await
    }

    /// Check backend health
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be parsed.
    pub async fn health(&self) -> ApiResult<HealthSnapshot> {
        self.get(HEALTH_PATH).await
    }

    /// Read the database server clock
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, or the backend answers with an
    /// `error` field or without a timestamp.
    pub async fn db_now(&self) -> ApiResult<DateTime<Utc>> {
        let time: DbTime = self.get(DB_NOW_PATH).await?;
        match (time.now, time.error) {
            (_, Some(message)) => Err(ApiError::backend(message)),
            (Some(now), None) => Ok(now),
            (None, None) => Err(ApiError::decode("missing field `now`")),
        }
    }

    /// Ping the echo endpoint
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is not JSON.
    pub async fn hello(&self) -> ApiResult<serde_json::Value> {
        self.get(HELLO_PATH).await
    }

    /// Read the coming-soon flag
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be parsed.
    pub async fn coming_soon(&self) -> ApiResult<FeatureFlag> {
        self.get(COMING_SOON_PATH).await
    }

    /// Write the coming-soon flag; returns the value the backend stored
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be parsed.
    pub async fn set_coming_soon(&self, enabled: bool) -> ApiResult<FeatureFlag> {
        self.post(COMING_SOON_PATH, &FeatureFlag::new(enabled)).await
    }

    /// End the current session
    ///
    /// The response body is ignored; only the status matters.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the status is not a success.
    pub async fn sign_out(&self) -> ApiResult<()> {
        let url = self.url(LOGOUT_PATH)?;
        debug!(%url, "POST");

        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({}))
            .send()
            .await?;
        ensure_success(response).await.map(|_| ())
    }
}

/// Trim the base URL and accept only absolute http(s) URLs
fn normalize_base_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return None;
    }

    match Url::parse(trimmed) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => {
            Some(trimmed.to_string())
        }
        Ok(url) => {
            warn!("Unsupported API base URL scheme '{}'", url.scheme());
            None
        }
        Err(e) => {
            warn!("Invalid API base URL '{}': {}", trimmed, e);
            None
        }
    }
}

/// Turn a non-success status into [`ApiError::Status`], preferring the
/// `error` or `message` field of a JSON body over the canonical reason
async fn ensure_success(response: Response) -> ApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|value| {
            value
                .get("error")
                .or_else(|| value.get("message"))
                .and_then(serde_json::Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown status").to_string());

    warn!(status = status.as_u16(), %message, "API returned error");
    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

async fn parse_json<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(|e| ApiError::decode(e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn client(base: Option<&str>) -> ApiClient {
        ApiClient::new(base, Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn test_missing_base_url_is_misconfigured() {
        assert!(client(None).is_misconfigured());
        assert!(client(Some("")).is_misconfigured());
        assert!(client(Some("   ")).is_misconfigured());
    }

    #[test]
    fn test_constructor_builds_client_without_base_url() {
        let api = ApiClient::new(None, Duration::from_millis(250));

        assert!(api.is_ok_and(|api| api.is_misconfigured()));
    }

    #[test]
    fn test_from_config_uses_configured_base_url() {
        let mut config = AdminConfig::default();
        config.api.base_url = Some("http://localhost:4000/".to_string());

        let api = ApiClient::from_config(&config).unwrap();

        assert_eq!(api.base_url(), Some("http://localhost:4000"));
    }

    #[test]
    fn test_invalid_base_url_is_misconfigured() {
        assert!(client(Some("not a url")).is_misconfigured());
        assert!(client(Some("ftp://files.example.com")).is_misconfigured());
        assert!(client(Some("/relative/only")).is_misconfigured());
    }

    #[test]
    fn test_base_url_is_normalized() {
        let api = client(Some(" https://blog.example.com/ "));

        assert!(!api.is_misconfigured());
        assert_eq!(api.base_url(), Some("https://blog.example.com"));
        assert_eq!(
            api.url("/healthz").ok().as_deref(),
            Some("https://blog.example.com/healthz")
        );
        assert_eq!(
            api.url("api/hello").ok().as_deref(),
            Some("https://blog.example.com/api/hello")
        );
    }

    #[tokio::test]
    async fn test_calls_fail_gracefully_when_misconfigured() {
        let api = client(None);

        assert_eq!(api.health().await, Err(ApiError::NotConfigured));
        assert_eq!(api.db_now().await, Err(ApiError::NotConfigured));
        assert_eq!(api.coming_soon().await, Err(ApiError::NotConfigured));
        assert_eq!(api.set_coming_soon(true).await, Err(ApiError::NotConfigured));
        assert_eq!(api.sign_out().await, Err(ApiError::NotConfigured));
    }

    #[tokio::test]
    async fn test_transport_error_when_backend_unreachable() {
        // Port 9 (discard) is closed on test machines.
        let api = client(Some("http://127.0.0.1:9"));

        let err = api.health().await.unwrap_err();
        assert!(matches!(err, ApiError::Transport { .. }), "got {err:?}");
    }
}
