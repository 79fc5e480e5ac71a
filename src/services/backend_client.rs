use std::time::{Duration as StdDuration, Instant};

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{ApiErrorCode, AppError, AppResult};
use crate::models::analytics::AnalyticsReport;
use crate::models::asana::{AsanaSummary, Effort};
use crate::models::git::GitReport;
use crate::models::query::DateRange;

const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub base_url: String,
    pub http_timeout: StdDuration,
}

impl BackendConfig {
    pub fn from_env() -> Self {
        let base_url = std::env::var("DEVPULSE_API_BASE_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let timeout_secs = std::env::var("DEVPULSE_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            base_url,
            http_timeout: StdDuration::from_secs(timeout_secs),
        }
    }
}

/// Typed client over the dashboard REST contract. Failures are terminal for
/// the current fetch cycle; no retries happen here.
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(config: &BackendConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .pool_max_idle_per_host(2)
            .pool_idle_timeout(Some(StdDuration::from_secs(90)))
            .build()
            .map_err(|err| AppError::other(format!("failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_env() -> AppResult<Self> {
        Self::new(&BackendConfig::from_env())
    }

    pub async fn git_report(&self, range: &DateRange) -> AppResult<GitReport> {
        self.request(Method::POST, "/api/git/report", Some(range))
            .await
    }

    pub async fn asana_summary(&self) -> AppResult<AsanaSummary> {
        self.request(Method::GET, "/api/asana/summary", None).await
    }

    pub async fn developer_efforts(&self, range: &DateRange) -> AppResult<Vec<Effort>> {
        self.request(Method::POST, "/api/asana/efforts", Some(range))
            .await
    }

    /// The developer-summary payload is stored but never reshaped by the
    /// dashboard, so it stays opaque JSON.
    pub async fn developer_summary(&self, range: &DateRange) -> AppResult<JsonValue> {
        self.request(Method::POST, "/api/asana/developer_summary", Some(range))
            .await
    }

    pub async fn analytics(&self, range: &DateRange) -> AppResult<AnalyticsReport> {
        self.request(Method::GET, "/api/analytics", Some(range))
            .await
    }

    /// Invalidates every server-side cache. The per-source reload endpoints
    /// below exist in the contract too, but the dashboard flow only uses
    /// this one.
    pub async fn reload_all(&self) -> AppResult<()> {
        self.request_unit(Method::POST, "/reload_all", None).await
    }

    pub async fn reload_git(&self) -> AppResult<()> {
        self.request_unit(Method::POST, "/api/git/reload", None)
            .await
    }

    pub async fn reload_asana(&self) -> AppResult<()> {
        self.request_unit(Method::POST, "/api/asana/reload", None)
            .await
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        range: Option<&DateRange>,
    ) -> AppResult<T> {
        let correlation_id = Uuid::new_v4().to_string();
        let response = self
            .dispatch(method, path, range, &correlation_id)
            .await?;

        response.json::<T>().await.map_err(|err| {
            AppError::api_with_correlation(
                ApiErrorCode::InvalidResponse,
                format!("failed to decode response from {path}: {err}"),
                Some(correlation_id.as_str()),
            )
        })
    }

    async fn request_unit(
        &self,
        method: Method,
        path: &str,
        range: Option<&DateRange>,
    ) -> AppResult<()> {
        let correlation_id = Uuid::new_v4().to_string();
        self.dispatch(method, path, range, &correlation_id).await?;
        Ok(())
    }

    async fn dispatch(
        &self,
        method: Method,
        path: &str,
        range: Option<&DateRange>,
        correlation_id: &str,
    ) -> AppResult<reqwest::Response> {
        let url = format!("{}{}", self.base_url, path);
        let mut builder = self.client.request(method.clone(), &url);
        if let Some(range) = range {
            builder = builder.query(&[
                ("start_date", range.start_param()),
                ("end_date", range.end_param()),
            ]);
        }

        debug!(
            target: "app::api",
            %method,
            %path,
            correlation_id = %correlation_id,
            "dispatching request"
        );

        let start = Instant::now();
        let response = builder
            .send()
            .await
            .map_err(|err| error_from_reqwest(err, path, correlation_id))?;

        let status = response.status();
        if status.is_success() {
            debug!(
                target: "app::api",
                %path,
                correlation_id = %correlation_id,
                latency_ms = start.elapsed().as_millis() as u64,
                "request succeeded"
            );
            return Ok(response);
        }

        warn!(
            target: "app::api",
            %path,
            correlation_id = %correlation_id,
            status = status.as_u16(),
            "backend returned non-success status"
        );
        Err(map_http_error(status, path, correlation_id))
    }
}

fn map_http_error(status: StatusCode, path: &str, correlation_id: &str) -> AppError {
    let (code, message) = match status {
        StatusCode::BAD_REQUEST => (
            ApiErrorCode::InvalidRequest,
            format!("backend rejected the request to {path}"),
        ),
        StatusCode::UNAUTHORIZED => (
            ApiErrorCode::InvalidRequest,
            format!("backend rejected credentials for {path}"),
        ),
        StatusCode::FORBIDDEN => (
            ApiErrorCode::InvalidRequest,
            format!("access to {path} is forbidden"),
        ),
        StatusCode::NOT_FOUND => (
            ApiErrorCode::InvalidRequest,
            format!("backend endpoint {path} not found"),
        ),
        StatusCode::TOO_MANY_REQUESTS => (
            ApiErrorCode::RateLimited,
            format!("backend rate limited the request to {path}"),
        ),
        status if status.is_server_error() => (
            ApiErrorCode::ServiceUnavailable,
            format!(
                "backend unavailable for {path} (status {})",
                status.as_u16()
            ),
        ),
        status => (
            ApiErrorCode::Unknown,
            format!(
                "unexpected status {} from {path}",
                status.as_u16()
            ),
        ),
    };

    AppError::api_with_correlation(code, message, Some(correlation_id))
}

fn error_from_reqwest(err: reqwest::Error, path: &str, correlation_id: &str) -> AppError {
    let code = if err.is_timeout() {
        ApiErrorCode::HttpTimeout
    } else if err.is_connect() {
        ApiErrorCode::ConnectionFailed
    } else {
        ApiErrorCode::Unknown
    };

    AppError::api_with_correlation(
        code,
        format!("request to {path} failed: {err}"),
        Some(correlation_id),
    )
}

pub mod testing {
    use reqwest::StatusCode;

    use crate::error::AppError;

    pub fn map_http_error(status: StatusCode) -> AppError {
        super::map_http_error(status, "/test", "test-correlation-id")
    }
}
