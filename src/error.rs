use std::fmt;

use thiserror::Error;
use tracing::warn;

pub type AppResult<T> = Result<T, AppError>;

/// Transport-level classification for failures talking to the dashboard
/// backend. No retries happen at this layer; the codes exist for reporting
/// and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCode {
    HttpTimeout,
    ConnectionFailed,
    RateLimited,
    ServiceUnavailable,
    InvalidRequest,
    InvalidResponse,
    Unknown,
}

impl ApiErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ApiErrorCode::HttpTimeout => "HTTP_TIMEOUT",
            ApiErrorCode::ConnectionFailed => "CONNECTION_FAILED",
            ApiErrorCode::RateLimited => "RATE_LIMITED",
            ApiErrorCode::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            ApiErrorCode::InvalidRequest => "INVALID_REQUEST",
            ApiErrorCode::InvalidResponse => "INVALID_RESPONSE",
            ApiErrorCode::Unknown => "UNKNOWN_API_ERROR",
        }
    }
}

impl fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{message}")]
    Api {
        code: ApiErrorCode,
        message: String,
        correlation_id: Option<String>,
    },

    #[error("validation failed: {message}")]
    Validation { message: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl AppError {
    pub fn api(code: ApiErrorCode, message: impl Into<String>) -> Self {
        Self::api_with_correlation(code, message, None)
    }

    pub fn api_with_correlation(
        code: ApiErrorCode,
        message: impl Into<String>,
        correlation_id: Option<&str>,
    ) -> Self {
        let message = message.into();
        match correlation_id {
            Some(id) => {
                warn!(target: "app::api", code = %code, correlation_id = %id, %message);
            }
            None => {
                warn!(target: "app::api", code = %code, %message);
            }
        }

        AppError::Api {
            code,
            message,
            correlation_id: correlation_id.map(|value| value.to_string()),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        let message = message.into();
        warn!(target: "app::validation", %message, "validation error");
        AppError::Validation { message }
    }

    pub fn other(message: impl Into<String>) -> Self {
        let message = message.into();
        warn!(target: "app::other", %message, "unclassified error");
        AppError::Other(message)
    }

    pub fn api_code(&self) -> Option<ApiErrorCode> {
        match self {
            AppError::Api { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub fn correlation_id(&self) -> Option<&str> {
        match self {
            AppError::Api { correlation_id, .. } => correlation_id.as_deref(),
            _ => None,
        }
    }
}
