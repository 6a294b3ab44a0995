use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failure taxonomy shared by the analysis and persistence collaborators.
///
/// Each variant maps to exactly one gentle, user-facing message. Raw backend
/// error text is logged where it is caught and never carried in here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("rate limited (retry after {retry_after:?}s)")]
    RateLimited { retry_after: Option<u64> },

    #[error("AI unavailable")]
    AiUnavailable,

    #[error("invalid input")]
    InvalidInput,

    #[error("network failure")]
    Network,

    #[error("unauthorized")]
    Unauthorized,

    #[error("unknown failure")]
    Unknown,
}

impl ServiceError {
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::RateLimited { .. } => "RATE_LIMITED",
            ServiceError::AiUnavailable => "AI_UNAVAILABLE",
            ServiceError::InvalidInput => "INVALID_INPUT",
            ServiceError::Network => "NETWORK",
            ServiceError::Unauthorized => "UNAUTHORIZED",
            ServiceError::Unknown => "UNKNOWN",
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            ServiceError::RateLimited { .. } => "Taking a breather. Try again in a moment.",
            ServiceError::AiUnavailable => "Our AI is resting. Your entry is saved locally.",
            ServiceError::InvalidInput => "Something doesn't look right. Try rephrasing.",
            ServiceError::Network => "Connection lost. We'll sync when you're back online.",
            ServiceError::Unauthorized => "Please sign in to continue.",
            ServiceError::Unknown => "Something unexpected happened. Try again?",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            ServiceError::AiUnavailable | ServiceError::Network => StatusCode::SERVICE_UNAVAILABLE,
            ServiceError::InvalidInput => StatusCode::BAD_REQUEST,
            ServiceError::Unauthorized => StatusCode::UNAUTHORIZED,
            ServiceError::Unknown => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn retry_after(&self) -> Option<u64> {
        match self {
            ServiceError::RateLimited { retry_after } => *retry_after,
            _ => None,
        }
    }
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, retry_after) = match &self {
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "INVALID_INPUT", msg.clone(), None)
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone(), None),
            AppError::Service(e) => (
                e.status(),
                e.code(),
                e.user_message().to_string(),
                e.retry_after(),
            ),
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "UNKNOWN",
                    "Failed to save entry. Try again?".to_string(),
                    None,
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "UNKNOWN",
                    ServiceError::Unknown.user_message().to_string(),
                    None,
                )
            }
        };

        let mut error = json!({
            "code": code,
            "message": message,
        });
        if let Some(seconds) = retry_after {
            error["retry_after"] = json!(seconds);
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}

// Extractor rejections are answered in the same envelope as every other
// error. axum's own text is logged, not returned.

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected request body: {}", rejection.body_text());
        AppError::Validation("Invalid request body.".to_string())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!("Rejected query string: {}", rejection.body_text());
        AppError::Validation("Invalid query parameters.".to_string())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!("Rejected path: {}", rejection.body_text());
        AppError::Validation("Invalid path parameters.".to_string())
    }
}
