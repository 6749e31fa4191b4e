//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps core outcomes to HTTP status codes and JSON error bodies with a
//! machine-readable code. Upstream and internal error details are never
//! exposed in responses.
//!
//! A missing species or zone is *not* represented at the core level (the
//! composer returns `Ok(None)` for that), but the edge still needs a 404
//! body to hand the client, which is what [`AppError::NotFound`] is.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use frs_core::SourceError;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "NOT_FOUND", "MISSING_PARAMETER").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional context, present only for client errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Application-level error type for the rules API.
#[derive(Error, Debug)]
pub enum AppError {
    /// Species or zone code unrecognized (404). An expected outcome, not a
    /// fault.
    #[error("not found: {0}")]
    NotFound(String),

    /// A required identifying parameter is absent (422). A caller contract
    /// violation, never retried.
    #[error("missing parameter: {0}")]
    MissingParameter(String),

    /// A supplied parameter is malformed (422).
    #[error("validation error: {0}")]
    Validation(String),

    /// The rule source is unreachable (502). Message is logged but not
    /// returned to the client.
    #[error("upstream rule source error: {0}")]
    Upstream(String),

    /// Internal server error (500). Message is logged but not returned.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::MissingParameter(_) => (StatusCode::UNPROCESSABLE_ENTITY, "MISSING_PARAMETER"),
            Self::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            Self::Upstream(_) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }

    /// Client-facing detail payload. The front-end keys off
    /// `requires_<param>` flags for missing-parameter prompts.
    fn details(&self) -> Option<serde_json::Value> {
        match self {
            Self::MissingParameter(name) => {
                let mut details = serde_json::Map::new();
                details.insert(format!("requires_{name}"), serde_json::Value::Bool(true));
                Some(serde_json::Value::Object(details))
            }
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // Never expose internal/upstream error messages to clients.
        let message = match &self {
            Self::Internal(_) => "An internal error occurred".to_string(),
            Self::Upstream(_) => "An upstream service error occurred".to_string(),
            other => other.to_string(),
        };

        match &self {
            Self::Internal(_) => tracing::error!(error = %self, "internal server error"),
            Self::Upstream(_) => tracing::error!(error = %self, "rule source unavailable"),
            _ => {}
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                details: self.details(),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<SourceError> for AppError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::Unavailable(msg) => Self::Upstream(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[test]
    fn status_codes() {
        assert_eq!(
            AppError::NotFound("x".into()).status_and_code(),
            (StatusCode::NOT_FOUND, "NOT_FOUND")
        );
        assert_eq!(
            AppError::MissingParameter("zone".into()).status_and_code(),
            (StatusCode::UNPROCESSABLE_ENTITY, "MISSING_PARAMETER")
        );
        assert_eq!(
            AppError::Validation("bad date".into()).status_and_code(),
            (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR")
        );
        assert_eq!(
            AppError::Upstream("db down".into()).status_and_code(),
            (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR")
        );
        assert_eq!(
            AppError::Internal("boom".into()).status_and_code(),
            (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
        );
    }

    #[test]
    fn source_error_maps_to_upstream() {
        let err = AppError::from(SourceError::Unavailable("pool timed out".into()));
        assert!(matches!(err, AppError::Upstream(_)));
    }

    async fn response_parts(err: AppError) -> (StatusCode, ErrorBody) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        (status, body)
    }

    #[tokio::test]
    async fn missing_zone_carries_requires_flag() {
        let (status, body) = response_parts(AppError::MissingParameter("zone".into())).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body.error.code, "MISSING_PARAMETER");
        let details = body.error.details.expect("details");
        assert_eq!(details["requires_zone"], true);
    }

    #[tokio::test]
    async fn upstream_detail_does_not_leak() {
        let (status, body) =
            response_parts(AppError::Upstream("connection refused 10.0.0.3".into())).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(
            !body.error.message.contains("10.0.0.3"),
            "upstream detail must not leak: {}",
            body.error.message
        );
    }

    #[tokio::test]
    async fn not_found_keeps_its_message() {
        let (status, body) = response_parts(AppError::NotFound("no such pair".into())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.error.message.contains("no such pair"));
        assert!(body.error.details.is_none());
    }
}
