use std::sync::Arc;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Upper bound on upstream error text echoed back to clients.
pub const MAX_DETAIL_CHARS: usize = 200;

/// Shared handler result type.
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error, Clone)]
pub enum ApiError {
    #[error("bad request: {0}")]
    InvalidInput(String),
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
    #[error("internal server error")]
    Internal(Arc<anyhow::Error>),
}

impl ApiError {
    fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidInput(_) => "INVALID_INPUT",
            ApiError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            ApiError::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Human-readable message for the response body.
    pub fn detail(&self) -> String {
        match self {
            ApiError::InvalidInput(msg) | ApiError::ServiceUnavailable(msg) => {
                truncate_detail(msg, MAX_DETAIL_CHARS)
            }
            ApiError::Internal(err) => truncate_detail(&err.to_string(), MAX_DETAIL_CHARS),
        }
    }

    pub fn internal(err: anyhow::Error) -> Self {
        Self::Internal(Arc::new(err))
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(value: anyhow::Error) -> Self {
        Self::internal(value)
    }
}

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
    code: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, detail = %self.detail(), "request failed");
        }
        let body = ErrorBody {
            detail: self.detail(),
            code: self.code(),
        };
        (status, Json(body)).into_response()
    }
}

/// First `max` characters of `text`, on character boundaries.
pub fn truncate_detail(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn invalid_input_is_a_client_error() {
        let response = ApiError::InvalidInput("limit must be at most 500".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({"detail": "limit must be at most 500", "code": "INVALID_INPUT"})
        );
    }

    #[tokio::test]
    async fn internal_errors_carry_bounded_detail() {
        let long = "x".repeat(MAX_DETAIL_CHARS * 2);
        let response = ApiError::internal(anyhow::anyhow!(long)).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["code"], "INTERNAL");
        assert_eq!(
            body["detail"].as_str().map(|s| s.chars().count()),
            Some(MAX_DETAIL_CHARS)
        );
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(truncate_detail("مرحبا بكم", 5), "مرحبا");
        assert_eq!(truncate_detail("short", 50), "short");
    }

    #[test]
    fn unavailable_maps_to_503() {
        let err = ApiError::ServiceUnavailable("Database not configured".into());
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.detail(), "Database not configured");
    }
}
