//! Error types for feeportal-api

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use feeportal_core::error::{DefaultErrorLogger, ErrorContext, ErrorLogger};
use feeportal_core::CoreError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Core(error) => match error {
                CoreError::Validation { .. } => StatusCode::BAD_REQUEST,
                CoreError::Timeout => StatusCode::GATEWAY_TIMEOUT,
                CoreError::Api { status, .. } if (400..500).contains(status) => {
                    StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
                }
                CoreError::ClientSetup { .. } => StatusCode::INTERNAL_SERVER_ERROR,
                _ => StatusCode::BAD_GATEWAY,
            },
        }
    }

    pub fn code(&self) -> String {
        match self {
            ApiError::NotFound { .. } => "NOT_FOUND".to_string(),
            ApiError::BadRequest { .. } => "BAD_REQUEST".to_string(),
            ApiError::Core(error) => error.code().to_string(),
        }
    }

    /// Text for the `error` field; backend messages pass through unchanged
    fn message(&self) -> String {
        match self {
            ApiError::Core(error) => error
                .backend_message()
                .map(str::to_string)
                .unwrap_or_else(|| error.to_string()),
            other => other.to_string(),
        }
    }

    /// Log a backend failure for `operation` and wrap it
    pub fn logged(error: CoreError, operation: &str) -> Self {
        DefaultErrorLogger.log_error(&error, &ErrorContext::new(operation));
        ApiError::Core(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": self.message(),
            "code": self.code(),
        });
        (self.status(), Json(body)).into_response()
    }
}
