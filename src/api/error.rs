//! API error types with structured JSON responses.

use axum::extract::rejection::{FormRejection, JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::core_state::CoreError;
use crate::models::{InvalidEnum, SeverityError};

/// Structured error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("No active session")]
    NoActiveSession,
    #[error("No data: {0}")]
    NoData(String),
    #[error("Internal error: {0}")]
    Internal(String),
    #[error("Invalid request: {0}")]
    BadRequest(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::NoActiveSession => (
                StatusCode::SERVICE_UNAVAILABLE,
                "NO_SESSION",
                "No active session, register first".to_string(),
            ),
            ApiError::NoData(detail) => (StatusCode::NOT_FOUND, "NO_DATA", detail.clone()),
            ApiError::Internal(detail) => {
                tracing::error!(detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "An internal error occurred".to_string(),
                )
            }
            ApiError::BadRequest(detail) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", detail.clone())
            }
        };

        let body = ErrorBody {
            error: ErrorDetail { code, message },
        };

        (status, Json(body)).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NoActiveSession => ApiError::NoActiveSession,
            CoreError::LockPoisoned => ApiError::Internal("lock poisoned".into()),
        }
    }
}

impl From<SeverityError> for ApiError {
    fn from(err: SeverityError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<InvalidEnum> for ApiError {
    fn from(err: InvalidEnum) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

// Extractor rejections become 400s in the same envelope as every other error.

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
