//! The single translation boundary from component errors to HTTP.
//!
//! Components classify failures at the point of origin; nothing below this
//! module emits an HTTP-shaped error. Unexpected failures surface with a
//! generic detail only.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::domain::error::ValidationError;
use crate::error::{AuthError, SubmissionError};

use super::dto::ErrorBody;

/// An HTTP-ready error: status code plus a human-readable detail.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    /// Generic 500; internal error text never reaches the caller.
    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
    }

    pub fn rate_limited() -> Self {
        Self::new(StatusCode::TOO_MANY_REQUESTS, "rate limit exceeded")
    }

    pub fn validation(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, detail)
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                detail: self.detail,
            }),
        )
            .into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Missing => Self::new(StatusCode::FORBIDDEN, "not authenticated"),
            other => Self::new(StatusCode::UNAUTHORIZED, other.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::validation(err.to_string())
    }
}

impl From<SubmissionError> for ApiError {
    fn from(err: SubmissionError) -> Self {
        match err {
            SubmissionError::NotConfigured(key) => Self::new(
                StatusCode::SERVICE_UNAVAILABLE,
                format!("service not configured: {key}"),
            ),
            SubmissionError::QueueUnavailable(_) => {
                Self::new(StatusCode::BAD_GATEWAY, "queue service unavailable")
            }
            SubmissionError::StoreUnavailable(_) => {
                Self::new(StatusCode::BAD_GATEWAY, "status store unavailable")
            }
            SubmissionError::Internal(_) => Self::internal(),
        }
    }
}
