//! API error handling: maps core prediction errors onto HTTP statuses
//! with structured JSON bodies.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::classifier::PredictionError;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "malformed_input", msg),
            Self::ServiceUnavailable(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, "service_unavailable", msg)
            }
            Self::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "classification_failure",
                msg,
            ),
        };

        let body = ErrorResponse {
            error: message,
            code: code.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

// Malformed input is the client's fault; an unavailable model or a
// classification fault is ours. The original service folded all three
// into one client error; they are kept apart here.
impl From<PredictionError> for ApiError {
    fn from(err: PredictionError) -> Self {
        match err {
            PredictionError::MalformedInput(msg) => Self::BadRequest(msg),
            PredictionError::ServiceUnavailable => Self::ServiceUnavailable(
                "model not loaded; train and install an artifact, then restart".into(),
            ),
            PredictionError::ClassificationFailure(msg) => Self::Internal(msg),
        }
    }
}
