//! Truerand — API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use truerand_core::error::GenerationError;

/// Startup errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// An environment variable holds an unusable value.
    #[error("configuration error: {0}")]
    Config(String),

    /// Tracing or span export could not be set up.
    #[error("telemetry error: {0}")]
    Telemetry(String),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// Envelope `code` reported on every failure.
pub const ERROR_CODE: &str = "Error";

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Envelope outcome, always `"Error"`.
    pub code: &'static str,
    /// Machine-readable error kind.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// HTTP-layer wrapper around `GenerationError` that implements `IntoResponse`.
#[derive(Debug)]
pub struct ApiError(pub GenerationError);

impl From<GenerationError> for ApiError {
    fn from(err: GenerationError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match &self.0 {
            GenerationError::RateLimitExceeded => {
                (StatusCode::TOO_MANY_REQUESTS, "rate_limit_exceeded")
            }
            GenerationError::InvalidParameter(_) => (StatusCode::BAD_REQUEST, "invalid_parameter"),
            GenerationError::SourceUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "source_unavailable")
            }
            GenerationError::SourceReadFailure(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "source_read_failure")
            }
        };

        let body = ErrorBody {
            code: ERROR_CODE,
            error,
            message: self.0.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
