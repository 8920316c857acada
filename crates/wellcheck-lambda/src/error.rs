use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use wellcheck_core::error::CoreError;
use wellcheck_instruments::error::ScoringError;

/// Unified API error type for all route handlers.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_string())
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::UnknownInstrument(id) => {
                ApiError::NotFound(format!("instrument not found: {id}"))
            }
            other => ApiError::BadRequest(other.to_string()),
        }
    }
}

impl From<ScoringError> for ApiError {
    fn from(e: ScoringError) -> Self {
        match e {
            ScoringError::InvalidConfiguration { .. } => ApiError::Internal(e.to_string()),
            ScoringError::IncompleteInput { ref missing, .. } => {
                let ids: Vec<String> = missing.iter().map(u32::to_string).collect();
                ApiError::BadRequest(format!("{e} (missing: {})", ids.join(", ")))
            }
            other => ApiError::BadRequest(other.to_string()),
        }
    }
}
