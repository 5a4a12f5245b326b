//! API error taxonomy
//!
//! Storage functions return `anyhow::Result`; anything that escapes a
//! handler is folded into `ApiError` and rendered as a JSON error
//! body with the matching status code.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// A required field is missing or malformed.
    #[error("{0}")]
    Validation(String),

    /// The identity key does not resolve to a record.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// The requested page overshoots a non-empty result set.
    #[error("no more data")]
    PageOutOfRange,

    /// CSV upload with a non-CSV content type.
    #[error("invalid file type")]
    UnsupportedMediaType,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) | ApiError::PageOutOfRange => StatusCode::NOT_FOUND,
            ApiError::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::Internal(err) => {
                tracing::error!("request failed: {err:#}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let message = match &self {
            // don't leak internal error chains to clients
            ApiError::Internal(_) => "internal server error".to_string(),
            other => other.to_string(),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
