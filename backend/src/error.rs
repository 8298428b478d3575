//! Error types for the BFF route layer.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use user_console_common::ErrorBody;

use crate::validate::ValidationErrors;

/// Error surfaced by BFF route handlers.
///
/// `Upstream` carries only a client-safe message; the original failure is
/// logged where it occurs and never reaches the response body.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("validation failed")]
    Validation(ValidationErrors),

    #[error("{0}")]
    NotFound(&'static str),

    #[error("{0}")]
    Upstream(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorBody {
                    message: "Validation failed".to_string(),
                    errors: Some(errors.into_map()),
                }),
            )
                .into_response(),
            ApiError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                Json(ErrorBody::message(message)),
            )
                .into_response(),
            ApiError::Upstream(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody::message(message)),
            )
                .into_response(),
        }
    }
}
