//! User document export.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};

use crate::error::ApiError;
use crate::upstream::UpstreamError;
use crate::AppState;

/// GET /pdf/:id - stream the generated document for a user.
///
/// Content type and disposition are relayed from the user-service; when
/// the disposition is absent the filename falls back to `user-<id>.pdf`.
async fn user_pdf(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    let upstream = match state.upstream.user_pdf(id).await {
        Ok(response) => response,
        Err(UpstreamError::NotFound) => return Err(ApiError::NotFound("User not found")),
        Err(e) => {
            tracing::error!("Error generating PDF: {}", e);
            return Err(ApiError::Upstream("Error generating PDF".to_string()));
        }
    };

    let content_type = upstream
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/pdf")
        .to_string();
    let disposition = upstream
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| format!("attachment; filename=\"user-{}.pdf\"", id));

    let body = Body::from_stream(upstream.bytes_stream());
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/pdf/:id", get(user_pdf))
        .with_state(state)
}
