//! Role catalog routes - read-only pass-through to the user-service.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use user_console_common::Role;

use crate::error::ApiError;
use crate::upstream::UpstreamError;
use crate::AppState;

/// GET /roles
async fn list_roles(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Role>>, ApiError> {
    match state.upstream.list_roles().await {
        Ok(roles) => Ok(Json(roles)),
        Err(e) => {
            tracing::error!("Error fetching roles: {}", e);
            Err(ApiError::Upstream("Error fetching roles".to_string()))
        }
    }
}

/// GET /roles/:id
async fn get_role(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Role>, ApiError> {
    match state.upstream.get_role(id).await {
        Ok(role) => Ok(Json(role)),
        Err(UpstreamError::NotFound) => Err(ApiError::NotFound("Role not found")),
        Err(e) => {
            tracing::error!("Error fetching role: {}", e);
            Err(ApiError::Upstream("Error fetching role".to_string()))
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/roles", get(list_roles))
        .route("/roles/:id", get(get_role))
        .with_state(state)
}
