//! User collection and single-user routes.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use user_console_common::{CreateUserRequest, UpdateUserRequest, User, UserStats};

use crate::error::ApiError;
use crate::store::StoreError;
use crate::{stats as aggregate, validate, AppState};

use super::stats::{fetch_active, fetch_registration, fetch_roles};

/// Map a store failure onto the API taxonomy: missing record vs backend
/// fault. The fault detail stays in the log.
fn store_error(err: StoreError, message: &str) -> ApiError {
    match err {
        StoreError::NotFound => ApiError::NotFound("User not found"),
        other => {
            tracing::error!("{}: {}", message, other);
            ApiError::Upstream(message.to_string())
        }
    }
}

/// GET /users - the full collection, no pagination.
async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<Vec<User>>, ApiError> {
    match state.store.list().await {
        Ok(users) => Ok(Json(users)),
        Err(e) => Err(store_error(e, "Error fetching users")),
    }
}

/// POST /users - validate and create. Nothing is inserted when validation
/// fails; the response carries per-field errors.
async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let valid = validate::new_user(&body, state.config.validation.unknown_role_policy)
        .map_err(ApiError::Validation)?;

    match state.store.insert(valid).await {
        Ok(user) => Ok((StatusCode::CREATED, Json(user))),
        Err(e) => Err(store_error(e, "Error creating user")),
    }
}

/// GET /users/:id
async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<User>, ApiError> {
    match state.store.get(id).await {
        Ok(user) => Ok(Json(user)),
        Err(e) => Err(store_error(e, "Error fetching user")),
    }
}

/// PUT /users/:id - partial patch. Unspecified fields are preserved; the
/// identifier and creation timestamp are never overwritten.
async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<Json<User>, ApiError> {
    let patch = validate::user_patch(&body, state.config.validation.unknown_role_policy)
        .map_err(ApiError::Validation)?;

    match state.store.update(id, patch).await {
        Ok(user) => Ok(Json(user)),
        Err(e) => Err(store_error(e, "Error updating user")),
    }
}

/// DELETE /users/:id - 204 on success; a missing id is 404, never a
/// silent success.
async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    match state.store.delete(id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => Err(store_error(e, "Error deleting user")),
    }
}

/// GET /users/stats - combined dashboard statistics.
async fn user_stats(State(state): State<Arc<AppState>>) -> Result<Json<UserStats>, ApiError> {
    if state.stats_are_local() {
        let users = state
            .store
            .list()
            .await
            .map_err(|e| store_error(e, "Error fetching user stats"))?;
        return Ok(Json(aggregate::user_stats(&users)));
    }

    // Remote mode composes the three sub-resources so every reshape stays
    // in the stats module.
    let active = fetch_active(&state).await?;
    let role_distribution = fetch_roles(&state).await?;
    let monthly_registrations = fetch_registration(&state).await?;
    Ok(Json(UserStats {
        active_count: active.active_count,
        inactive_count: active.inactive_count,
        role_distribution,
        monthly_registrations,
    }))
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/stats", get(user_stats))
        .route(
            "/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
        .with_state(state)
}
