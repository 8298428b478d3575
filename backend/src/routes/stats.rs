//! Statistics sub-resource routes.
//!
//! This module owns the reshaping boundary: the raw field names served by
//! the user-service (`active`/`inactive`, `{year, month}` pairs, role-name
//! rows) are renamed into the canonical dashboard shapes here, and nowhere
//! else. In memory mode the numbers come from the local aggregator over
//! the store snapshot instead.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use user_console_common::{ActiveStats, MonthlyRegistration, RoleDistribution};

use crate::error::ApiError;
use crate::upstream::{RawMonthlyCount, RawRoleCount, UpstreamError};
use crate::{stats as aggregate, AppState};

fn stats_error(err: UpstreamError, message: &str) -> ApiError {
    tracing::error!("{}: {}", message, err);
    ApiError::Upstream(message.to_string())
}

fn snapshot_error(err: crate::store::StoreError, message: &str) -> ApiError {
    tracing::error!("{}: {}", message, err);
    ApiError::Upstream(message.to_string())
}

pub(crate) async fn fetch_active(state: &AppState) -> Result<ActiveStats, ApiError> {
    if state.stats_are_local() {
        let users = state
            .store
            .list()
            .await
            .map_err(|e| snapshot_error(e, "Error fetching active/inactive stats"))?;
        return Ok(aggregate::active_split(&users));
    }
    match state.upstream.active_stats().await {
        Ok(raw) => Ok(ActiveStats {
            active_count: raw.active,
            inactive_count: raw.inactive,
        }),
        Err(e) => Err(stats_error(e, "Error fetching active/inactive stats")),
    }
}

pub(crate) async fn fetch_roles(state: &AppState) -> Result<RoleDistribution, ApiError> {
    if state.stats_are_local() {
        let users = state
            .store
            .list()
            .await
            .map_err(|e| snapshot_error(e, "Error fetching role distribution stats"))?;
        return Ok(aggregate::role_distribution(&users));
    }
    match state.upstream.role_stats().await {
        Ok(rows) => Ok(reshape_roles(rows)),
        Err(e) => Err(stats_error(e, "Error fetching role distribution stats")),
    }
}

pub(crate) async fn fetch_registration(
    state: &AppState,
) -> Result<Vec<MonthlyRegistration>, ApiError> {
    if state.stats_are_local() {
        let users = state
            .store
            .list()
            .await
            .map_err(|e| snapshot_error(e, "Error fetching registration stats"))?;
        return Ok(aggregate::monthly_registrations(&users));
    }
    match state.upstream.registration_stats().await {
        Ok(rows) => Ok(reshape_registration(rows)),
        Err(e) => Err(stats_error(e, "Error fetching registration stats")),
    }
}

/// Fold role-name rows into the fixed three buckets; rows with a name
/// outside the catalog are skipped.
fn reshape_roles(rows: Vec<RawRoleCount>) -> RoleDistribution {
    let mut dist = RoleDistribution::default();
    for row in rows {
        match row.role.as_str() {
            "Admin" => dist.admin = row.count,
            "User" => dist.user = row.count,
            "Guest" => dist.guest = row.count,
            _ => {}
        }
    }
    dist
}

/// Join `{year, month}` pairs into zero-padded `"YYYY-MM"` keys and
/// re-sort; upstream ordering is not trusted.
fn reshape_registration(rows: Vec<RawMonthlyCount>) -> Vec<MonthlyRegistration> {
    let mut months: Vec<MonthlyRegistration> = rows
        .into_iter()
        .map(|row| MonthlyRegistration {
            month: format!("{:04}-{:02}", row.year, row.month),
            count: row.count,
        })
        .collect();
    months.sort_by(|a, b| a.month.cmp(&b.month));
    months
}

/// GET /stats/active
async fn get_active(State(state): State<Arc<AppState>>) -> Result<Json<ActiveStats>, ApiError> {
    fetch_active(&state).await.map(Json)
}

/// GET /stats/roles
async fn get_roles(State(state): State<Arc<AppState>>) -> Result<Json<RoleDistribution>, ApiError> {
    fetch_roles(&state).await.map(Json)
}

/// GET /stats/registration
async fn get_registration(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<MonthlyRegistration>>, ApiError> {
    fetch_registration(&state).await.map(Json)
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/stats/active", get(get_active))
        .route("/stats/roles", get(get_roles))
        .route("/stats/registration", get(get_registration))
        .with_state(state)
}
