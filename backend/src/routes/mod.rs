//! BFF route handlers.
//!
//! One router per resource family; [`app`] assembles them with CORS and
//! request logging for both the binary and the integration tests.

pub mod health;
pub mod pdf;
pub mod roles;
pub mod stats;
pub mod users;

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::{middleware, Router};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::{logging, AppState};

/// Build the full application router.
pub fn app(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.cors.origins);

    Router::new()
        .merge(health::router())
        .merge(users::router(state.clone()))
        .merge(roles::router(state.clone()))
        .merge(stats::router(state.clone()))
        .merge(pdf::router(state))
        .layer(cors)
        .layer(middleware::from_fn(logging::request_logger))
}

fn cors_layer(origins: &str) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.trim() == "*" {
        layer.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = origins
            .split(',')
            .filter_map(|origin| origin.trim().parse().ok())
            .collect();
        layer.allow_origin(AllowOrigin::list(origins))
    }
}
