pub mod config;
pub mod error;
pub mod logging;
pub mod routes;
pub mod stats;
pub mod store;
pub mod test_util;
pub mod upstream;
pub mod validate;

pub use config::{Config, StoreMode, UnknownRolePolicy};
pub use error::ApiError;
pub use store::{MemoryStore, RemoteStore, StoreError, UserStore};
pub use upstream::{UpstreamError, UserServiceClient};

use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    /// Backing source for the user collection (memory or remote).
    pub store: Arc<dyn UserStore>,
    /// Upstream client; roles, stats and document export always go
    /// through it in remote mode, roles and documents even in memory mode.
    pub upstream: UserServiceClient,
}

impl AppState {
    /// Statistics are aggregated locally only when the in-memory store is
    /// the backing source; otherwise they are fetched upstream and
    /// reshaped at the route boundary.
    pub fn stats_are_local(&self) -> bool {
        self.config.store.mode == StoreMode::Memory
    }
}
