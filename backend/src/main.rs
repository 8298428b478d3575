use std::sync::Arc;

use tokio::net::TcpListener;

use user_console_backend::config::StoreMode;
use user_console_backend::store::{MemoryStore, RemoteStore, UserStore};
use user_console_backend::upstream::UserServiceClient;
use user_console_backend::{logging, routes, AppState, Config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::load()?;

    // Initialize tracing
    logging::init(&config.logging.level);

    tracing::info!("Starting UserConsole BFF");

    // Initialize components
    let upstream = UserServiceClient::new(&config.upstream.base_url, config.upstream.timeout_secs)?;

    let store: Arc<dyn UserStore> = match config.store.mode {
        StoreMode::Memory => {
            tracing::warn!("Using in-memory user store (development only)");
            Arc::new(MemoryStore::new())
        }
        StoreMode::Remote => {
            tracing::info!("Proxying user store to {}", config.upstream.base_url);
            Arc::new(RemoteStore::new(upstream.clone()))
        }
    };

    let state = Arc::new(AppState {
        config: config.clone(),
        store,
        upstream,
    });

    // Build router
    let app = routes::app(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
