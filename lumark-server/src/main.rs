//! Lumark Server - REST API for invisible image provenance marking
//!
//! Exposes the lumark-core codec via HTTP endpoints:
//! - POST /mark     - Embed a payload and persist the marking record
//! - POST /verify   - Recover a payload and resolve it to its purpose
//! - POST /capacity - Gate an image without persisting anything
//! - POST /overlay  - Render the block geometry for inspection
//! - GET  /history  - List recent marking records

use std::sync::Arc;

use lumark_core::Watermarker;
use lumark_server::{create_router_with_config, AppState, Config, PostgresMarkStore};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();

    let store = match &config.database_url {
        Some(url) => {
            match PostgresMarkStore::new(
                url,
                config.database_max_connections,
                config.database_min_connections,
            )
            .await
            {
                Ok(store) => Some(Arc::new(store)),
                Err(e) => {
                    tracing::error!(error = %e, "Mark store connection failed; continuing without persistence");
                    None
                }
            }
        }
        None => {
            tracing::warn!("DATABASE_URL not set; marking records will not be persisted");
            None
        }
    };

    let state = AppState {
        store,
        watermarker: Arc::new(Watermarker::default()),
    };

    let app = create_router_with_config(&config, state);
    let addr = config.socket_addr();

    tracing::info!(%addr, "Lumark server listening");
    tracing::info!("Swagger UI available at http://{}/api-docs", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind server address");
    axum::serve(listener, app)
        .await
        .expect("Server terminated unexpectedly");
}
