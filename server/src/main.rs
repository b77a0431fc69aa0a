//! AI Compass assistant server. Wires the engine to its HTTP surface:
//! config from `COMPASS_CONFIG` (or defaults plus environment keys), state
//! persisted as JSON files under the configured storage directory.

mod executor;
mod routes;

use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use compass_assistant::config::AssistantConfig;
use compass_assistant::engine::AssistantEngine;
use compass_assistant::store::JsonFileStore;

use crate::executor::CatalogExecutor;
use crate::routes::{router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "compass_server=debug,compass_assistant=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match std::env::var("COMPASS_CONFIG") {
        Ok(path) => AssistantConfig::from_file(Path::new(&path))
            .map_err(|e| anyhow::anyhow!("failed to load config from {path}: {e}"))?,
        Err(_) => AssistantConfig::default(),
    };
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("invalid config: {e}"))?;

    if config.backend.api_key.is_none() {
        tracing::warn!("No backend API key configured; remote fallback and streaming are disabled");
    }

    let store = Arc::new(JsonFileStore::new(&config.storage_dir));
    let engine = Arc::new(AssistantEngine::new(
        &config,
        store,
        Arc::new(CatalogExecutor),
    )?);

    let app = router(AppState { engine });

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("AI Compass assistant server on http://{addr}");
    tracing::info!("  POST /api/chat      - streaming chat proxy");
    tracing::info!("  GET  /api/chat      - liveness/config probe");
    tracing::info!("  POST /api/assistant - full assistant turn");
    tracing::info!("  POST /api/feedback  - record feedback");

    axum::serve(listener, app).await?;
    Ok(())
}
