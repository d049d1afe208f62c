//! Main entry point for the AlgoDesk backend.
//!
//! This file initializes logging, loads configuration, opens the database,
//! configures the node adapters and starts the Axum web server with all API
//! routes and middleware registered.

use anyhow::Context;
use backend::config::Config;
use backend::database::Database;
use backend::services::node_manager::NodeManager;
use backend::{app, AppState};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("ALGODESK_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = Config::load().context("loading configuration")?;
    let db = Database::open(&config.database_path)
        .with_context(|| format!("opening {}", config.database_path.display()))?;
    let nodes = NodeManager::connect(&config).context("configuring node adapters")?;

    let addr = config.bind_address;
    let app = app(AppState::new(db, nodes, config));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!("listening on {}", addr);

    axum::serve(listener, app).await.context("serving HTTP")?;
    Ok(())
}
