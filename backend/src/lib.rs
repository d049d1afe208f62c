//! AlgoDesk backend library.
//!
//! Exposes the application state, router construction and every module the
//! `algodesk` binary wires together, so integration tests can build the same
//! router against an in-memory database and in-process adapters.

pub mod api;
pub mod config;
pub mod database;
pub mod errors;
pub mod forms;
pub mod middleware;
pub mod services;

use std::sync::Arc;

use config::Config;
use database::Database;
use services::node_manager::NodeManager;

pub use api::app;

/// State shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub nodes: Arc<NodeManager>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db: Database, nodes: NodeManager, config: Config) -> Self {
        Self {
            db,
            nodes: Arc::new(nodes),
            config: Arc::new(config),
        }
    }
}
