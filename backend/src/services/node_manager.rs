//! Manages connections to the Algorand services the backend depends on.
//!
//! `NodeManager` owns one adapter per external service (algod node, indexer,
//! kmd, sandbox CLI) behind its trait, so handlers and services talk to the
//! traits and tests can swap in in-process implementations.

use std::sync::Arc;

use adapters::{
    AdapterResult, AlgodClient, IndexerAdapter, IndexerClient, KmdAdapter, KmdClient,
    NodeAdapter, SandboxAdapter, SandboxCli,
};

use crate::config::Config;

#[derive(Clone)]
pub struct NodeManager {
    pub node: Arc<dyn NodeAdapter>,
    pub indexer: Arc<dyn IndexerAdapter>,
    pub kmd: Arc<dyn KmdAdapter>,
    pub sandbox: Arc<dyn SandboxAdapter>,
}

impl NodeManager {
    pub fn new(
        node: Arc<dyn NodeAdapter>,
        indexer: Arc<dyn IndexerAdapter>,
        kmd: Arc<dyn KmdAdapter>,
        sandbox: Arc<dyn SandboxAdapter>,
    ) -> Self {
        Self {
            node,
            indexer,
            kmd,
            sandbox,
        }
    }

    /// Builds HTTP clients for the endpoints in `config`. No request is made until first use.
    pub fn connect(config: &Config) -> AdapterResult<Self> {
        let node = AlgodClient::new(&config.algod.url, &config.algod.token)?;
        let indexer = IndexerClient::new(&config.indexer.url, &config.indexer.token)?;
        let kmd = KmdClient::new(&config.kmd.url, &config.kmd.token)?;
        let sandbox = SandboxCli::new(&config.sandbox_dir);
        tracing::info!(
            algod = %config.algod.url,
            indexer = %config.indexer.url,
            kmd = %config.kmd.url,
            sandbox = %sandbox.executable().display(),
            "configured node adapters"
        );
        Ok(Self::new(
            Arc::new(node),
            Arc::new(indexer),
            Arc::new(kmd),
            Arc::new(sandbox),
        ))
    }
}
