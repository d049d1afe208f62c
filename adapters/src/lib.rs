//! Core `adapters` crate for abstracting Algorand node interactions.
//!
//! This crate defines the adapter traits (`NodeAdapter`, `IndexerAdapter`,
//! `KmdAdapter`, `SandboxAdapter`), which outline the functionality the backend
//! needs from an algod node, an indexer, the key management daemon and the
//! sandbox command line tool, and provides the concrete implementations for each.
//! It also carries the small slice of protocol the backend signs with locally:
//! addresses, recovery phrases and transaction encoding.

pub mod account;
pub mod address;
pub mod algod;
pub mod errors;
mod http;
pub mod indexer;
pub mod kmd;
pub mod mnemonic;
pub mod models;
pub mod sandbox;
pub mod transaction;

use async_trait::async_trait;

pub use account::Account;
pub use address::{is_valid_address, Address, ADDRESS_LEN};
pub use algod::AlgodClient;
pub use errors::{AdapterError, AdapterResult, AddressError, MnemonicError};
pub use indexer::IndexerClient;
pub use kmd::KmdClient;
pub use mnemonic::MNEMONIC_LEN;
pub use models::{
    NodeStatus, PendingTransaction, SandboxAccount, SearchQuery, SuggestedParams,
    TransactionRecord, TxType,
};
pub use sandbox::SandboxCli;
pub use transaction::{AssetParams, SignedTransaction, Transaction, NOTE_MAX_LENGTH};

/// Operations served by an algod node.
#[async_trait]
pub trait NodeAdapter: Send + Sync {
    /// Balance of `address` in microAlgos.
    async fn account_balance(&self, address: &str) -> AdapterResult<u64>;

    async fn suggested_params(&self) -> AdapterResult<SuggestedParams>;

    /// Submits a signed transaction and returns its id.
    async fn send_transaction(&self, signed: &SignedTransaction) -> AdapterResult<String>;

    async fn pending_transaction(&self, txid: &str) -> AdapterResult<PendingTransaction>;

    async fn status(&self) -> AdapterResult<NodeStatus>;

    /// Blocks until the node has seen the round after `round`.
    async fn status_after_block(&self, round: u64) -> AdapterResult<NodeStatus>;
}

/// Historical transaction lookups served by an indexer.
#[async_trait]
pub trait IndexerAdapter: Send + Sync {
    async fn search_transactions(&self, query: &SearchQuery)
        -> AdapterResult<Vec<TransactionRecord>>;

    async fn account_transactions(&self, address: &str) -> AdapterResult<Vec<TransactionRecord>> {
        self.search_transactions(&SearchQuery::for_address(address))
            .await
    }
}

/// Wallet operations served by the key management daemon.
#[async_trait]
pub trait KmdAdapter: Send + Sync {
    /// Creates a wallet and returns its id.
    async fn create_wallet(&self, name: &str, password: &str) -> AdapterResult<String>;

    /// Opens the wallet called `name` and returns a handle token for it.
    async fn wallet_handle(&self, name: &str, password: &str) -> AdapterResult<String>;

    async fn generate_key(&self, handle: &str) -> AdapterResult<Address>;

    async fn export_key(
        &self,
        handle: &str,
        password: &str,
        address: &str,
    ) -> AdapterResult<Account>;
}

/// Developer accounts exposed by the sandbox's `goal` tool.
#[async_trait]
pub trait SandboxAdapter: Send + Sync {
    async fn account_list(&self) -> AdapterResult<Vec<SandboxAccount>>;

    /// Recovery phrase of an account held by the sandbox node.
    async fn export_passphrase(&self, address: &str) -> AdapterResult<String>;
}
