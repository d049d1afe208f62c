//! Logic for collecting and combining account data from several sources.
//!
//! An account page needs the stored record, the live balance from algod and
//! the transaction history from the indexer. This module gathers those pieces
//! and prepares them for API consumption.

use adapters::TransactionRecord;
use serde::Serialize;

use crate::database::models::{AccountRow, WalletRow};
use crate::errors::AppResult;
use crate::services::node_manager::NodeManager;

/// An indexer transaction with its note decoded for display.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionView {
    #[serde(flatten)]
    pub record: TransactionRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note_text: Option<String>,
}

impl From<TransactionRecord> for TransactionView {
    fn from(record: TransactionRecord) -> Self {
        let note_text = record.note_text();
        Self { record, note_text }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AccountOverview {
    #[serde(flatten)]
    pub account: AccountRow,
    pub balance: u64,
    pub transactions: Vec<TransactionView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WalletOverview {
    #[serde(flatten)]
    pub wallet: WalletRow,
    pub accounts: Vec<AccountRow>,
}

pub async fn account_overview(nodes: &NodeManager, account: AccountRow) -> AppResult<AccountOverview> {
    let balance = nodes.node.account_balance(&account.address).await?;
    let transactions = nodes
        .indexer
        .account_transactions(&account.address)
        .await?
        .into_iter()
        .map(TransactionView::from)
        .collect();
    Ok(AccountOverview {
        account,
        balance,
        transactions,
    })
}

pub fn wallet_overview(wallet: WalletRow, accounts: Vec<AccountRow>) -> WalletOverview {
    WalletOverview { wallet, accounts }
}
