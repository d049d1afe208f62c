//! Generic data models for the `adapters` crate.
//!
//! These models define common, abstracted representations of Algorand
//! entities (suggested parameters, node status, pending and historical
//! transactions, sandbox accounts) that any adapter implementation returns,
//! allowing the backend services to interact with a consistent data format.

use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::errors::AdapterError;
use crate::transaction::VALIDITY_WINDOW;

/// Parameters needed to build a transaction that the node will accept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestedParams {
    /// Fee per byte, in microAlgos.
    pub fee: u64,
    pub min_fee: u64,
    pub first_valid: u64,
    pub last_valid: u64,
    pub genesis_id: String,
    pub genesis_hash: Vec<u8>,
}

/// Body of algod's `GET /v2/transactions/params`.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionParamsResponse {
    pub fee: u64,
    #[serde(rename = "min-fee")]
    pub min_fee: u64,
    #[serde(rename = "last-round")]
    pub last_round: u64,
    #[serde(rename = "genesis-id")]
    pub genesis_id: String,
    #[serde(rename = "genesis-hash")]
    pub genesis_hash: String,
}

impl TryFrom<TransactionParamsResponse> for SuggestedParams {
    type Error = AdapterError;

    fn try_from(resp: TransactionParamsResponse) -> Result<Self, Self::Error> {
        let genesis_hash = BASE64
            .decode(resp.genesis_hash.as_bytes())
            .map_err(|err| AdapterError::Decode {
                service: "algod",
                reason: format!("genesis hash: {err}"),
            })?;
        Ok(Self {
            fee: resp.fee,
            min_fee: resp.min_fee,
            first_valid: resp.last_round,
            last_valid: resp.last_round + VALIDITY_WINDOW,
            genesis_id: resp.genesis_id,
            genesis_hash,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct NodeStatus {
    #[serde(rename = "last-round")]
    pub last_round: u64,
}

/// Subset of algod's pending transaction information.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PendingTransaction {
    #[serde(rename = "confirmed-round", default)]
    pub confirmed_round: Option<u64>,
    #[serde(rename = "pool-error", default)]
    pub pool_error: String,
    #[serde(rename = "asset-index", default)]
    pub asset_index: Option<u64>,
}

impl PendingTransaction {
    pub fn is_confirmed(&self) -> bool {
        self.confirmed_round.unwrap_or(0) > 0
    }
}

/// Transaction kinds understood by the indexer's `tx-type` filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxType {
    Pay,
    Keyreg,
    Acfg,
    Axfer,
    Afrz,
    Appl,
    Stpf,
    Hb,
}

impl TxType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxType::Pay => "pay",
            TxType::Keyreg => "keyreg",
            TxType::Acfg => "acfg",
            TxType::Axfer => "axfer",
            TxType::Afrz => "afrz",
            TxType::Appl => "appl",
            TxType::Stpf => "stpf",
            TxType::Hb => "hb",
        }
    }
}

impl fmt::Display for TxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TxType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pay" => Ok(TxType::Pay),
            "keyreg" => Ok(TxType::Keyreg),
            "acfg" => Ok(TxType::Acfg),
            "axfer" => Ok(TxType::Axfer),
            "afrz" => Ok(TxType::Afrz),
            "appl" => Ok(TxType::Appl),
            "stpf" => Ok(TxType::Stpf),
            "hb" => Ok(TxType::Hb),
            other => Err(format!("unknown transaction type: {other}")),
        }
    }
}

/// Filters for an indexer transaction search. Empty fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub note_prefix: Vec<u8>,
    pub address: Option<String>,
    pub asset_id: Option<u64>,
    pub txid: Option<String>,
    pub round: Option<u64>,
    pub tx_type: Option<TxType>,
}

impl SearchQuery {
    pub fn for_address(address: impl Into<String>) -> Self {
        Self {
            address: Some(address.into()),
            ..Default::default()
        }
    }

    /// Query string pairs in the indexer's parameter names.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if !self.note_prefix.is_empty() {
            pairs.push(("note-prefix", BASE64.encode(&self.note_prefix)));
        }
        if let Some(address) = &self.address {
            pairs.push(("address", address.clone()));
        }
        if let Some(asset_id) = self.asset_id {
            pairs.push(("asset-id", asset_id.to_string()));
        }
        if let Some(txid) = &self.txid {
            pairs.push(("txid", txid.clone()));
        }
        if let Some(round) = self.round {
            pairs.push(("round", round.to_string()));
        }
        if let Some(tx_type) = self.tx_type {
            pairs.push(("tx-type", tx_type.as_str().to_string()));
        }
        pairs
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentDetails {
    pub amount: u64,
    pub receiver: String,
}

/// A confirmed transaction as reported by the indexer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: String,
    pub sender: String,
    #[serde(rename = "tx-type")]
    pub tx_type: String,
    #[serde(rename = "confirmed-round", default)]
    pub confirmed_round: Option<u64>,
    #[serde(rename = "round-time", default)]
    pub round_time: Option<u64>,
    #[serde(default)]
    pub fee: u64,
    /// Base64 encoded, as delivered by the indexer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(rename = "payment-transaction", default, skip_serializing_if = "Option::is_none")]
    pub payment: Option<PaymentDetails>,
    #[serde(rename = "created-asset-index", default, skip_serializing_if = "Option::is_none")]
    pub created_asset_index: Option<u64>,
}

impl TransactionRecord {
    /// Note decoded as UTF-8 text, when it is.
    pub fn note_text(&self) -> Option<String> {
        let raw = BASE64.decode(self.note.as_deref()?).ok()?;
        String::from_utf8(raw).ok()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionsResponse {
    #[serde(default)]
    pub transactions: Vec<TransactionRecord>,
}

/// An account known to the sandbox's `goal` tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SandboxAccount {
    pub address: String,
    pub balance: u64,
}
