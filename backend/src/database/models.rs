//! Rust structs that represent database table mappings.
//!
//! These models define the structure of data as it is stored in and retrieved
//! from the database. Secrets (stored private keys, wallet passwords) are kept
//! out of their serialized form, so the rows can be returned from handlers as is.

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountRow {
    #[serde(skip)]
    pub id: i64,
    pub address: String,
    /// Base64 seed || public key; only standalone accounts carry one.
    #[serde(skip)]
    pub private_key: Option<String>,
    /// Row id of the owning wallet.
    #[serde(skip)]
    pub wallet: Option<i64>,
    pub created: DateTime<Utc>,
}

impl AccountRow {
    pub fn is_standalone(&self) -> bool {
        self.wallet.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WalletRow {
    #[serde(skip)]
    pub id: i64,
    pub wallet_id: String,
    pub name: String,
    #[serde(skip)]
    pub password: String,
    pub created: DateTime<Utc>,
}

/// Issuance parameters recorded for a created asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewAsset {
    pub asset_id: u64,
    pub creator: String,
    pub name: String,
    pub unit: String,
    pub total: u64,
    pub decimals: u32,
    pub frozen: bool,
    pub url: String,
    pub metadata: String,
    pub manager: String,
    pub reserve: String,
    pub freeze: String,
    pub clawback: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetRow {
    #[serde(skip)]
    pub id: i64,
    #[serde(flatten)]
    pub asset: NewAsset,
    pub created: DateTime<Utc>,
}
