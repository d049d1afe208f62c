//! Payment and asset configuration transactions.
//!
//! Transactions are encoded as canonical msgpack: map keys in sorted order,
//! zero-valued fields omitted and byte strings written as `bin`. Field
//! declaration order below is therefore significant.

use data_encoding::BASE32_NOPAD;
use serde::{Serialize, Serializer};
use sha2::{Digest, Sha512_256};

use crate::address::Address;
use crate::errors::{AdapterError, AdapterResult};
use crate::models::SuggestedParams;

/// Upper bound on the note field, in bytes.
pub const NOTE_MAX_LENGTH: usize = 1024;
/// Size of an asset metadata hash.
pub const METADATA_HASH_LEN: usize = 32;
/// Number of rounds a suggested transaction stays valid.
pub const VALIDITY_WINDOW: u64 = 1000;

const TX_TAG: &[u8] = b"TX";

fn as_bin<T: AsRef<[u8]>, S: Serializer>(value: &T, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_bytes(value.as_ref())
}

fn is_zero(value: &u64) -> bool {
    *value == 0
}

fn is_zero_u32(value: &u32) -> bool {
    *value == 0
}

fn is_false(value: &bool) -> bool {
    !*value
}

fn non_zero(address: Option<Address>) -> Option<Address> {
    address.filter(|a| !a.is_zero())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TxKind {
    #[serde(rename = "pay")]
    Payment,
    #[serde(rename = "acfg")]
    AssetConfig,
}

/// Asset issuance parameters (`apar`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssetParams {
    #[serde(rename = "am", skip_serializing_if = "Vec::is_empty", serialize_with = "as_bin")]
    pub metadata_hash: Vec<u8>,
    #[serde(rename = "an", skip_serializing_if = "String::is_empty")]
    pub asset_name: String,
    #[serde(rename = "au", skip_serializing_if = "String::is_empty")]
    pub url: String,
    #[serde(rename = "c", skip_serializing_if = "Option::is_none")]
    pub clawback: Option<Address>,
    #[serde(rename = "dc", skip_serializing_if = "is_zero_u32")]
    pub decimals: u32,
    #[serde(rename = "df", skip_serializing_if = "is_false")]
    pub default_frozen: bool,
    #[serde(rename = "f", skip_serializing_if = "Option::is_none")]
    pub freeze: Option<Address>,
    #[serde(rename = "m", skip_serializing_if = "Option::is_none")]
    pub manager: Option<Address>,
    #[serde(rename = "r", skip_serializing_if = "Option::is_none")]
    pub reserve: Option<Address>,
    #[serde(rename = "t", skip_serializing_if = "is_zero")]
    pub total: u64,
    #[serde(rename = "un", skip_serializing_if = "String::is_empty")]
    pub unit_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    #[serde(rename = "amt", skip_serializing_if = "is_zero")]
    pub amount: u64,
    #[serde(rename = "apar", skip_serializing_if = "Option::is_none")]
    pub asset_params: Option<AssetParams>,
    #[serde(rename = "fee", skip_serializing_if = "is_zero")]
    pub fee: u64,
    #[serde(rename = "fv", skip_serializing_if = "is_zero")]
    pub first_valid: u64,
    #[serde(rename = "gen", skip_serializing_if = "String::is_empty")]
    pub genesis_id: String,
    #[serde(rename = "gh", skip_serializing_if = "Vec::is_empty", serialize_with = "as_bin")]
    pub genesis_hash: Vec<u8>,
    #[serde(rename = "lv", skip_serializing_if = "is_zero")]
    pub last_valid: u64,
    #[serde(rename = "note", skip_serializing_if = "Vec::is_empty", serialize_with = "as_bin")]
    pub note: Vec<u8>,
    #[serde(rename = "rcv", skip_serializing_if = "Option::is_none")]
    pub receiver: Option<Address>,
    #[serde(rename = "snd")]
    pub sender: Address,
    #[serde(rename = "type")]
    pub kind: TxKind,
}

impl Transaction {
    fn base(sender: Address, kind: TxKind, params: &SuggestedParams) -> Self {
        Self {
            amount: 0,
            asset_params: None,
            fee: params.fee,
            first_valid: params.first_valid,
            genesis_id: params.genesis_id.clone(),
            genesis_hash: params.genesis_hash.clone(),
            last_valid: params.last_valid,
            note: Vec::new(),
            receiver: None,
            sender,
            kind,
        }
    }

    /// Builds a payment of `amount` microAlgos with the fee derived from `params`.
    pub fn payment(
        sender: Address,
        receiver: Address,
        amount: u64,
        note: Vec<u8>,
        params: &SuggestedParams,
    ) -> AdapterResult<Self> {
        if note.len() > NOTE_MAX_LENGTH {
            return Err(AdapterError::Encoding(format!(
                "note is {} bytes, limit is {}",
                note.len(),
                NOTE_MAX_LENGTH
            )));
        }
        let mut txn = Self::base(sender, TxKind::Payment, params);
        txn.amount = amount;
        txn.receiver = non_zero(Some(receiver));
        txn.note = note;
        txn.assign_fee(params)?;
        Ok(txn)
    }

    /// Builds an asset creation transaction.
    pub fn asset_config(
        sender: Address,
        asset: AssetParams,
        params: &SuggestedParams,
    ) -> AdapterResult<Self> {
        if !asset.metadata_hash.is_empty() && asset.metadata_hash.len() != METADATA_HASH_LEN {
            return Err(AdapterError::Encoding(format!(
                "metadata hash must be {} bytes",
                METADATA_HASH_LEN
            )));
        }
        let asset = AssetParams {
            manager: non_zero(asset.manager),
            reserve: non_zero(asset.reserve),
            freeze: non_zero(asset.freeze),
            clawback: non_zero(asset.clawback),
            ..asset
        };
        let mut txn = Self::base(sender, TxKind::AssetConfig, params);
        txn.asset_params = Some(asset);
        txn.assign_fee(params)?;
        Ok(txn)
    }

    fn assign_fee(&mut self, params: &SuggestedParams) -> AdapterResult<()> {
        let size = self.estimated_signed_size()? as u64;
        self.fee = params.fee.saturating_mul(size).max(params.min_fee);
        Ok(())
    }

    fn estimated_signed_size(&self) -> AdapterResult<usize> {
        let placeholder = SignedTransaction {
            signature: [0u8; 64],
            transaction: self.clone(),
        };
        Ok(placeholder.to_bytes()?.len())
    }

    pub fn encode(&self) -> AdapterResult<Vec<u8>> {
        rmp_serde::to_vec_named(self).map_err(|err| AdapterError::Encoding(err.to_string()))
    }

    /// Bytes covered by the sender's signature.
    pub fn bytes_to_sign(&self) -> AdapterResult<Vec<u8>> {
        let encoded = self.encode()?;
        let mut out = Vec::with_capacity(TX_TAG.len() + encoded.len());
        out.extend_from_slice(TX_TAG);
        out.extend_from_slice(&encoded);
        Ok(out)
    }

    /// Transaction id as reported by the node.
    pub fn id(&self) -> AdapterResult<String> {
        let digest = Sha512_256::digest(self.bytes_to_sign()?);
        Ok(BASE32_NOPAD.encode(&digest))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignedTransaction {
    #[serde(rename = "sig", serialize_with = "as_bin")]
    pub signature: [u8; 64],
    #[serde(rename = "txn")]
    pub transaction: Transaction,
}

impl SignedTransaction {
    /// Wire form accepted by the node's raw transaction endpoint.
    pub fn to_bytes(&self) -> AdapterResult<Vec<u8>> {
        rmp_serde::to_vec_named(self).map_err(|err| AdapterError::Encoding(err.to_string()))
    }

    pub fn signature_hex(&self) -> String {
        hex::encode(self.signature)
    }
}
