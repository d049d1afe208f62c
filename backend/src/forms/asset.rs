//! Form for creating Algorand assets.

use adapters::transaction::METADATA_HASH_LEN;
use adapters::{Address, AssetParams};
use serde::Deserialize;

use super::{
    clean_address, clean_optional_address, clean_passphrase, clean_required_number, max_length,
    NumberInput, ValidationErrors, REQUIRED,
};

const NAME_MAX_LENGTH: usize = 32;
const UNIT_MAX_LENGTH: usize = 8;
const URL_MAX_LENGTH: usize = 96;
const MAX_DECIMALS: i64 = 19;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateAssetForm {
    pub creator: String,
    pub name: String,
    pub unit: String,
    pub total: Option<NumberInput>,
    pub decimals: Option<NumberInput>,
    pub frozen: bool,
    pub url: String,
    pub metadata: String,
    pub manager: String,
    pub reserve: String,
    pub freeze: String,
    pub clawback: String,
    pub passphrase: String,
}

/// A validated asset issuance request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRequest {
    pub creator: Address,
    pub passphrase: String,
    pub name: String,
    pub unit: String,
    pub total: u64,
    pub decimals: u32,
    pub frozen: bool,
    pub url: String,
    pub metadata: String,
    pub manager: Option<Address>,
    pub reserve: Option<Address>,
    pub freeze: Option<Address>,
    pub clawback: Option<Address>,
}

impl AssetRequest {
    pub fn params(&self) -> AssetParams {
        AssetParams {
            metadata_hash: self.metadata.as_bytes().to_vec(),
            asset_name: self.name.clone(),
            url: self.url.clone(),
            clawback: self.clawback,
            decimals: self.decimals,
            default_frozen: self.frozen,
            freeze: self.freeze,
            manager: self.manager,
            reserve: self.reserve,
            total: self.total,
            unit_name: self.unit.clone(),
        }
    }
}

fn required_text(errors: &mut ValidationErrors, field: &str, value: &str, max: usize) {
    if value.is_empty() {
        errors.add(field, REQUIRED);
    } else {
        max_length(errors, field, value, max);
    }
}

fn clean_integer(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<&NumberInput>,
    min: i64,
    max: Option<i64>,
) -> Option<i64> {
    let value = clean_required_number(errors, field, value, min)?;
    if let Some(max) = max {
        if value > max {
            errors.add(
                field,
                format!("Ensure this value is less than or equal to {max}."),
            );
            return None;
        }
    }
    Some(value)
}

impl CreateAssetForm {
    pub fn validate(&self) -> Result<AssetRequest, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let creator = clean_address(&mut errors, "creator", &self.creator);
        let manager = clean_optional_address(&mut errors, "manager", &self.manager);
        let reserve = clean_optional_address(&mut errors, "reserve", &self.reserve);
        let freeze = clean_optional_address(&mut errors, "freeze", &self.freeze);
        let clawback = clean_optional_address(&mut errors, "clawback", &self.clawback);

        let name = self.name.trim();
        let unit = self.unit.trim();
        let url = self.url.trim();
        required_text(&mut errors, "name", name, NAME_MAX_LENGTH);
        required_text(&mut errors, "unit", unit, UNIT_MAX_LENGTH);

        if !url.is_empty() {
            max_length(&mut errors, "url", url, URL_MAX_LENGTH);
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                errors.add("url", "Enter a valid URL.");
            }
        }

        if !self.metadata.is_empty() && self.metadata.len() != METADATA_HASH_LEN {
            errors.add(
                "metadata",
                format!(
                    "Metadata hash must be exactly {} bytes (it has {}).",
                    METADATA_HASH_LEN,
                    self.metadata.len()
                ),
            );
        }

        let total = clean_integer(&mut errors, "total", self.total.as_ref(), 1, None);
        let decimals = clean_integer(
            &mut errors,
            "decimals",
            self.decimals.as_ref(),
            0,
            Some(MAX_DECIMALS),
        );
        let passphrase = clean_passphrase(&mut errors, &self.passphrase);

        match (creator, total, decimals) {
            (Some(creator), Some(total), Some(decimals)) => errors.finish(AssetRequest {
                creator,
                passphrase,
                name: name.to_string(),
                unit: unit.to_string(),
                total: total as u64,
                decimals: decimals as u32,
                frozen: self.frozen,
                url: url.to_string(),
                metadata: self.metadata.clone(),
                manager,
                reserve,
                freeze,
                clawback,
            }),
            _ => Err(errors),
        }
    }
}
