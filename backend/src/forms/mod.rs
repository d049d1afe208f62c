//! Request forms and their validation.
//!
//! Each form deserializes from a JSON request body with every field optional,
//! then `validate()` either returns the cleaned request or a `ValidationErrors`
//! map of field name to messages. Errors that concern the form as a whole are
//! filed under `__all__`.

pub mod asset;
pub mod search;
pub mod transfer;
pub mod wallet;

use std::collections::BTreeMap;

use adapters::{Address, MNEMONIC_LEN};
use serde::{Deserialize, Serialize};

pub use asset::{AssetRequest, CreateAssetForm};
pub use search::SearchTransactionsForm;
pub use transfer::{TransferFundsForm, TransferRequest};
pub use wallet::{CreateWalletForm, WalletRequest};

pub const NON_FIELD_ERRORS: &str = "__all__";

pub(crate) const REQUIRED: &str = "This field is required.";
pub(crate) const INVALID_ADDRESS: &str = "Provided value is not a valid Algorand address!";
pub(crate) const INVALID_NUMBER: &str = "Enter a whole number.";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-error set for `field`.
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    /// Single form-level error.
    pub fn non_field(message: impl Into<String>) -> Self {
        Self::field(NON_FIELD_ERRORS, message)
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `Ok(value)` when no error was recorded.
    pub fn finish<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

/// A numeric input, accepted as a JSON number or as text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumberInput {
    Integer(i64),
    Text(String),
    Other(serde_json::Value),
}

impl NumberInput {
    pub fn is_blank(&self) -> bool {
        matches!(self, NumberInput::Text(text) if text.trim().is_empty())
    }
}

impl From<&str> for NumberInput {
    fn from(value: &str) -> Self {
        NumberInput::Text(value.to_string())
    }
}

pub(crate) fn is_blank(input: Option<&NumberInput>) -> bool {
    input.map_or(true, NumberInput::is_blank)
}

/// Whole number from `input`; `None` when blank or malformed, the latter
/// recorded on `field`.
pub(crate) fn clean_whole_number(
    errors: &mut ValidationErrors,
    field: &str,
    input: Option<&NumberInput>,
) -> Option<i64> {
    match input? {
        NumberInput::Integer(value) => Some(*value),
        NumberInput::Text(text) if text.trim().is_empty() => None,
        NumberInput::Text(text) => match text.trim().parse::<i64>() {
            Ok(value) => Some(value),
            Err(_) => {
                errors.add(field, INVALID_NUMBER);
                None
            }
        },
        NumberInput::Other(_) => {
            errors.add(field, INVALID_NUMBER);
            None
        }
    }
}

/// Required whole number of at least `min`.
pub(crate) fn clean_required_number(
    errors: &mut ValidationErrors,
    field: &str,
    input: Option<&NumberInput>,
    min: i64,
) -> Option<i64> {
    if is_blank(input) {
        errors.add(field, REQUIRED);
        return None;
    }
    let value = clean_whole_number(errors, field, input)?;
    if value < min {
        errors.add(
            field,
            format!("Ensure this value is greater than or equal to {min}."),
        );
        return None;
    }
    Some(value)
}

pub(crate) fn max_length(errors: &mut ValidationErrors, field: &str, value: &str, max: usize) {
    let count = value.chars().count();
    if count > max {
        errors.add(
            field,
            format!("Ensure this value has at most {max} characters (it has {count})."),
        );
    }
}

pub(crate) fn min_length(errors: &mut ValidationErrors, field: &str, value: &str, min: usize) {
    let count = value.chars().count();
    if count < min {
        errors.add(
            field,
            format!("Ensure this value has at least {min} characters (it has {count})."),
        );
    }
}

/// Required, well-formed address.
pub(crate) fn clean_address(
    errors: &mut ValidationErrors,
    field: &str,
    value: &str,
) -> Option<Address> {
    let value = value.trim();
    if value.is_empty() {
        errors.add(field, REQUIRED);
        return None;
    }
    match value.parse::<Address>() {
        Ok(address) => Some(address),
        Err(_) => {
            errors.add(field, INVALID_ADDRESS);
            None
        }
    }
}

/// Empty, or a well-formed address.
pub(crate) fn clean_optional_address(
    errors: &mut ValidationErrors,
    field: &str,
    value: &str,
) -> Option<Address> {
    if value.trim().is_empty() {
        return None;
    }
    clean_address(errors, field, value)
}

pub(crate) fn clean_passphrase(errors: &mut ValidationErrors, value: &str) -> String {
    let words: Vec<&str> = value.split_whitespace().collect();
    if words.len() != MNEMONIC_LEN {
        errors.add(
            "passphrase",
            format!("Passphrase must have exactly {MNEMONIC_LEN} words!"),
        );
    }
    words.join(" ")
}
