//! Form for searching historical transactions through the indexer.

use adapters::{SearchQuery, TxType};
use serde::Deserialize;

use super::{clean_whole_number, is_blank, NumberInput, ValidationErrors};

/// Transaction types offered by the search form, with their labels.
pub const TXN_TYPE_CHOICES: &[(&str, &str)] = &[
    ("", "All types"),
    ("pay", "Payment"),
    ("keyreg", "Key registration"),
    ("acfg", "Asset configuration"),
    ("axfer", "Asset transfer"),
    ("afrz", "Asset freeze"),
];

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchTransactionsForm {
    pub note_prefix: String,
    pub address: String,
    pub asset_id: Option<NumberInput>,
    pub txid: String,
    pub block: Option<NumberInput>,
    pub txn_type: String,
}

/// Non-negative whole number, or `None` when blank or invalid.
fn clean_index(
    errors: &mut ValidationErrors,
    field: &str,
    input: Option<&NumberInput>,
) -> Option<u64> {
    let value = clean_whole_number(errors, field, input)?;
    match u64::try_from(value) {
        Ok(value) => Some(value),
        Err(_) => {
            errors.add(field, "Ensure this value is greater than or equal to 0.");
            None
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

impl SearchTransactionsForm {
    pub fn validate(&self) -> Result<SearchQuery, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let note_prefix = self.note_prefix.trim();
        let address = self.address.trim();
        let txid = self.txid.trim();
        let txn_type = self.txn_type.trim();

        if [note_prefix, address, txid, txn_type]
            .iter()
            .all(|value| value.is_empty())
            && is_blank(self.asset_id.as_ref())
            && is_blank(self.block.as_ref())
        {
            return Err(ValidationErrors::non_field(
                "You must fill at least one field!",
            ));
        }

        if !note_prefix.is_ascii() {
            errors.add("note_prefix", "Note prefix must be ASCII text.");
        }

        let tx_type = if txn_type.is_empty() {
            None
        } else if TXN_TYPE_CHOICES.iter().any(|(value, _)| *value == txn_type) {
            txn_type.parse::<TxType>().ok()
        } else {
            errors.add(
                "txn_type",
                format!("Select a valid choice. {txn_type} is not one of the available choices."),
            );
            None
        };

        let asset_id = clean_index(&mut errors, "asset_id", self.asset_id.as_ref());
        let round = clean_index(&mut errors, "block", self.block.as_ref());

        errors.finish(SearchQuery {
            note_prefix: note_prefix.as_bytes().to_vec(),
            address: non_empty(address),
            asset_id,
            txid: non_empty(txid),
            round,
            tx_type,
        })
    }
}
