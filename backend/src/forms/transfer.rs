//! Form for transferring microAlgos between accounts.

use adapters::{Address, ADDRESS_LEN, NOTE_MAX_LENGTH};
use serde::Deserialize;

use super::{
    clean_address, clean_passphrase, clean_required_number, max_length, NumberInput,
    ValidationErrors,
};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TransferFundsForm {
    pub passphrase: String,
    pub receiver: String,
    pub amount: Option<NumberInput>,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    pub passphrase: String,
    pub receiver: Address,
    pub amount: u64,
    pub note: String,
}

impl TransferFundsForm {
    pub fn validate(&self) -> Result<TransferRequest, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let passphrase = clean_passphrase(&mut errors, &self.passphrase);

        max_length(&mut errors, "receiver", self.receiver.trim(), ADDRESS_LEN);
        let receiver = if errors.get("receiver").is_none() {
            clean_address(&mut errors, "receiver", &self.receiver)
        } else {
            None
        };

        let amount = clean_required_number(&mut errors, "amount", self.amount.as_ref(), 1)
            .map(|amount| amount as u64);

        if self.note.len() > NOTE_MAX_LENGTH {
            errors.add(
                "note",
                format!(
                    "Ensure this value has at most {} bytes (it has {}).",
                    NOTE_MAX_LENGTH,
                    self.note.len()
                ),
            );
        }

        match (receiver, amount) {
            (Some(receiver), Some(amount)) => errors.finish(TransferRequest {
                passphrase,
                receiver,
                amount,
                note: self.note.clone(),
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECEIVER: &str = "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAY5HFKQ";

    fn phrase() -> String {
        vec!["abandon"; 25].join(" ")
    }

    fn form() -> TransferFundsForm {
        TransferFundsForm {
            passphrase: phrase(),
            receiver: RECEIVER.into(),
            amount: Some(NumberInput::Integer(100)),
            note: "rent".into(),
        }
    }

    #[test]
    fn valid_form_is_cleaned() {
        let request = form().validate().unwrap();
        assert_eq!(request.amount, 100);
        assert_eq!(request.receiver.to_string(), RECEIVER);
        assert_eq!(request.note, "rent");
    }

    #[test]
    fn passphrase_word_count() {
        let mut f = form();
        f.passphrase = "abandon abandon".into();
        let errors = f.validate().unwrap_err();
        assert_eq!(
            errors.get("passphrase").unwrap(),
            ["Passphrase must have exactly 25 words!"]
        );
    }

    #[test]
    fn empty_passphrase_fails_word_count() {
        let mut f = form();
        f.passphrase.clear();
        assert!(f.validate().unwrap_err().get("passphrase").is_some());
    }

    #[test]
    fn receiver_must_be_an_address() {
        let mut f = form();
        f.receiver = "not-an-address".into();
        let errors = f.validate().unwrap_err();
        assert_eq!(
            errors.get("receiver").unwrap(),
            ["Provided value is not a valid Algorand address!"]
        );
    }

    #[test]
    fn overlong_receiver_reports_length_only() {
        let mut f = form();
        f.receiver = format!("{RECEIVER}AA");
        let errors = f.validate().unwrap_err();
        assert_eq!(
            errors.get("receiver").unwrap(),
            ["Ensure this value has at most 58 characters (it has 60)."]
        );
    }

    #[test]
    fn amount_is_required_and_positive() {
        let mut f = form();
        f.amount = None;
        assert_eq!(
            f.validate().unwrap_err().get("amount").unwrap(),
            ["This field is required."]
        );
        f.amount = Some("  ".into());
        assert_eq!(
            f.validate().unwrap_err().get("amount").unwrap(),
            ["This field is required."]
        );
        f.amount = Some(NumberInput::Integer(0));
        assert_eq!(
            f.validate().unwrap_err().get("amount").unwrap(),
            ["Ensure this value is greater than or equal to 1."]
        );
    }

    #[test]
    fn note_length_is_capped_in_bytes() {
        let mut f = form();
        f.note = "é".repeat(NOTE_MAX_LENGTH / 2);
        assert!(f.validate().is_ok());
        f.note.push('x');
        assert_eq!(
            f.validate().unwrap_err().get("note").unwrap(),
            ["Ensure this value has at most 1024 bytes (it has 1025)."]
        );
    }

    #[test]
    fn amount_accepts_numeric_text() {
        let mut f = form();
        f.amount = Some("250".into());
        assert_eq!(f.validate().unwrap().amount, 250);
        f.amount = Some("abc".into());
        assert_eq!(
            f.validate().unwrap_err().get("amount").unwrap(),
            ["Enter a whole number."]
        );
    }

    #[test]
    fn deserializes_with_missing_fields() {
        let f: TransferFundsForm = serde_json::from_str(r#"{"amount": 5}"#).unwrap();
        assert_eq!(f.amount, Some(NumberInput::Integer(5)));
        assert!(f.note.is_empty());
    }
}
