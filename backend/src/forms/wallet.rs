//! Form for creating kmd wallets.

use serde::Deserialize;

use super::{max_length, min_length, ValidationErrors, REQUIRED};

const NAME_MAX_LENGTH: usize = 50;
const PASSWORD_MAX_LENGTH: usize = 50;
const MIN_LENGTH: usize = 2;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateWalletForm {
    pub name: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletRequest {
    pub name: String,
    pub password: String,
}

fn clean_text(errors: &mut ValidationErrors, field: &str, value: &str, max: usize) {
    if value.is_empty() {
        errors.add(field, REQUIRED);
        return;
    }
    min_length(errors, field, value, MIN_LENGTH);
    max_length(errors, field, value, max);
}

impl CreateWalletForm {
    pub fn validate(&self) -> Result<WalletRequest, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let name = self.name.trim();
        let password = self.password.trim();

        clean_text(&mut errors, "name", name, NAME_MAX_LENGTH);
        clean_text(&mut errors, "password", password, PASSWORD_MAX_LENGTH);

        if errors.get("password").is_none()
            && (password.chars().all(char::is_numeric) || password.chars().all(char::is_alphabetic))
        {
            errors.add("password", "Alphanumeric value for password is required!");
        }

        errors.finish(WalletRequest {
            name: name.to_string(),
            password: password.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, password: &str) -> CreateWalletForm {
        CreateWalletForm {
            name: name.into(),
            password: password.into(),
        }
    }

    #[test]
    fn accepts_mixed_password() {
        let request = form("savings", "abc123").validate().unwrap();
        assert_eq!(request.name, "savings");
    }

    #[test]
    fn rejects_numeric_and_alphabetic_passwords() {
        for password in ["123456", "abcdef"] {
            let errors = form("savings", password).validate().unwrap_err();
            assert_eq!(
                errors.get("password").unwrap(),
                ["Alphanumeric value for password is required!"]
            );
        }
    }

    #[test]
    fn short_values_fail_min_length() {
        let errors = form("s", "1").validate().unwrap_err();
        assert!(errors.get("name").is_some());
        assert_eq!(
            errors.get("password").unwrap(),
            ["Ensure this value has at least 2 characters (it has 1)."]
        );
    }

    #[test]
    fn missing_values_are_required() {
        let errors = CreateWalletForm::default().validate().unwrap_err();
        assert_eq!(errors.get("name").unwrap(), ["This field is required."]);
        assert_eq!(errors.get("password").unwrap(), ["This field is required."]);
    }
}
