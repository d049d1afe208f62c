//! Ed25519 keypairs and their Algorand identities.

use std::fmt;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use ed25519_dalek::{Signer, SigningKey};
use rand::rngs::OsRng;

use crate::address::Address;
use crate::errors::{AdapterError, AdapterResult, MnemonicError};
use crate::mnemonic;
use crate::transaction::{SignedTransaction, Transaction};

/// Length of the private key form used by kmd and stored locally: seed || public key.
pub const PRIVATE_KEY_LEN: usize = 64;

#[derive(Clone)]
pub struct Account {
    signing_key: SigningKey,
    address: Address,
}

impl Account {
    pub fn generate() -> Self {
        Self::from_signing_key(SigningKey::generate(&mut OsRng))
    }

    fn from_signing_key(signing_key: SigningKey) -> Self {
        let address = Address::new(signing_key.verifying_key().to_bytes());
        Self {
            signing_key,
            address,
        }
    }

    pub fn from_seed(seed: &[u8; mnemonic::KEY_LEN]) -> Self {
        Self::from_signing_key(SigningKey::from_bytes(seed))
    }

    /// Accepts either the bare 32-byte seed or the 64-byte seed || public key form.
    pub fn from_private_key(bytes: &[u8]) -> AdapterResult<Self> {
        match bytes.len() {
            mnemonic::KEY_LEN => {
                let mut seed = [0u8; mnemonic::KEY_LEN];
                seed.copy_from_slice(bytes);
                Ok(Self::from_seed(&seed))
            }
            PRIVATE_KEY_LEN => {
                let mut keypair = [0u8; PRIVATE_KEY_LEN];
                keypair.copy_from_slice(bytes);
                let signing_key = SigningKey::from_keypair_bytes(&keypair)
                    .map_err(|err| AdapterError::InvalidKey(err.to_string()))?;
                Ok(Self::from_signing_key(signing_key))
            }
            other => Err(AdapterError::InvalidKey(format!(
                "expected {} or {} bytes, got {}",
                mnemonic::KEY_LEN,
                PRIVATE_KEY_LEN,
                other
            ))),
        }
    }

    pub fn from_private_key_base64(encoded: &str) -> AdapterResult<Self> {
        let bytes = BASE64
            .decode(encoded.trim())
            .map_err(|err| AdapterError::InvalidKey(err.to_string()))?;
        Self::from_private_key(&bytes)
    }

    pub fn from_mnemonic(phrase: &str) -> Result<Self, MnemonicError> {
        mnemonic::to_key(phrase).map(|seed| Self::from_seed(&seed))
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn mnemonic(&self) -> String {
        mnemonic::from_key(&self.signing_key.to_bytes())
    }

    pub fn private_key_base64(&self) -> String {
        BASE64.encode(self.signing_key.to_keypair_bytes())
    }

    pub fn sign(&self, transaction: &Transaction) -> AdapterResult<SignedTransaction> {
        let message = transaction.bytes_to_sign()?;
        let signature = self.signing_key.sign(&message).to_bytes();
        Ok(SignedTransaction {
            signature,
            transaction: transaction.clone(),
        })
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}
