//! Custom error types specific to the `adapters` crate.
//!
//! This module defines errors that can occur during node connection, RPC calls,
//! sandbox invocations or key/phrase decoding within the adapter layer, providing
//! a unified error handling mechanism for all node interactions.

use thiserror::Error;

/// Failure to parse a textual Algorand address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("address must be {expected} characters, got {actual}")]
    WrongLength { expected: usize, actual: usize },
    #[error("address is not valid base32")]
    InvalidEncoding,
    #[error("address checksum does not match")]
    WrongChecksum,
}

/// Failure to decode a recovery phrase into a private key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MnemonicError {
    #[error("recovery phrase must have {expected} words, got {actual}")]
    WrongLength { expected: usize, actual: usize },
    #[error("unknown word in recovery phrase: {0}")]
    UnknownWord(String),
    #[error("recovery phrase checksum failed to validate")]
    WrongChecksum,
    #[error("recovery phrase does not decode to a 32-byte key")]
    WrongKeyLength,
}

#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("Connection error: {0}")]
    ConnectionError(String),
    #[error("{service} returned {status}: {message}")]
    Rpc {
        service: &'static str,
        status: u16,
        message: String,
    },
    #[error("Cannot decode {service} response: {reason}")]
    Decode {
        service: &'static str,
        reason: String,
    },
    #[error("Wallet not found: {0}")]
    WalletNotFound(String),
    #[error("Sandbox error: {0}")]
    Sandbox(String),
    #[error("Invalid key material: {0}")]
    InvalidKey(String),
    #[error("Transaction encoding error: {0}")]
    Encoding(String),
    #[error(transparent)]
    Address(#[from] AddressError),
    #[error(transparent)]
    Mnemonic(#[from] MnemonicError),
}

pub type AdapterResult<T> = Result<T, AdapterError>;
