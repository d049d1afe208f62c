//! Algorand account addresses.
//!
//! An address is the base32 encoding (no padding) of a 32-byte ed25519 public
//! key followed by the last four bytes of its SHA-512/256 digest.

use std::fmt;
use std::str::FromStr;

use data_encoding::BASE32_NOPAD;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha512_256};

use crate::errors::AddressError;

pub const PUBLIC_KEY_LEN: usize = 32;
pub const CHECKSUM_LEN: usize = 4;
/// Length of the textual form.
pub const ADDRESS_LEN: usize = 58;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Address([u8; PUBLIC_KEY_LEN]);

impl Address {
    pub const fn new(public_key: [u8; PUBLIC_KEY_LEN]) -> Self {
        Self(public_key)
    }

    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LEN] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; PUBLIC_KEY_LEN]
    }

    fn checksum(public_key: &[u8]) -> [u8; CHECKSUM_LEN] {
        let digest = Sha512_256::digest(public_key);
        let mut out = [0u8; CHECKSUM_LEN];
        out.copy_from_slice(&digest[digest.len() - CHECKSUM_LEN..]);
        out
    }

    pub fn encode(&self) -> String {
        let mut raw = Vec::with_capacity(PUBLIC_KEY_LEN + CHECKSUM_LEN);
        raw.extend_from_slice(&self.0);
        raw.extend_from_slice(&Self::checksum(&self.0));
        BASE32_NOPAD.encode(&raw)
    }
}

/// Returns true when `value` is a well-formed address with a matching checksum.
pub fn is_valid_address(value: &str) -> bool {
    value.parse::<Address>().is_ok()
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != ADDRESS_LEN {
            return Err(AddressError::WrongLength {
                expected: ADDRESS_LEN,
                actual: s.len(),
            });
        }
        let raw = BASE32_NOPAD
            .decode(s.as_bytes())
            .map_err(|_| AddressError::InvalidEncoding)?;
        if raw.len() != PUBLIC_KEY_LEN + CHECKSUM_LEN {
            return Err(AddressError::InvalidEncoding);
        }
        let (key, checksum) = raw.split_at(PUBLIC_KEY_LEN);
        if checksum != Self::checksum(key) {
            return Err(AddressError::WrongChecksum);
        }
        let mut public_key = [0u8; PUBLIC_KEY_LEN];
        public_key.copy_from_slice(key);
        Ok(Self(public_key))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.encode())
    }
}

/// Transactions carry addresses as raw 32-byte strings.
impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(&self.0)
    }
}

/// JSON APIs (algod, kmd, indexer) carry addresses in their textual form.
impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
