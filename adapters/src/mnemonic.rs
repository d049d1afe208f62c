//! Recovery phrase codec.
//!
//! A phrase is 24 words carrying the 32-byte key seed as little-endian 11-bit
//! groups, followed by a checksum word taken from the SHA-512/256 digest of the
//! seed. Words come from the BIP-39 English list.

use bip39::Language;
use sha2::{Digest, Sha512_256};

use crate::errors::MnemonicError;

pub const KEY_LEN: usize = 32;
/// Number of words in a recovery phrase, checksum word included.
pub const MNEMONIC_LEN: usize = 25;

const BITS_PER_WORD: u32 = 11;
const WORD_MASK: u32 = (1 << BITS_PER_WORD) - 1;

fn to_11_bit(data: &[u8]) -> Vec<u16> {
    let mut buffer: u32 = 0;
    let mut bits = 0;
    let mut out = Vec::with_capacity(data.len() * 8 / BITS_PER_WORD as usize + 1);
    for &byte in data {
        buffer |= u32::from(byte) << bits;
        bits += 8;
        if bits >= BITS_PER_WORD {
            out.push((buffer & WORD_MASK) as u16);
            buffer >>= BITS_PER_WORD;
            bits -= BITS_PER_WORD;
        }
    }
    if bits != 0 {
        out.push((buffer & WORD_MASK) as u16);
    }
    out
}

fn from_11_bit(words: &[u16]) -> Vec<u8> {
    let mut buffer: u32 = 0;
    let mut bits = 0;
    let mut out = Vec::with_capacity(words.len() * BITS_PER_WORD as usize / 8 + 1);
    for &word in words {
        buffer |= u32::from(word) << bits;
        bits += BITS_PER_WORD;
        while bits >= 8 {
            out.push((buffer & 0xff) as u8);
            buffer >>= 8;
            bits -= 8;
        }
    }
    if bits != 0 {
        out.push((buffer & 0xff) as u8);
    }
    out
}

fn checksum_word(key: &[u8]) -> u16 {
    let digest = Sha512_256::digest(key);
    to_11_bit(&digest[..2])[0]
}

/// Renders a 32-byte key seed as a 25-word recovery phrase.
pub fn from_key(key: &[u8; KEY_LEN]) -> String {
    let list = Language::English.word_list();
    let mut words: Vec<&str> = to_11_bit(key)
        .into_iter()
        .map(|index| list[index as usize])
        .collect();
    words.push(list[checksum_word(key) as usize]);
    words.join(" ")
}

/// Decodes a recovery phrase back into the 32-byte key seed.
pub fn to_key(phrase: &str) -> Result<[u8; KEY_LEN], MnemonicError> {
    let words: Vec<String> = phrase
        .split_whitespace()
        .map(|word| word.to_lowercase())
        .collect();
    if words.len() != MNEMONIC_LEN {
        return Err(MnemonicError::WrongLength {
            expected: MNEMONIC_LEN,
            actual: words.len(),
        });
    }

    let indexes = words
        .iter()
        .map(|word| {
            Language::English
                .find_word(word)
                .ok_or_else(|| MnemonicError::UnknownWord(word.clone()))
        })
        .collect::<Result<Vec<u16>, _>>()?;

    let (body, checksum) = indexes.split_at(MNEMONIC_LEN - 1);
    let mut bytes = from_11_bit(body);
    // 24 words carry 264 bits; the extra byte must be empty.
    if bytes.len() != KEY_LEN + 1 || bytes[KEY_LEN] != 0 {
        return Err(MnemonicError::WrongKeyLength);
    }
    bytes.truncate(KEY_LEN);

    if checksum_word(&bytes) != checksum[0] {
        return Err(MnemonicError::WrongChecksum);
    }

    let mut key = [0u8; KEY_LEN];
    key.copy_from_slice(&bytes);
    Ok(key)
}
