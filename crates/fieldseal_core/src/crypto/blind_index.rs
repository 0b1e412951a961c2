//! Blind indexes for equality lookups on encrypted fields.
//!
//! A blind index is a SHA-256 digest of the normalized value, rendered as
//! 64 lowercase hex characters. With a key configured the digest is
//! `HMAC-SHA256(key, normalized)`; without one it falls back to a plain
//! `SHA-256(normalized)`.
//!
//! The unkeyed variant is guessable: anyone can hash a list of common
//! email addresses and compare. It exists so records written without a
//! key stay findable, not as an equivalent security mode.

use crate::crypto::key::{EncryptionKey, KEY_SIZE};
use hmac::digest::Key;
use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use zeroize::Zeroize;

type HmacSha256 = Hmac<Sha256>;

/// Length of a blind index in hex characters.
pub const BLIND_INDEX_HEX_LEN: usize = 64;

/// Normalizes a value before hashing: surrounding whitespace is trimmed
/// and the result lowercased.
#[must_use]
pub fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Computes the unkeyed blind index of `value`.
///
/// Empty input yields an empty string.
#[must_use]
pub fn plain_blind_index(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    hex::encode(Sha256::digest(normalize(value).as_bytes()))
}

/// Computes the keyed blind index of `value`.
///
/// Empty input yields an empty string.
#[must_use]
pub fn keyed_blind_index(key: &EncryptionKey, value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    let mut mac = hmac_for(key);
    mac.update(normalize(value).as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// HMAC pads short keys with zeros up to the block size, so placing the
/// key in a zeroed block gives the same MAC without a fallible length check.
fn hmac_for(key: &EncryptionKey) -> HmacSha256 {
    let mut block = Key::<HmacSha256>::default();
    block[..KEY_SIZE].copy_from_slice(key.as_bytes());
    let mac = <HmacSha256 as KeyInit>::new(&block);
    block.as_mut_slice().zeroize();
    mac
}
