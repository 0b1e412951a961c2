//! Encryption key handling.

use crate::error::{CoreError, CoreResult};
use rand::RngCore;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Size of the AES-256 key in bytes.
pub const KEY_SIZE: usize = 32;
/// Length of a hex-encoded key.
pub const KEY_HEX_LEN: usize = KEY_SIZE * 2;

/// Encryption key for AES-256-GCM and keyed blind indexes.
///
/// The key is automatically zeroized when dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct EncryptionKey {
    bytes: [u8; KEY_SIZE],
}

impl EncryptionKey {
    /// Generates a new random encryption key.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_SIZE];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self { bytes }
    }

    /// Creates a key from raw bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes slice is not exactly 32 bytes.
    pub fn from_bytes(bytes: &[u8]) -> CoreResult<Self> {
        if bytes.len() != KEY_SIZE {
            return Err(CoreError::invalid_key_size(bytes.len(), KEY_SIZE));
        }

        let mut key_bytes = [0u8; KEY_SIZE];
        key_bytes.copy_from_slice(bytes);
        Ok(Self { bytes: key_bytes })
    }

    /// Parses a key from its 64-character hex form.
    ///
    /// Surrounding whitespace is ignored. Upper- and lowercase digits are
    /// both accepted.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not 64 hex characters.
    pub fn from_hex(value: &str) -> CoreResult<Self> {
        let value = value.trim();
        if value.len() != KEY_HEX_LEN {
            return Err(CoreError::invalid_key_size(value.len() / 2, KEY_SIZE));
        }

        let mut decoded =
            hex::decode(value).map_err(|e| CoreError::invalid_key_encoding(e.to_string()))?;
        let key = Self::from_bytes(&decoded);
        decoded.zeroize();
        key
    }

    /// Returns the key as a byte slice.
    ///
    /// # Security
    ///
    /// Don't log or serialize the result.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }
}

impl std::fmt::Debug for EncryptionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncryptionKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Generates a fresh key in the 64-character hex form operators put into
/// configuration.
#[must_use]
pub fn generate_key_hex() -> String {
    let key = EncryptionKey::generate();
    hex::encode(key.as_bytes())
}
