//! Crypto configuration.
//!
//! The core never reads the environment or files. A surface's own loader
//! collects the key string and hands it over here.

use crate::crypto::FieldCrypto;
use crate::error::{CoreError, CoreResult};

/// Configuration for building a [`FieldCrypto`] handle.
#[derive(Clone, Default)]
pub struct CryptoConfig {
    /// Hex-encoded 32-byte key, if one was supplied.
    pub key_hex: Option<String>,

    /// Whether a missing or invalid key is an error.
    ///
    /// When false, such a key yields an unconfigured handle whose read path
    /// still works.
    pub require_key: bool,
}

impl CryptoConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the hex-encoded key.
    #[must_use]
    pub fn key_hex(mut self, key_hex: impl Into<String>) -> Self {
        self.key_hex = Some(key_hex.into());
        self
    }

    /// Sets whether a usable key is required.
    #[must_use]
    pub const fn require_key(mut self, value: bool) -> Self {
        self.require_key = value;
        self
    }

    /// Builds the crypto handle.
    ///
    /// # Errors
    ///
    /// With `require_key` set, returns an error if the key is absent or not
    /// 64 hex characters.
    pub fn build(&self) -> CoreResult<FieldCrypto> {
        let key_hex = self.key_hex.as_deref();
        if !self.require_key {
            return Ok(FieldCrypto::from_optional_hex(key_hex));
        }

        match key_hex.map(str::trim).filter(|k| !k.is_empty()) {
            Some(hex) => FieldCrypto::from_hex(hex),
            None => Err(CoreError::NotConfigured),
        }
    }
}

impl std::fmt::Debug for CryptoConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CryptoConfig")
            .field("key_hex", &self.key_hex.as_ref().map(|_| "[REDACTED]"))
            .field("require_key", &self.require_key)
            .finish()
    }
}
