//! Key configuration loading.
//!
//! The CLI is one of the surfaces that supplies the key to the core. It
//! takes the key from `--key` or the `ENCRYPTION_KEY` environment variable
//! (clap resolves both) and validates it here.

use fieldseal_core::{CoreError, CryptoConfig, FieldCrypto};
use thiserror::Error;
use tracing::debug;

/// Environment variable holding the hex-encoded key.
pub const KEY_ENV: &str = "ENCRYPTION_KEY";

/// Errors from loading CLI configuration.
#[derive(Debug, Error)]
pub enum CliError {
    /// The supplied key is unusable.
    #[error("ENCRYPTION_KEY is invalid: {0} (expected 64 hex characters)")]
    InvalidKey(#[source] CoreError),

    /// The command needs a key and none was supplied.
    #[error("ENCRYPTION_KEY is not set; generate one with `fieldseal gen-key`")]
    MissingKey,
}

/// Key settings collected from the command line.
#[derive(Clone, Default)]
pub struct KeyConfig {
    key_hex: Option<String>,
    allow_unconfigured: bool,
}

impl KeyConfig {
    /// Creates a key configuration.
    pub fn new(key_hex: Option<String>, allow_unconfigured: bool) -> Self {
        Self {
            key_hex: key_hex.filter(|k| !k.trim().is_empty()),
            allow_unconfigured,
        }
    }

    /// Returns true if a key string was supplied.
    pub fn has_key(&self) -> bool {
        self.key_hex.is_some()
    }

    /// Builds the crypto handle.
    ///
    /// A missing key gives an unconfigured handle. An invalid key is an
    /// error unless unconfigured operation was allowed.
    pub fn load(&self) -> Result<FieldCrypto, CliError> {
        let mut config =
            CryptoConfig::new().require_key(self.has_key() && !self.allow_unconfigured);
        if let Some(key) = &self.key_hex {
            config = config.key_hex(key.clone());
        }

        let crypto = config.build().map_err(CliError::InvalidKey)?;
        debug!(configured = crypto.is_configured(), "loaded encryption key");
        Ok(crypto)
    }

    /// Builds the crypto handle and insists that it has a key.
    ///
    /// An invalid key is an error here even when unconfigured operation
    /// was allowed.
    pub fn load_required(&self) -> Result<FieldCrypto, CliError> {
        let Some(key) = &self.key_hex else {
            return Err(CliError::MissingKey);
        };
        let crypto = CryptoConfig::new()
            .require_key(true)
            .key_hex(key.clone())
            .build()
            .map_err(CliError::InvalidKey)?;
        debug!("loaded required encryption key");
        Ok(crypto)
    }
}

impl std::fmt::Debug for KeyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyConfig")
            .field("key_hex", &self.key_hex.as_ref().map(|_| "[REDACTED]"))
            .field("allow_unconfigured", &self.allow_unconfigured)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f";

    #[test]
    fn missing_key_is_unconfigured() {
        let crypto = KeyConfig::new(None, false).load().unwrap();
        assert!(!crypto.is_configured());
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let config = KeyConfig::new(Some("  ".into()), false);
        assert!(!config.has_key());
        assert!(matches!(config.load_required(), Err(CliError::MissingKey)));
    }

    #[test]
    fn valid_key_loads() {
        let crypto = KeyConfig::new(Some(KEY.into()), false).load_required().unwrap();
        assert!(crypto.is_configured());
    }

    #[test]
    fn invalid_key_is_an_error() {
        let err = KeyConfig::new(Some("abc".into()), false).load().unwrap_err();
        assert!(matches!(err, CliError::InvalidKey(_)));
        assert!(err.to_string().contains(KEY_ENV));
    }

    #[test]
    fn invalid_key_allowed_when_requested() {
        let crypto = KeyConfig::new(Some("abc".into()), true).load().unwrap();
        assert!(!crypto.is_configured());
    }

    #[test]
    fn required_key_rejects_invalid_even_when_allowed() {
        let config = KeyConfig::new(Some("abc".into()), true);
        let err = config.load_required().unwrap_err();
        assert!(matches!(err, CliError::InvalidKey(_)));
        assert!(!err.to_string().contains("not set"));
    }
}
