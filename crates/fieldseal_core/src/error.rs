//! Error types for fieldseal core.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in fieldseal core operations.
///
/// Only the write path surfaces these to callers. Decryption and blind
/// index computation degrade instead of failing.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Encryption failed.
    ///
    /// The display text is deliberately generic; the underlying cause is
    /// logged where the failure happens and never returned.
    #[error("Encryption failed")]
    EncryptionFailed,

    /// No usable encryption key is configured.
    #[error("encryption key not configured")]
    NotConfigured,

    /// Invalid key size.
    #[error("invalid key size: expected {expected} bytes, got {actual}")]
    InvalidKeySize {
        /// Expected size in bytes.
        expected: usize,
        /// Actual size in bytes.
        actual: usize,
    },

    /// Key material is not valid hexadecimal.
    #[error("invalid key encoding: {message}")]
    InvalidKeyEncoding {
        /// Description of the encoding problem.
        message: String,
    },

    /// A value is not a well-formed ciphertext envelope.
    #[error("invalid envelope: {message}")]
    InvalidEnvelope {
        /// Description of why the value was rejected.
        message: String,
    },
}

impl CoreError {
    /// Creates an invalid key size error.
    pub fn invalid_key_size(actual: usize, expected: usize) -> Self {
        Self::InvalidKeySize { expected, actual }
    }

    /// Creates an invalid key encoding error.
    pub fn invalid_key_encoding(message: impl Into<String>) -> Self {
        Self::InvalidKeyEncoding {
            message: message.into(),
        }
    }

    /// Creates an invalid envelope error.
    pub fn invalid_envelope(message: impl Into<String>) -> Self {
        Self::InvalidEnvelope {
            message: message.into(),
        }
    }

    /// Returns true for errors caused by key configuration.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::NotConfigured | Self::InvalidKeySize { .. } | Self::InvalidKeyEncoding { .. }
        )
    }
}
