//! Field encryption using AES-256-GCM.

use crate::crypto::blind_index::{keyed_blind_index, plain_blind_index};
use crate::crypto::envelope::{Envelope, NONCE_SIZE, TAG_SIZE};
use crate::crypto::key::EncryptionKey;
use crate::error::{CoreError, CoreResult};
use aes_gcm::{
    aead::{generic_array::GenericArray, AeadInPlace, KeyInit},
    Aes256Gcm, Nonce,
};
use rand::RngCore;
use serde::Serialize;
use tracing::{debug, error, warn};

/// Outcome of [`FieldCrypto::try_decrypt`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Decrypted {
    /// The value was not an envelope and is returned as stored.
    Plaintext(String),
    /// The envelope authenticated and this is its plaintext.
    Decrypted(String),
    /// The envelope did not authenticate (wrong key, tampering) or no key
    /// is configured. Holds the stored value unchanged.
    Undecryptable(String),
}

impl Decrypted {
    /// Returns the value a reader should see.
    #[must_use]
    pub fn into_value(self) -> String {
        match self {
            Self::Plaintext(v) | Self::Decrypted(v) | Self::Undecryptable(v) => v,
        }
    }

    /// Returns true if the stored value could not be decrypted.
    #[must_use]
    pub fn is_undecryptable(&self) -> bool {
        matches!(self, Self::Undecryptable(_))
    }
}

/// Encrypts, decrypts and indexes individual field values.
///
/// A `FieldCrypto` is built once at start-up from the configured key and
/// shared by reference. Without a key, reads still work: stored values come
/// back unchanged and blind indexes fall back to the unkeyed digest. Only
/// [`encrypt`](Self::encrypt) refuses to work.
pub struct FieldCrypto {
    key: Option<EncryptionKey>,
    cipher: Option<Aes256Gcm>,
}

impl FieldCrypto {
    /// Creates a handle that uses `key`.
    #[must_use]
    pub fn new(key: EncryptionKey) -> Self {
        let cipher = Aes256Gcm::new(GenericArray::from_slice(key.as_bytes()));
        Self {
            key: Some(key),
            cipher: Some(cipher),
        }
    }

    /// Creates a handle with no key configured.
    #[must_use]
    pub fn unconfigured() -> Self {
        Self {
            key: None,
            cipher: None,
        }
    }

    /// Creates a handle from a 64-character hex key.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is not 64 hex characters.
    pub fn from_hex(key_hex: &str) -> CoreResult<Self> {
        EncryptionKey::from_hex(key_hex).map(Self::new)
    }

    /// Creates a handle from an optional hex key.
    ///
    /// A missing or invalid key gives an unconfigured handle. The read
    /// path keeps working and [`encrypt`](Self::encrypt) fails loudly.
    #[must_use]
    pub fn from_optional_hex(key_hex: Option<&str>) -> Self {
        match key_hex.map(str::trim).filter(|k| !k.is_empty()) {
            None => Self::unconfigured(),
            Some(hex) => match Self::from_hex(hex) {
                Ok(crypto) => crypto,
                Err(e) => {
                    warn!(error = %e, "ignoring unusable encryption key");
                    Self::unconfigured()
                }
            },
        }
    }

    /// Returns whether a usable key is configured.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.cipher.is_some()
    }

    /// Encrypts `plaintext` into an envelope string.
    ///
    /// Empty input is returned unchanged. Every call draws a fresh random
    /// nonce, so encrypting the same text twice gives different envelopes.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EncryptionFailed`] when no key is configured or
    /// the cipher fails. The cause is logged, not returned.
    pub fn encrypt(&self, plaintext: &str) -> CoreResult<String> {
        if plaintext.is_empty() {
            return Ok(String::new());
        }

        let Some(cipher) = &self.cipher else {
            error!(cause = %CoreError::NotConfigured, "field encryption failed");
            return Err(CoreError::EncryptionFailed);
        };

        let mut iv = [0u8; NONCE_SIZE];
        rand::thread_rng().fill_bytes(&mut iv);

        let mut buffer = plaintext.as_bytes().to_vec();
        let tag = cipher
            .encrypt_in_place_detached(Nonce::from_slice(&iv), b"", &mut buffer)
            .map_err(|e| {
                error!(cause = %e, "field encryption failed");
                CoreError::EncryptionFailed
            })?;

        let mut tag_bytes = [0u8; TAG_SIZE];
        tag_bytes.copy_from_slice(tag.as_slice());

        Ok(Envelope {
            iv,
            tag: tag_bytes,
            ciphertext: buffer,
        }
        .to_string())
    }

    /// Decrypts a stored value, telling the caller what happened.
    pub fn try_decrypt(&self, value: &str) -> Decrypted {
        if value.is_empty() {
            return Decrypted::Plaintext(String::new());
        }

        let envelope = match Envelope::parse(value) {
            Ok(envelope) => envelope,
            Err(e) => {
                debug!(reason = %e, "value is not an envelope, passing through");
                return Decrypted::Plaintext(value.to_owned());
            }
        };

        let Some(cipher) = &self.cipher else {
            warn!("cannot decrypt field: encryption key not configured");
            return Decrypted::Undecryptable(value.to_owned());
        };

        let mut buffer = envelope.ciphertext;
        if let Err(e) = cipher.decrypt_in_place_detached(
            Nonce::from_slice(&envelope.iv),
            b"",
            &mut buffer,
            GenericArray::from_slice(&envelope.tag),
        ) {
            warn!(cause = %e, "field decryption failed, returning stored value");
            return Decrypted::Undecryptable(value.to_owned());
        }

        match String::from_utf8(buffer) {
            Ok(plaintext) => Decrypted::Decrypted(plaintext),
            Err(_) => {
                warn!("decrypted field is not valid UTF-8, returning stored value");
                Decrypted::Undecryptable(value.to_owned())
            }
        }
    }

    /// Decrypts a stored value.
    ///
    /// Never fails. Plaintext (legacy rows written before encryption was
    /// enabled) is returned unchanged. An envelope that does not
    /// authenticate is also returned unchanged and the failure logged, so
    /// callers must not assume the result is always genuine plaintext.
    #[must_use]
    pub fn decrypt(&self, value: &str) -> String {
        self.try_decrypt(value).into_value()
    }

    /// Computes the blind index of `value` under the current configuration.
    ///
    /// Keyed (HMAC-SHA256) when a key is configured, plain SHA-256
    /// otherwise. The two variants never agree for the same input.
    #[must_use]
    pub fn create_blind_index(&self, value: &str) -> String {
        match &self.key {
            Some(key) => keyed_blind_index(key, value),
            None => plain_blind_index(value),
        }
    }
}

impl std::fmt::Debug for FieldCrypto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldCrypto")
            .field("cipher", &"Aes256Gcm")
            .field("configured", &self.is_configured())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::envelope::is_encrypted;
    use crate::crypto::key::KEY_SIZE;

    const TEST_KEY_HEX: &str = "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f";

    fn crypto() -> FieldCrypto {
        FieldCrypto::from_hex(TEST_KEY_HEX).unwrap()
    }

    #[test]
    fn encrypt_decrypt_roundtrip() {
        let crypto = crypto();
        let envelope = crypto.encrypt("Hello, fieldseal!").unwrap();

        assert_ne!(envelope, "Hello, fieldseal!");
        assert_eq!(envelope.split(':').count(), 3);
        assert_eq!(crypto.decrypt(&envelope), "Hello, fieldseal!");
    }

    #[test]
    fn decrypts_known_envelope() {
        let envelope = "BwcHBwcHBwcHBwcH:tkhe7sQ62ocHJt97+EtX9A==:Z6kPMANg94MFK2Hs5HEEBDvc";
        assert_eq!(
            crypto().try_decrypt(envelope),
            Decrypted::Decrypted("héllo wörld 🚀".to_owned())
        );
    }

    #[test]
    fn encrypt_produces_different_envelopes() {
        let crypto = crypto();
        let a = crypto.encrypt("same data").unwrap();
        let b = crypto.encrypt("same data").unwrap();

        assert_ne!(a, b);
        assert_eq!(crypto.decrypt(&a), "same data");
        assert_eq!(crypto.decrypt(&b), "same data");
    }

    #[test]
    fn empty_values_pass_through() {
        let crypto = crypto();
        assert_eq!(crypto.encrypt("").unwrap(), "");
        assert_eq!(crypto.decrypt(""), "");
        assert_eq!(crypto.create_blind_index(""), "");
    }

    #[test]
    fn encrypt_without_key_fails() {
        let err = FieldCrypto::unconfigured().encrypt("secret").unwrap_err();
        assert!(matches!(err, CoreError::EncryptionFailed));
        assert_eq!(err.to_string(), "Encryption failed");
    }

    #[test]
    fn empty_encrypt_without_key_is_noop() {
        assert_eq!(FieldCrypto::unconfigured().encrypt("").unwrap(), "");
    }

    #[test]
    fn legacy_plaintext_passes_through() {
        let crypto = crypto();
        assert_eq!(
            crypto.try_decrypt("plain-unencrypted-text"),
            Decrypted::Plaintext("plain-unencrypted-text".to_owned())
        );
        assert_eq!(crypto.decrypt("a:b:c"), "a:b:c");
    }

    #[test]
    fn tampered_ciphertext_returns_input() {
        let crypto = crypto();
        let envelope = crypto.encrypt("secret").unwrap();
        let mut parts: Vec<String> = envelope.split(':').map(str::to_owned).collect();
        // Swap the ciphertext for a different, still valid, base64 payload.
        parts[2] = if parts[2] == "AAAAAAAA" {
            "AQEBAQEB".to_owned()
        } else {
            "AAAAAAAA".to_owned()
        };
        let tampered = parts.join(":");

        assert!(is_encrypted(&tampered));
        assert_eq!(crypto.decrypt(&tampered), tampered);
        assert!(crypto.try_decrypt(&tampered).is_undecryptable());
    }

    #[test]
    fn tampered_tag_returns_input() {
        let crypto = crypto();
        let envelope = crypto.encrypt("secret").unwrap();
        let mut parts: Vec<&str> = envelope.split(':').collect();
        let other_tag = "AAAAAAAAAAAAAAAAAAAAAA==";
        parts[1] = other_tag;
        let tampered = parts.join(":");

        assert_eq!(crypto.decrypt(&tampered), tampered);
    }

    #[test]
    fn wrong_key_returns_input() {
        let envelope = crypto().encrypt("secret").unwrap();
        let other = FieldCrypto::new(EncryptionKey::from_bytes(&[1u8; KEY_SIZE]).unwrap());

        assert_eq!(other.decrypt(&envelope), envelope);
    }

    #[test]
    fn unconfigured_decrypt_returns_input() {
        let envelope = crypto().encrypt("secret").unwrap();
        let crypto = FieldCrypto::unconfigured();

        assert_eq!(
            crypto.try_decrypt(&envelope),
            Decrypted::Undecryptable(envelope.clone())
        );
    }

    #[test]
    fn blind_index_follows_configuration() {
        let keyed = crypto().create_blind_index("user@example.com");
        let plain = FieldCrypto::unconfigured().create_blind_index("user@example.com");

        assert_eq!(
            keyed,
            "a2338a592a541ed0b0f667e0ab5ea16e52df675a4d0b0b774346c102eb27ddf4"
        );
        assert_eq!(
            plain,
            "b4c9a289323b21a01c3e940f150eb9b8c542587f1abfd8f0e1cc1ffc5e475514"
        );
    }

    #[test]
    fn optional_hex_handles_missing_and_invalid() {
        assert!(!FieldCrypto::from_optional_hex(None).is_configured());
        assert!(!FieldCrypto::from_optional_hex(Some("   ")).is_configured());
        assert!(!FieldCrypto::from_optional_hex(Some("tooshort")).is_configured());
        assert!(FieldCrypto::from_optional_hex(Some(TEST_KEY_HEX)).is_configured());
    }

    #[test]
    fn large_plaintext() {
        let crypto = crypto();
        let plaintext = "ä".repeat(20_000);
        let envelope = crypto.encrypt(&plaintext).unwrap();
        assert_eq!(crypto.decrypt(&envelope), plaintext);
    }

    #[test]
    fn handle_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FieldCrypto>();
    }
}
