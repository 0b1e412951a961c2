//! The persisted ciphertext envelope.
//!
//! An encrypted field is stored as three colon-separated base64 segments:
//!
//! ```text
//! base64(iv) ":" base64(auth_tag) ":" base64(ciphertext)
//! ```
//!
//! Anything that does not parse as exactly this shape is treated as
//! plaintext by the rest of the crate.

use crate::error::{CoreError, CoreResult};
use base64::{engine::general_purpose::STANDARD, Engine};
use std::fmt;

/// Size of the GCM nonce in bytes.
pub const NONCE_SIZE: usize = 12;
/// Size of the GCM authentication tag in bytes.
pub const TAG_SIZE: usize = 16;
/// Segment separator.
pub const SEPARATOR: char = ':';

/// Base64 length of the IV segment (12 bytes encode without padding).
const NONCE_B64_LEN: usize = 16;
/// Base64 length of the tag segment.
const TAG_B64_LEN: usize = 24;

/// A parsed ciphertext envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    /// Per-value random nonce.
    pub iv: [u8; NONCE_SIZE],
    /// GCM authentication tag.
    pub tag: [u8; TAG_SIZE],
    /// Ciphertext bytes, same length as the plaintext.
    pub ciphertext: Vec<u8>,
}

impl Envelope {
    /// Parses an envelope from its stored string form.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidEnvelope`] when the segment count is not
    /// three, a segment is not padded standard base64, or the IV or tag
    /// has the wrong length.
    pub fn parse(value: &str) -> CoreResult<Self> {
        let mut parts = value.split(SEPARATOR);
        let (Some(iv), Some(tag), Some(ciphertext), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(CoreError::invalid_envelope("expected 3 segments"));
        };

        if iv.len() != NONCE_B64_LEN {
            return Err(CoreError::invalid_envelope("iv segment has wrong length"));
        }
        if tag.len() != TAG_B64_LEN {
            return Err(CoreError::invalid_envelope("tag segment has wrong length"));
        }

        let iv = decode_fixed::<NONCE_SIZE>(iv, "iv")?;
        let tag = decode_fixed::<TAG_SIZE>(tag, "tag")?;
        let ciphertext = STANDARD
            .decode(ciphertext)
            .map_err(|e| CoreError::invalid_envelope(format!("ciphertext segment: {e}")))?;

        Ok(Self {
            iv,
            tag,
            ciphertext,
        })
    }
}

impl fmt::Display for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{SEPARATOR}{}{SEPARATOR}{}",
            STANDARD.encode(self.iv),
            STANDARD.encode(self.tag),
            STANDARD.encode(&self.ciphertext)
        )
    }
}

fn decode_fixed<const N: usize>(segment: &str, name: &str) -> CoreResult<[u8; N]> {
    let bytes = STANDARD
        .decode(segment)
        .map_err(|e| CoreError::invalid_envelope(format!("{name} segment: {e}")))?;
    bytes
        .try_into()
        .map_err(|_| CoreError::invalid_envelope(format!("{name} segment has wrong length")))
}

/// Returns true if `value` is a well-formed ciphertext envelope.
///
/// This is a structural check only. It does not need a key and says
/// nothing about whether the value will authenticate.
#[must_use]
pub fn is_encrypted(value: &str) -> bool {
    !value.is_empty() && Envelope::parse(value).is_ok()
}
