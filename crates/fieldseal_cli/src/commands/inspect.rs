//! Inspect command implementation.

use crate::Format;
use fieldseal_core::{Decrypted, Envelope, FieldCrypto};
use serde::Serialize;

/// Inspection result for one stored value.
#[derive(Debug, Serialize)]
pub struct InspectResult {
    /// Whether the value is a well-formed envelope.
    pub is_envelope: bool,
    /// Why the value is not an envelope, if it is not.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_error: Option<String>,
    /// Ciphertext length in bytes (equals the plaintext length).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ciphertext_len: Option<usize>,
    /// Whether a key was configured for this inspection.
    pub key_configured: bool,
    /// Decryption status: plaintext, decrypted or undecryptable.
    pub status: &'static str,
}

/// Inspects a stored value without printing its plaintext.
pub fn inspect(crypto: &FieldCrypto, value: &str) -> InspectResult {
    let (is_envelope, parse_error, ciphertext_len) = match Envelope::parse(value) {
        Ok(envelope) => (true, None, Some(envelope.ciphertext.len())),
        Err(e) => (false, Some(e.to_string()), None),
    };

    let status = match crypto.try_decrypt(value) {
        Decrypted::Plaintext(_) => "plaintext",
        Decrypted::Decrypted(_) => "decrypted",
        Decrypted::Undecryptable(_) => "undecryptable",
    };

    InspectResult {
        is_envelope,
        parse_error,
        ciphertext_len,
        key_configured: crypto.is_configured(),
        status,
    }
}

/// Runs the inspect command.
pub fn run(
    crypto: &FieldCrypto,
    value: &str,
    format: Format,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = inspect(crypto, value);

    match format {
        Format::Json => super::print_json(&result)?,
        Format::Text => {
            println!("Envelope:       {}", result.is_envelope);
            if let Some(reason) = &result.parse_error {
                println!("Reason:         {reason}");
            }
            if let Some(len) = result.ciphertext_len {
                println!("Payload bytes:  {len}");
            }
            println!("Key configured: {}", result.key_configured);
            println!("Status:         {}", result.status);
        }
    }

    Ok(())
}
