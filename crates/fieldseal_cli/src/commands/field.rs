//! Encrypt and decrypt commands.

use crate::Format;
use fieldseal_core::{Decrypted, FieldCrypto};
use serde::Serialize;
use tracing::info;

/// Encryption output.
#[derive(Debug, Serialize)]
struct EncryptOutput {
    envelope: String,
}

/// Runs the encrypt command.
pub fn encrypt(
    crypto: &FieldCrypto,
    value: &str,
    format: Format,
) -> Result<(), Box<dyn std::error::Error>> {
    let envelope = crypto.encrypt(value)?;

    match format {
        Format::Json => super::print_json(&EncryptOutput { envelope })?,
        Format::Text => println!("{envelope}"),
    }

    Ok(())
}

/// Runs the decrypt command.
///
/// Decryption never fails; the status tells plaintext pass-through and
/// undecryptable envelopes apart from real decryptions.
pub fn decrypt(
    crypto: &FieldCrypto,
    value: &str,
    format: Format,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = crypto.try_decrypt(value);

    match format {
        Format::Json => super::print_json(&result)?,
        Format::Text => {
            match &result {
                Decrypted::Plaintext(_) => info!("value is not an envelope, shown as stored"),
                Decrypted::Undecryptable(_) => info!("envelope did not decrypt, shown as stored"),
                Decrypted::Decrypted(_) => {}
            }
            println!("{}", result.into_value());
        }
    }

    Ok(())
}
