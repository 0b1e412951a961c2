//! Blind index command.

use crate::Format;
use fieldseal_core::{normalize, plain_blind_index, FieldCrypto};
use serde::Serialize;

/// Blind index output.
#[derive(Debug, Serialize)]
pub struct IndexOutput {
    /// The value after normalization.
    pub normalized: String,
    /// Whether the index is keyed.
    pub keyed: bool,
    /// Hex-encoded blind index.
    pub index: String,
}

/// Computes the blind index output for `value`.
pub fn compute(crypto: &FieldCrypto, value: &str, plain: bool) -> IndexOutput {
    let keyed = crypto.is_configured() && !plain;
    let index = if keyed {
        crypto.create_blind_index(value)
    } else {
        plain_blind_index(value)
    };

    IndexOutput {
        normalized: normalize(value),
        keyed,
        index,
    }
}

/// Runs the blind-index command.
pub fn run(
    crypto: &FieldCrypto,
    value: &str,
    plain: bool,
    format: Format,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = compute(crypto, value, plain);

    match format {
        Format::Json => super::print_json(&output)?,
        Format::Text => {
            if !output.keyed {
                eprintln!("warning: unkeyed index, guessable by anyone who can hash candidates");
            }
            println!("{}", output.index);
        }
    }

    Ok(())
}
