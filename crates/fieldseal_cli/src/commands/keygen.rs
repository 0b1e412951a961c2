//! Key generation command.

use crate::Format;
use serde::Serialize;

/// Generated key output.
#[derive(Debug, Serialize)]
struct GeneratedKey {
    key: String,
    env: &'static str,
}

/// Runs the gen-key command.
pub fn run(format: Format) -> Result<(), Box<dyn std::error::Error>> {
    let key = fieldseal_core::generate_key_hex();

    match format {
        Format::Json => super::print_json(&GeneratedKey {
            key,
            env: crate::config::KEY_ENV,
        })?,
        Format::Text => {
            println!("{key}");
            eprintln!("Store this as {} and keep it secret.", crate::config::KEY_ENV);
            eprintln!("Records encrypted under it cannot be read without it.");
        }
    }

    Ok(())
}
