//! Lookup command implementation.

use crate::Format;
use fieldseal_core::{FieldCrypto, IndexedField, LookupQuery};

/// Runs the lookup command.
pub fn run(
    crypto: &FieldCrypto,
    field: &IndexedField,
    value: &str,
    format: Format,
) -> Result<(), Box<dyn std::error::Error>> {
    let query = LookupQuery::build(crypto, field, value);
    let Some(filter) = query.to_filter() else {
        return Err("value is empty after normalization".into());
    };

    if !crypto.is_configured() {
        eprintln!("warning: no key configured, keyed index condition omitted");
    }

    match format {
        Format::Json => super::print_json(&filter)?,
        Format::Text => {
            for (i, condition) in query.conditions().iter().enumerate() {
                println!("{}. {} = {}", i + 1, condition.field, condition.value);
            }
        }
    }

    Ok(())
}
