//! CLI command implementations.

pub mod field;
pub mod index;
pub mod inspect;
pub mod keygen;
pub mod lookup;

use serde::Serialize;

/// Prints `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
