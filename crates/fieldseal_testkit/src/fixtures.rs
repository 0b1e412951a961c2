//! Test fixtures.

use fieldseal_core::{EncryptionKey, FieldCrypto, Record};
use serde_json::Value;

/// Fixed test key: bytes `0x00..=0x1f`.
pub const TEST_KEY_HEX: &str =
    "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f";

/// A second fixed key, for wrong-key scenarios.
pub const OTHER_KEY_HEX: &str =
    "1f1e1d1c1b1a191817161514131211100f0e0d0c0b0a09080706050403020100";

/// Returns the fixed test key.
pub fn test_key() -> EncryptionKey {
    EncryptionKey::from_hex(TEST_KEY_HEX).expect("test key is valid hex")
}

/// Returns a handle configured with [`TEST_KEY_HEX`].
pub fn configured_crypto() -> FieldCrypto {
    FieldCrypto::new(test_key())
}

/// Returns a handle configured with [`OTHER_KEY_HEX`].
pub fn other_crypto() -> FieldCrypto {
    FieldCrypto::from_hex(OTHER_KEY_HEX).expect("other key is valid hex")
}

/// Returns a handle with no key.
pub fn unconfigured_crypto() -> FieldCrypto {
    FieldCrypto::unconfigured()
}

/// Converts a `json!` object literal into a [`Record`].
///
/// # Panics
///
/// Panics if `value` is not a JSON object.
pub fn record(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}
