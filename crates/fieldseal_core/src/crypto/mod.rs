//! Cryptographic operations for fieldseal.
//!
//! ## Security Model
//!
//! - AES-256-GCM authenticated encryption, one random 96-bit nonce per value
//! - Tampering with ciphertext or tag is detected at decrypt time
//! - Keys are zeroized on drop and redacted from `Debug`
//! - Blind indexes are HMAC-SHA256 under the same key, SHA-256 without one
//!
//! ## Usage
//!
//! ```
//! use fieldseal_core::crypto::{EncryptionKey, FieldCrypto};
//!
//! let crypto = FieldCrypto::new(EncryptionKey::generate());
//!
//! let stored = crypto.encrypt("alice@example.com").unwrap();
//! assert_eq!(crypto.decrypt(&stored), "alice@example.com");
//! ```

mod blind_index;
mod envelope;
mod field;
mod key;

pub use blind_index::{
    keyed_blind_index, normalize, plain_blind_index, BLIND_INDEX_HEX_LEN,
};
pub use envelope::{is_encrypted, Envelope, NONCE_SIZE, SEPARATOR, TAG_SIZE};
pub use field::{Decrypted, FieldCrypto};
pub use key::{generate_key_hex, EncryptionKey, KEY_HEX_LEN, KEY_SIZE};
