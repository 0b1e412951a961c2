//! # fieldseal core
//!
//! Field-level encryption for stored records.
//!
//! This crate provides:
//! - AES-256-GCM encryption of single field values into a text envelope
//! - Fail-soft decryption that passes legacy plaintext through unchanged
//! - Keyed blind indexes for equality lookups on encrypted fields
//! - Record helpers and per-collection field policies for persistence hooks
//! - Multi-variant lookup queries for records written under older
//!   configurations
//!
//! One [`FieldCrypto`] handle is built at start-up and shared by every
//! surface that reads or writes records.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod crypto;
pub mod error;
pub mod lookup;
pub mod record;

pub use config::CryptoConfig;
pub use crypto::{
    generate_key_hex, is_encrypted, normalize, plain_blind_index, Decrypted, EncryptionKey,
    Envelope, FieldCrypto,
};
pub use error::{CoreError, CoreResult};
pub use lookup::{IndexedField, LookupCondition, LookupQuery};
pub use record::{FieldPolicy, Record};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
