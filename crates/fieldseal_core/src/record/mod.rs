//! Field-level operations on whole records.
//!
//! Records are JSON objects, the shape documents have on their way in and
//! out of the store. Every function here returns a new record and leaves
//! its input untouched.

mod policy;

pub use policy::{BlindIndexSpec, FieldPolicy};

use crate::crypto::{plain_blind_index, FieldCrypto};
use crate::error::CoreResult;
use serde_json::{Map, Value};

/// A stored record: a JSON object keyed by field name.
pub type Record = Map<String, Value>;

/// Field holding a user's email address.
pub const EMAIL_FIELD: &str = "email";
/// Field holding the blind index of a user's email address.
pub const EMAIL_HASH_FIELD: &str = "emailHash";
/// Field holding the unkeyed blind index of a user's email address.
pub const EMAIL_HASH_PLAIN_FIELD: &str = "emailHashPlain";
/// Field holding a generation's prompt text.
pub const PROMPT_FIELD: &str = "prompt";

impl FieldCrypto {
    /// Returns a copy of `record` with each listed string field encrypted.
    ///
    /// Listed fields that are missing stay missing. `null` and non-string
    /// values are left as they are, as are fields not listed.
    ///
    /// # Errors
    ///
    /// Fails if any present, non-empty field cannot be encrypted.
    pub fn encrypt_fields(&self, record: &Record, fields: &[&str]) -> CoreResult<Record> {
        let mut out = record.clone();
        for field in fields {
            if let Some(Value::String(value)) = out.get_mut(*field) {
                *value = self.encrypt(value)?;
            }
        }
        Ok(out)
    }

    /// Returns a copy of `record` with each listed string field decrypted.
    ///
    /// Same field rules as [`encrypt_fields`](Self::encrypt_fields).
    /// Undecryptable values are kept as stored.
    #[must_use]
    pub fn decrypt_fields(&self, record: &Record, fields: &[&str]) -> Record {
        let mut out = record.clone();
        for field in fields {
            if let Some(Value::String(value)) = out.get_mut(*field) {
                *value = self.decrypt(value);
            }
        }
        out
    }

    /// Encrypts a user record's email and derives its `emailHash` and
    /// `emailHashPlain`.
    ///
    /// `emailHashPlain` always holds the unkeyed index, so the record stays
    /// findable by a process running without the key. A record without an
    /// email gets neither.
    ///
    /// # Errors
    ///
    /// Fails if the email cannot be encrypted.
    pub fn encrypt_user_data(&self, user: &Record) -> CoreResult<Record> {
        let mut out = user.clone();
        if let Some(Value::String(email)) = out.get_mut(EMAIL_FIELD) {
            if !email.is_empty() {
                let hash = self.create_blind_index(email);
                let plain_hash = plain_blind_index(email);
                *email = self.encrypt(email)?;
                out.insert(EMAIL_HASH_FIELD.to_owned(), Value::String(hash));
                out.insert(EMAIL_HASH_PLAIN_FIELD.to_owned(), Value::String(plain_hash));
            }
        }
        Ok(out)
    }

    /// Decrypts a user record's email. `emailHash` is kept.
    #[must_use]
    pub fn decrypt_user_data(&self, user: &Record) -> Record {
        self.decrypt_fields(user, &[EMAIL_FIELD])
    }
}
