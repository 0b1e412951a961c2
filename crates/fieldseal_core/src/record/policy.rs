//! Per-collection field policies.
//!
//! A [`FieldPolicy`] names the sensitive fields of one kind of record and
//! applies them on the way into and out of the store, the job a
//! persistence hook does.

use super::{Record, EMAIL_FIELD, EMAIL_HASH_FIELD, EMAIL_HASH_PLAIN_FIELD, PROMPT_FIELD};
use crate::crypto::{is_encrypted, plain_blind_index, FieldCrypto};
use crate::error::CoreResult;
use serde_json::Value;
use tracing::warn;

/// A blind index derived from one source field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlindIndexSpec {
    /// Field whose plaintext is indexed.
    pub source: String,
    /// Field the index is stored in.
    pub hash_field: String,
    /// Always use the unkeyed index, whatever the key configuration.
    pub plain: bool,
}

impl BlindIndexSpec {
    fn compute(&self, crypto: &FieldCrypto, source: &str) -> String {
        if self.plain {
            plain_blind_index(source)
        } else {
            crypto.create_blind_index(source)
        }
    }
}

/// The sensitive fields of one record kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPolicy {
    encrypted: Vec<String>,
    indexed: Vec<BlindIndexSpec>,
}

impl FieldPolicy {
    /// Creates an empty policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Policy for user records: `email` encrypted, indexed into
    /// `emailHash` and, unkeyed, into `emailHashPlain`.
    #[must_use]
    pub fn users() -> Self {
        Self::new()
            .encrypt(EMAIL_FIELD)
            .index(EMAIL_FIELD, EMAIL_HASH_FIELD)
            .index_plain(EMAIL_FIELD, EMAIL_HASH_PLAIN_FIELD)
    }

    /// Policy for generation records: `prompt` encrypted.
    #[must_use]
    pub fn generations() -> Self {
        Self::new().encrypt(PROMPT_FIELD)
    }

    /// Adds a field to encrypt at rest.
    #[must_use]
    pub fn encrypt(mut self, field: impl Into<String>) -> Self {
        let field = field.into();
        if !self.encrypted.contains(&field) {
            self.encrypted.push(field);
        }
        self
    }

    /// Adds a blind index of `source` stored in `hash_field`.
    #[must_use]
    pub fn index(mut self, source: impl Into<String>, hash_field: impl Into<String>) -> Self {
        self.indexed.push(BlindIndexSpec {
            source: source.into(),
            hash_field: hash_field.into(),
            plain: false,
        });
        self
    }

    /// Adds an unkeyed blind index of `source` stored in `hash_field`.
    ///
    /// The stored value does not depend on the key, so lookups still work
    /// after the key is removed or before it is provisioned.
    #[must_use]
    pub fn index_plain(
        mut self,
        source: impl Into<String>,
        hash_field: impl Into<String>,
    ) -> Self {
        self.indexed.push(BlindIndexSpec {
            source: source.into(),
            hash_field: hash_field.into(),
            plain: true,
        });
        self
    }

    /// Fields encrypted at rest.
    #[must_use]
    pub fn encrypted_fields(&self) -> &[String] {
        &self.encrypted
    }

    /// Blind indexes maintained for this record kind.
    #[must_use]
    pub fn blind_indexes(&self) -> &[BlindIndexSpec] {
        &self.indexed
    }

    /// Prepares a record, or a partial update, for writing.
    ///
    /// Plaintext values of encrypted fields are encrypted; values that are
    /// already envelopes are left alone so a partial update never encrypts
    /// twice. Blind indexes are computed only from plaintext sources, so an
    /// unchanged envelope keeps the index it was stored with.
    ///
    /// # Errors
    ///
    /// Fails if a plaintext field cannot be encrypted.
    pub fn seal(&self, crypto: &FieldCrypto, record: &Record) -> CoreResult<Record> {
        let mut out = record.clone();

        for spec in &self.indexed {
            if let Some(Value::String(source)) = record.get(&spec.source) {
                if !source.is_empty() && !is_encrypted(source) {
                    out.insert(
                        spec.hash_field.clone(),
                        Value::String(spec.compute(crypto, source)),
                    );
                }
            }
        }

        for field in &self.encrypted {
            if let Some(Value::String(value)) = out.get_mut(field) {
                if !is_encrypted(value) {
                    *value = crypto.encrypt(value)?;
                }
            }
        }

        Ok(out)
    }

    /// Decrypts a record read from the store.
    #[must_use]
    pub fn open(&self, crypto: &FieldCrypto, record: &Record) -> Record {
        let mut out = record.clone();
        for field in &self.encrypted {
            if let Some(Value::String(value)) = out.get_mut(field) {
                let decrypted = crypto.try_decrypt(value);
                if decrypted.is_undecryptable() {
                    warn!(field = %field, "field left in encrypted form");
                }
                *value = decrypted.into_value();
            }
        }
        out
    }

    /// Decrypts a batch of records read from the store.
    #[must_use]
    pub fn open_all(&self, crypto: &FieldCrypto, records: &[Record]) -> Vec<Record> {
        records.iter().map(|r| self.open(crypto, r)).collect()
    }

    /// Lists encrypted fields of `record` that cannot be decrypted.
    ///
    /// A non-empty result is a data integrity problem worth alerting on.
    #[must_use]
    pub fn undecryptable_fields(&self, crypto: &FieldCrypto, record: &Record) -> Vec<String> {
        self.encrypted
            .iter()
            .filter(|field| match record.get(field.as_str()) {
                Some(Value::String(value)) => crypto.try_decrypt(value).is_undecryptable(),
                _ => false,
            })
            .cloned()
            .collect()
    }
}
