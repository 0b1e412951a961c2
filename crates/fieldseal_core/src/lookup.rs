//! Lookups by an encrypted, blind-indexed field.
//!
//! Records written over the life of a deployment do not agree on how a
//! searchable field is stored. Depending on when a record was written it
//! may carry a keyed blind index, an unkeyed one, a normalized plaintext
//! lookup copy, or only the raw legacy field. A lookup therefore has to
//! ask for all of them at once.
//!
//! [`LookupQuery`] builds that disjunction. It can be rendered as a
//! document-store filter or evaluated against records in memory.

use crate::crypto::{normalize, plain_blind_index, FieldCrypto};
use crate::record::{Record, EMAIL_FIELD, EMAIL_HASH_FIELD, EMAIL_HASH_PLAIN_FIELD};
use serde::Serialize;
use serde_json::{json, Map, Value};

/// The stored variants of one searchable field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedField {
    /// Field holding the blind index written under the active configuration.
    pub hash_field: String,
    /// Field holding an unkeyed blind index kept alongside the keyed one.
    pub plain_hash_field: Option<String>,
    /// Field holding the normalized plaintext.
    pub lookup_field: Option<String>,
    /// The original field, plaintext in records that predate encryption.
    pub legacy_field: Option<String>,
}

impl IndexedField {
    /// Creates a field description with only a hash field.
    #[must_use]
    pub fn new(hash_field: impl Into<String>) -> Self {
        Self {
            hash_field: hash_field.into(),
            plain_hash_field: None,
            lookup_field: None,
            legacy_field: None,
        }
    }

    /// Storage layout of user emails.
    #[must_use]
    pub fn email() -> Self {
        Self::new(EMAIL_HASH_FIELD)
            .plain_hash_field(EMAIL_HASH_PLAIN_FIELD)
            .lookup_field("emailLookup")
            .legacy_field(EMAIL_FIELD)
    }

    /// Sets the unkeyed hash field.
    #[must_use]
    pub fn plain_hash_field(mut self, field: impl Into<String>) -> Self {
        self.plain_hash_field = Some(field.into());
        self
    }

    /// Sets the normalized plaintext field.
    #[must_use]
    pub fn lookup_field(mut self, field: impl Into<String>) -> Self {
        self.lookup_field = Some(field.into());
        self
    }

    /// Sets the legacy plaintext field.
    #[must_use]
    pub fn legacy_field(mut self, field: impl Into<String>) -> Self {
        self.legacy_field = Some(field.into());
        self
    }
}

/// One equality condition of a lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookupCondition {
    /// Field to compare.
    pub field: String,
    /// Value the field must equal.
    pub value: String,
}

/// An ordered disjunction of equality conditions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LookupQuery {
    conditions: Vec<LookupCondition>,
}

impl LookupQuery {
    /// Builds the lookup for `value` across every storage variant of
    /// `field`.
    ///
    /// Conditions, in order:
    /// 1. blind index under the current configuration on `hash_field`
    /// 2. unkeyed blind index on `hash_field`
    /// 3. unkeyed blind index on `plain_hash_field`
    /// 4. normalized value on `lookup_field`
    /// 5. normalized value on `legacy_field`, then the trimmed input if it
    ///    differs
    ///
    /// Duplicates are dropped, so without a key 1 and 2 collapse. A value
    /// that normalizes to nothing gives an empty query.
    #[must_use]
    pub fn build(crypto: &FieldCrypto, field: &IndexedField, value: &str) -> Self {
        let normalized = normalize(value);
        let mut query = Self::default();
        if normalized.is_empty() {
            return query;
        }

        let plain = plain_blind_index(value);
        query.push(&field.hash_field, crypto.create_blind_index(value));
        query.push(&field.hash_field, plain.clone());
        if let Some(plain_field) = &field.plain_hash_field {
            query.push(plain_field, plain);
        }
        if let Some(lookup) = &field.lookup_field {
            query.push(lookup, normalized.clone());
        }
        if let Some(legacy) = &field.legacy_field {
            query.push(legacy, normalized);
            query.push(legacy, value.trim().to_owned());
        }

        query
    }

    /// Builds the lookup of a user by email.
    #[must_use]
    pub fn email(crypto: &FieldCrypto, email: &str) -> Self {
        Self::build(crypto, &IndexedField::email(), email)
    }

    fn push(&mut self, field: &str, value: String) {
        let condition = LookupCondition {
            field: field.to_owned(),
            value,
        };
        if !self.conditions.contains(&condition) {
            self.conditions.push(condition);
        }
    }

    /// The conditions in evaluation order.
    #[must_use]
    pub fn conditions(&self) -> &[LookupCondition] {
        &self.conditions
    }

    /// Returns true if the query has no conditions and matches nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Number of conditions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    /// Renders the query as a document-store filter:
    /// `{"$or": [{"field": "value"}, ...]}`.
    ///
    /// Returns `None` for an empty query, which must not be sent to a
    /// store as it would either be rejected or match everything.
    #[must_use]
    pub fn to_filter(&self) -> Option<Value> {
        if self.is_empty() {
            return None;
        }
        let clauses: Vec<Value> = self
            .conditions
            .iter()
            .map(|c| {
                let mut clause = Map::new();
                clause.insert(c.field.clone(), Value::String(c.value.clone()));
                Value::Object(clause)
            })
            .collect();
        Some(json!({ "$or": clauses }))
    }

    /// Returns true if `record` satisfies any condition.
    #[must_use]
    pub fn matches(&self, record: &Record) -> bool {
        self.conditions.iter().any(|c| {
            matches!(record.get(&c.field), Some(Value::String(stored)) if *stored == c.value)
        })
    }

    /// Returns the first record that matches.
    pub fn find_in<'a, I>(&self, records: I) -> Option<&'a Record>
    where
        I: IntoIterator<Item = &'a Record>,
    {
        records.into_iter().find(|r| self.matches(r))
    }
}
