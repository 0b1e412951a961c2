//! Property tests for field encryption, blind indexes and lookups.

use fieldseal_core::{
    crypto::BLIND_INDEX_HEX_LEN, is_encrypted, normalize, plain_blind_index, Decrypted,
    FieldCrypto, FieldPolicy, LookupQuery,
};
use fieldseal_testkit::prelude::*;
use proptest::prelude::*;
use serde_json::json;
use std::sync::Arc;
use std::thread;

fn segments_are_base64(envelope: &str) -> bool {
    envelope.split(':').all(|segment| {
        !segment.is_empty()
            && segment.len() % 4 == 0
            && segment
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '/' || c == '=')
    })
}

proptest! {
    #![proptest_config(PropTestConfig::default().to_proptest_config())]

    #[test]
    fn roundtrip(text in non_empty_text_strategy(256)) {
        let crypto = configured_crypto();
        let envelope = crypto.encrypt(&text).unwrap();
        prop_assert_eq!(crypto.decrypt(&envelope), text);
    }

    #[test]
    fn roundtrip_tricky_text(text in tricky_text_strategy()) {
        let crypto = configured_crypto();
        let envelope = crypto.encrypt(&text).unwrap();
        prop_assert!(is_encrypted(&envelope));
        prop_assert_eq!(crypto.decrypt(&envelope), text);
    }

    #[test]
    fn encryption_is_randomized(text in non_empty_text_strategy(64)) {
        let crypto = configured_crypto();
        let a = crypto.encrypt(&text).unwrap();
        let b = crypto.encrypt(&text).unwrap();
        prop_assert_ne!(&a, &b);
        prop_assert_eq!(crypto.decrypt(&a), crypto.decrypt(&b));
    }

    #[test]
    fn envelope_shape(text in non_empty_text_strategy(128)) {
        let envelope = configured_crypto().encrypt(&text).unwrap();
        prop_assert_eq!(envelope.split(':').count(), 3);
        prop_assert!(segments_are_base64(&envelope));
    }

    #[test]
    fn plaintext_passes_through(text in plaintext_strategy(128)) {
        let crypto = configured_crypto();
        prop_assert!(!is_encrypted(&text));
        prop_assert_eq!(crypto.try_decrypt(&text), Decrypted::Plaintext(text.clone()));
    }

    #[test]
    fn decrypt_is_idempotent_after_first_pass(text in text_strategy(128)) {
        let crypto = configured_crypto();
        let once = crypto.decrypt(&text);
        prop_assert_eq!(crypto.decrypt(&once), once);
    }

    #[test]
    fn decrypt_of_decrypted_envelope_is_stable(text in plaintext_strategy(64)) {
        let crypto = configured_crypto();
        let once = crypto.decrypt(&crypto.encrypt(&text).unwrap());
        prop_assert_eq!(&once, &text);
        prop_assert_eq!(crypto.decrypt(&once), once);
    }

    #[test]
    fn wrong_key_returns_stored_value(text in non_empty_text_strategy(64)) {
        let envelope = configured_crypto().encrypt(&text).unwrap();
        let result = other_crypto().try_decrypt(&envelope);
        prop_assert_eq!(result, Decrypted::Undecryptable(envelope));
    }

    #[test]
    fn blind_index_normalizes((email, variant) in email_variant_strategy()) {
        let crypto = configured_crypto();
        prop_assert_eq!(crypto.create_blind_index(&variant), crypto.create_blind_index(&email));
        prop_assert_eq!(plain_blind_index(&variant), plain_blind_index(&email));
    }

    #[test]
    fn blind_index_shape(text in non_empty_text_strategy(64)) {
        let index = configured_crypto().create_blind_index(&text);
        prop_assert_eq!(index.len(), BLIND_INDEX_HEX_LEN);
        prop_assert!(index.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn blind_index_distinguishes(a in email_strategy(), b in email_strategy()) {
        prop_assume!(a != b);
        let crypto = configured_crypto();
        prop_assert_ne!(crypto.create_blind_index(&a), crypto.create_blind_index(&b));
    }

    #[test]
    fn lookup_finds_sealed_user((email, variant) in email_variant_strategy()) {
        let crypto = configured_crypto();
        let stored = FieldPolicy::users()
            .seal(&crypto, &record(json!({"email": email})))
            .unwrap();
        prop_assert!(LookupQuery::email(&crypto, &variant).matches(&stored));
    }

    #[test]
    fn lookup_finds_sealed_user_without_key((email, variant) in email_variant_strategy()) {
        let stored = FieldPolicy::users()
            .seal(&configured_crypto(), &record(json!({"email": email})))
            .unwrap();
        prop_assert!(LookupQuery::email(&unconfigured_crypto(), &variant).matches(&stored));
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 8, ..ProptestConfig::default() })]

    #[test]
    fn roundtrip_long_text(text in long_text_strategy()) {
        let crypto = configured_crypto();
        let envelope = crypto.encrypt(&text).unwrap();
        prop_assert_eq!(crypto.decrypt(&envelope), text);
    }
}

#[test]
fn empty_values() {
    let crypto = configured_crypto();
    assert_eq!(crypto.encrypt("").unwrap(), "");
    assert_eq!(crypto.decrypt(""), "");
    assert_eq!(crypto.create_blind_index(""), "");
    assert!(!is_encrypted(""));
}

#[test]
fn backward_compatible_plaintext() {
    let crypto = configured_crypto();
    assert_eq!(
        crypto.decrypt("plain-unencrypted-text"),
        "plain-unencrypted-text"
    );
    assert!(!is_encrypted("plain@example.com"));
    assert!(is_encrypted(&crypto.encrypt("x").unwrap()));
}

#[test]
fn tampered_ciphertext_is_returned_as_is() {
    let crypto = configured_crypto();
    let envelope = crypto.encrypt("secret").unwrap();
    let parts: Vec<&str> = envelope.split(':').collect();
    let flipped = if parts[2].starts_with('A') { "B" } else { "A" };
    let tampered = format!("{}:{}:{}{}", parts[0], parts[1], flipped, &parts[2][1..]);

    let result = crypto.decrypt(&tampered);
    assert_eq!(result, tampered);
    assert_ne!(result, "secret");
}

#[test]
fn known_envelopes_decrypt() {
    let crypto = configured_crypto();
    for vector in ENVELOPE_VECTORS {
        assert_eq!(crypto.decrypt(vector.envelope), vector.plaintext);
        assert_eq!(other_crypto().decrypt(vector.envelope), vector.envelope);
    }
}

#[test]
fn known_blind_indexes() {
    let keyed = configured_crypto();
    let unkeyed = unconfigured_crypto();
    for vector in BLIND_INDEX_VECTORS {
        assert_eq!(keyed.create_blind_index(vector.input), vector.keyed);
        assert_eq!(unkeyed.create_blind_index(vector.input), vector.plain);
        assert_eq!(plain_blind_index(vector.input), vector.plain);
    }
}

#[test]
fn blind_index_examples() {
    let crypto = configured_crypto();
    let expected = crypto.create_blind_index("test@example.com");
    assert_eq!(crypto.create_blind_index("Test@Example.COM"), expected);
    assert_eq!(crypto.create_blind_index("  test@example.com  "), expected);
    assert_ne!(
        crypto.create_blind_index("user1@x.com"),
        crypto.create_blind_index("user2@x.com")
    );
}

#[test]
fn email_pipeline() {
    let crypto = configured_crypto();
    let normalized = normalize("USER@Example.com");
    assert_eq!(normalized, "user@example.com");

    let index = crypto.create_blind_index(&normalized);
    assert_eq!(index.len(), 64);
    assert!(index.chars().all(|c| c.is_ascii_hexdigit()));

    let envelope = crypto.encrypt(&normalized).unwrap();
    assert_ne!(envelope, normalized);
    assert_eq!(envelope.split(':').count(), 3);

    assert_eq!(
        crypto.create_blind_index("USER@Example.com"),
        crypto.create_blind_index("  user@example.com  ")
    );
}

#[test]
fn field_batch_leaves_input_untouched() {
    let crypto = configured_crypto();
    let input = record(json!({"email": "a@b.com", "name": "John"}));
    let snapshot = input.clone();

    let out = crypto.encrypt_fields(&input, &["email"]).unwrap();

    assert_eq!(input, snapshot);
    assert_eq!(out["name"], "John");
    assert!(is_encrypted(out["email"].as_str().unwrap()));
}

#[test]
fn encrypt_fails_loudly_without_key() {
    let err = unconfigured_crypto().encrypt("secret").unwrap_err();
    assert_eq!(err.to_string(), "Encryption failed");
}

#[test]
fn concurrent_use_of_one_handle() {
    let crypto: Arc<FieldCrypto> = Arc::new(configured_crypto());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let crypto = Arc::clone(&crypto);
            thread::spawn(move || {
                for j in 0..50 {
                    let text = format!("worker {i} value {j}");
                    let envelope = crypto.encrypt(&text).unwrap();
                    assert_eq!(crypto.decrypt(&envelope), text);
                    assert_eq!(
                        crypto.create_blind_index(&text),
                        crypto.create_blind_index(&text.to_uppercase())
                    );
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}
