//! Property-based test generators using proptest.
//!
//! Provides strategies for the text shapes stored fields actually hold:
//! arbitrary Unicode with control characters and NULs, long free text,
//! and email addresses with noisy casing and padding.

use proptest::prelude::*;

/// Strategy for arbitrary text, including NUL, control characters and
/// multi-byte code points. May be empty.
pub fn text_strategy(max_chars: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(any::<char>(), 0..=max_chars)
        .prop_map(|chars| chars.into_iter().collect())
}

/// Strategy for non-empty arbitrary text.
pub fn non_empty_text_strategy(max_chars: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(any::<char>(), 1..=max_chars.max(1))
        .prop_map(|chars| chars.into_iter().collect())
}

/// Strategy for long prompt-sized text of at least 10 000 characters.
pub fn long_text_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(any::<char>(), 10_000..10_500)
        .prop_map(|chars| chars.into_iter().collect())
}

/// Strategy for text mixing ASCII, accents, emoji and the control
/// characters that tend to break naive encoders.
pub fn tricky_text_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just("\0"),
            Just("\n"),
            Just("\t"),
            Just("\r\n"),
            Just(":"),
            Just("é"),
            Just("ß"),
            Just("日本"),
            Just("🚀"),
            Just("a"),
            Just(" "),
        ],
        1..64,
    )
    .prop_map(|parts| parts.concat())
}

/// Strategy for lowercase, trimmed email addresses.
pub fn email_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z0-9][a-z0-9._+]{0,15}@[a-z0-9]{1,12}\\.(com|org|net|io)")
        .expect("Invalid regex")
}

/// Strategy for an email together with a logically equal variant that has
/// random casing and surrounding whitespace.
pub fn email_variant_strategy() -> impl Strategy<Value = (String, String)> {
    (
        email_strategy(),
        prop::collection::vec(any::<bool>(), 32),
        "[ \t]{0,3}",
        "[ \t\n]{0,3}",
    )
        .prop_map(|(email, upper, lead, trail)| {
            let cased: String = email
                .chars()
                .zip(upper.iter().cycle())
                .map(|(c, &up)| if up { c.to_ascii_uppercase() } else { c })
                .collect();
            let variant = format!("{lead}{cased}{trail}");
            (email, variant)
        })
}

/// Strategy for values that are not envelopes: text without a colon.
pub fn plaintext_strategy(max_chars: usize) -> impl Strategy<Value = String> {
    text_strategy(max_chars).prop_map(|s| s.replace(':', ""))
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}
