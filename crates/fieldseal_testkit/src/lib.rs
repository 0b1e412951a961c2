//! # fieldseal Testkit
//!
//! Test utilities for fieldseal.
//!
//! This crate provides:
//! - Fixtures: a fixed test key and ready-made crypto handles
//! - Property-based test generators using proptest
//! - Known-answer vectors for envelopes and blind indexes
//!
//! ## Usage
//!
//! ```rust
//! use fieldseal_testkit::prelude::*;
//!
//! let crypto = configured_crypto();
//! let stored = crypto.encrypt("a@b.com").unwrap();
//! assert_eq!(crypto.decrypt(&stored), "a@b.com");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod vectors;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::vectors::*;
}

pub use fixtures::*;
pub use generators::*;
pub use vectors::*;
