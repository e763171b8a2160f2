#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Street name extraction for assessor property locations.
//!
//! Assessor exports store locations as padded free text:
//! - Parcel prefix and padding: `"0000 1038A PINE ST 0000"`
//! - Unit letter glued to the name: `"0000 1038APINE ST0000"`
//! - Numbered streets: `"1234 22ND AVE"`
//!
//! [`StreetNormalizer`] reduces these to a canonical `"<NAME> <SUFFIX>"` key
//! (`"PINE ST"`, `"22ND AV"`) so that properties on the same street group
//! together. The patterns and the suffix synonym table live in
//! [`StreetRules`], loaded from TOML.

pub mod normalize;
pub mod rules;

pub use normalize::{ExtractedStreet, StreetNormalizer};
pub use rules::StreetRules;

/// Errors that can occur while loading or compiling street rules.
#[derive(Debug, thiserror::Error)]
pub enum StreetRulesError {
    /// I/O error (rules file read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing failed.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A pattern is not a valid regular expression.
    #[error("Invalid {which} pattern: {source}")]
    Pattern {
        /// Which pattern failed (`"numbered"` or `"named"`).
        which: &'static str,
        /// The underlying regex error.
        source: regex::Error,
    },

    /// A pattern lacks a required named capture group.
    #[error("The {which} pattern has no `{group}` capture group")]
    MissingGroup {
        /// Which pattern is missing the group.
        which: &'static str,
        /// The missing group name.
        group: &'static str,
    },
}
