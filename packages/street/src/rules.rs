//! Configurable street extraction rules.
//!
//! The default rule set is baked into the binary at compile time via
//! [`include_str!`]. Tuning a pattern or adding a suffix synonym means
//! editing `rules/default.toml` (or passing a custom file), not code.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::StreetRulesError;

/// Rules embedded at compile time.
const DEFAULT_RULES_TOML: &str = include_str!("../rules/default.toml");

/// Patterns and synonyms that drive [`crate::StreetNormalizer`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreetRules {
    /// Regex for numbered streets (`"22ND AV"`). Tried first.
    ///
    /// Must define the `name` and `suffix` capture groups.
    pub numbered_pattern: String,
    /// Regex for named streets (`"PINE ST"`).
    ///
    /// Must define the `name` and `suffix` capture groups.
    pub named_pattern: String,
    /// Maps long or alternate suffix spellings to their canonical
    /// abbreviation (`AVENUE` → `AV`). Unlisted suffixes pass through
    /// uppercased.
    #[serde(default)]
    pub suffix_synonyms: BTreeMap<String, String>,
    /// Drop a leading `V` glued onto the next capital letter of a named
    /// street (`"VNESS"` → `"NESS"`).
    #[serde(default)]
    pub strip_leading_v: bool,
}

impl StreetRules {
    /// Parses rules from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`StreetRulesError::Toml`] if the TOML is malformed or
    /// missing required keys.
    pub fn from_toml(toml_str: &str) -> Result<Self, StreetRulesError> {
        Ok(toml::de::from_str(toml_str)?)
    }

    /// Reads rules from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`StreetRulesError`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, StreetRulesError> {
        let rules = Self::from_toml(&std::fs::read_to_string(path)?)?;
        log::info!("Loaded street rules from {}", path.display());
        Ok(rules)
    }

    /// Returns the rule set embedded in the binary.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed.
    #[must_use]
    pub fn embedded() -> Self {
        Self::from_toml(DEFAULT_RULES_TOML)
            .unwrap_or_else(|e| panic!("Failed to parse embedded street rules: {e}"))
    }
}

impl Default for StreetRules {
    fn default() -> Self {
        Self::embedded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_embedded_rules() {
        let rules = StreetRules::embedded();
        assert!(rules.strip_leading_v);
        assert_eq!(rules.suffix_synonyms.get("AVENUE").map(String::as_str), Some("AV"));
        assert_eq!(rules.suffix_synonyms.get("BLVD").map(String::as_str), Some("BL"));
        assert_eq!(rules.suffix_synonyms.len(), 10);
    }

    #[test]
    fn optional_keys_default() {
        let rules = StreetRules::from_toml(
            r#"
            numbered_pattern = '(?P<name>\d+TH)\s+(?P<suffix>ST)'
            named_pattern = '(?P<name>[A-Z]+)\s+(?P<suffix>ST)'
            "#,
        )
        .unwrap();
        assert!(rules.suffix_synonyms.is_empty());
        assert!(!rules.strip_leading_v);
    }

    #[test]
    fn rejects_missing_pattern() {
        assert!(matches!(
            StreetRules::from_toml("numbered_pattern = 'x'"),
            Err(StreetRulesError::Toml(_))
        ));
    }
}
