//! Scoring rule tables.
//!
//! Each factor is an ordered list of `(predicate, adjustment)` rows where
//! the first matching row wins. The default tables are embedded at compile
//! time from `rules/default.toml`.

use std::path::Path;

use candy_map_score_models::PropertyClass;
use serde::{Deserialize, Serialize};

use crate::ScoringRulesError;

/// Rules embedded at compile time.
const DEFAULT_RULES_TOML: &str = include_str!("../rules/default.toml");

/// Complete candy score configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringRules {
    /// Score every property starts with.
    pub base: i32,
    /// Year that sale ages are measured against.
    pub reference_year: i32,
    /// Age adjustment when no sale date is on record.
    pub missing_sale_date: i32,
    /// Age adjustment when no [`AgeRule`] matches.
    pub age_fallback: i32,
    /// Age buckets, first match wins.
    #[serde(default)]
    pub age: Vec<AgeRule>,
    /// Classification rules, first match wins.
    #[serde(default)]
    pub class: Vec<ClassRule>,
    /// Density penalties, first match wins.
    #[serde(default)]
    pub density: Vec<DensityRule>,
}

/// Applies `adjustment` when the sale is at least `min_years` old.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeRule {
    /// Minimum years since sale, inclusive.
    pub min_years: i32,
    /// Score adjustment.
    pub adjustment: i32,
}

/// Assigns `class` and applies `adjustment` when `predicate` matches the
/// classification string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassRule {
    /// Classification group assigned on match.
    pub class: PropertyClass,
    /// Score adjustment.
    pub adjustment: i32,
    /// Match condition.
    pub predicate: ClassPredicate,
}

/// How a [`ClassRule`] matches a classification string. Case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "match", rename_all = "snake_case")]
pub enum ClassPredicate {
    /// The whole classification equals `value`.
    Exact {
        /// Expected classification.
        value: String,
    },
    /// The classification contains any of `needles`.
    ContainsAny {
        /// Substrings to look for.
        needles: Vec<String>,
    },
}

impl ClassPredicate {
    /// Whether `classification` satisfies this predicate.
    #[must_use]
    pub fn matches(&self, classification: &str) -> bool {
        match self {
            Self::Exact { value } => classification == value,
            Self::ContainsAny { needles } => contains_any(classification, needles),
        }
    }
}

/// Applies `adjustment` when the unit count is strictly above `above`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DensityRule {
    /// Exclusive unit-count threshold.
    pub above: u32,
    /// Score adjustment.
    pub adjustment: i32,
}

impl ScoringRules {
    /// Parses rules from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`ScoringRulesError::Toml`] if the TOML is malformed or
    /// missing required keys.
    pub fn from_toml(toml_str: &str) -> Result<Self, ScoringRulesError> {
        Ok(toml::de::from_str(toml_str)?)
    }

    /// Reads rules from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ScoringRulesError`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ScoringRulesError> {
        let rules = Self::from_toml(&std::fs::read_to_string(path)?)?;
        log::info!("Loaded scoring rules from {}", path.display());
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
            .unwrap_or_else(|e| panic!("Failed to parse embedded scoring rules: {e}"))
    }

    /// Returns these rules measured against a different reference year.
    #[must_use]
    pub fn with_reference_year(mut self, reference_year: i32) -> Self {
        self.reference_year = reference_year;
        self
    }

    /// Age adjustment for a sale `years` before the reference year.
    #[must_use]
    pub fn age_adjustment(&self, years: i32) -> i32 {
        self.age
            .iter()
            .find(|rule| years >= rule.min_years)
            .map_or(self.age_fallback, |rule| rule.adjustment)
    }

    /// Classification group and adjustment for `classification`.
    #[must_use]
    pub fn class_adjustment(&self, classification: &str) -> (PropertyClass, i32) {
        self.class
            .iter()
            .find(|rule| rule.predicate.matches(classification))
            .map_or((PropertyClass::Other, 0), |rule| (rule.class, rule.adjustment))
    }

    /// Density penalty for a property with `units` units.
    #[must_use]
    pub fn density_adjustment(&self, units: u32) -> i32 {
        self.density
            .iter()
            .find(|rule| units > rule.above)
            .map_or(0, |rule| rule.adjustment)
    }
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self::embedded()
    }
}

/// Checks if `haystack` contains any of the given `needles`.
fn contains_any(haystack: &str, needles: &[String]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_embedded_rules() {
        let rules = ScoringRules::embedded();
        assert_eq!(rules.base, 10);
        assert_eq!(rules.reference_year, 2025);
        assert_eq!(rules.missing_sale_date, 12);
        assert_eq!(rules.age.len(), 3);
        assert_eq!(rules.class.len(), 6);
        assert_eq!(rules.density.len(), 4);
    }

    #[test]
    fn age_buckets() {
        let rules = ScoringRules::embedded();
        assert_eq!(rules.age_adjustment(45), 15);
        assert_eq!(rules.age_adjustment(20), 15);
        assert_eq!(rules.age_adjustment(19), 10);
        assert_eq!(rules.age_adjustment(10), 10);
        assert_eq!(rules.age_adjustment(9), 5);
        assert_eq!(rules.age_adjustment(5), 5);
        assert_eq!(rules.age_adjustment(4), 2);
        assert_eq!(rules.age_adjustment(0), 2);
        assert_eq!(rules.age_adjustment(-3), 2);
    }

    #[test]
    fn class_rules_in_priority_order() {
        let rules = ScoringRules::embedded();
        assert_eq!(
            rules.class_adjustment("Dwelling"),
            (PropertyClass::SingleFamily, 40)
        );
        assert_eq!(
            rules.class_adjustment("Flats & Duplex"),
            (PropertyClass::SmallMultiFamily, 15)
        );
        assert_eq!(
            rules.class_adjustment("2 Dwellings on 1 Parcel"),
            (PropertyClass::SmallMultiFamily, 15)
        );
        assert_eq!(
            rules.class_adjustment("Apartment 4 units or less"),
            (PropertyClass::SmallApartment, 10)
        );
        assert_eq!(
            rules.class_adjustment("Flat & Store 4 units or less"),
            (PropertyClass::SmallApartment, 10)
        );
        assert_eq!(
            rules.class_adjustment("Condominium"),
            (PropertyClass::Condominium, -10)
        );
        assert_eq!(
            rules.class_adjustment("Live/Work Condominium"),
            (PropertyClass::Condominium, -10)
        );
        assert_eq!(
            rules.class_adjustment("Apartment 5 to 14 units"),
            (PropertyClass::MidApartment, -15)
        );
        assert_eq!(
            rules.class_adjustment("Flat & Store 5 to 14 units"),
            (PropertyClass::MidApartment, -15)
        );
        assert_eq!(
            rules.class_adjustment("Apartment 15 units or more"),
            (PropertyClass::LargeApartment, -25)
        );
        assert_eq!(
            rules.class_adjustment("Flat & Store 15 units or more"),
            (PropertyClass::LargeApartment, -25)
        );
    }

    #[test]
    fn dwelling_must_match_exactly() {
        let rules = ScoringRules::embedded();
        assert_eq!(
            rules.class_adjustment("Dwelling "),
            (PropertyClass::Other, 0)
        );
        assert_eq!(rules.class_adjustment("dwelling"), (PropertyClass::Other, 0));
    }

    #[test]
    fn unmatched_class_is_other() {
        let rules = ScoringRules::embedded();
        assert_eq!(
            rules.class_adjustment("Commercial Store"),
            (PropertyClass::Other, 0)
        );
        assert_eq!(rules.class_adjustment(""), (PropertyClass::Other, 0));
    }

    #[test]
    fn density_penalties() {
        let rules = ScoringRules::embedded();
        assert_eq!(rules.density_adjustment(1), 0);
        assert_eq!(rules.density_adjustment(2), 0);
        assert_eq!(rules.density_adjustment(3), -3);
        assert_eq!(rules.density_adjustment(4), -3);
        assert_eq!(rules.density_adjustment(5), -8);
        assert_eq!(rules.density_adjustment(10), -8);
        assert_eq!(rules.density_adjustment(11), -15);
        assert_eq!(rules.density_adjustment(20), -15);
        assert_eq!(rules.density_adjustment(21), -20);
    }

    #[test]
    fn overrides_reference_year() {
        let rules = ScoringRules::embedded().with_reference_year(2040);
        assert_eq!(rules.reference_year, 2040);
    }

    #[test]
    fn rejects_unknown_class() {
        let toml_str = r#"
            base = 10
            reference_year = 2025
            missing_sale_date = 12
            age_fallback = 2

            [[class]]
            class = "MANSION"
            adjustment = 5
            predicate = { match = "exact", value = "Mansion" }
        "#;
        assert!(matches!(
            ScoringRules::from_toml(toml_str),
            Err(ScoringRulesError::Toml(_))
        ));
    }
}
