#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Heuristic candy score calculation.
//!
//! A property's candy score estimates how good it is to visit door to door
//! on Halloween. Long-held single family homes score high; recently sold,
//! dense apartment buildings score low. The score is the sum of:
//!
//! - a base score,
//! - an age adjustment from years since the last sale,
//! - a classification adjustment from the building class,
//! - a density penalty from the unit count,
//!
//! floored at zero. All tables live in [`ScoringRules`].

pub mod rules;
pub mod sale_date;

use candy_map_property_models::PropertyRecord;
pub use candy_map_score_models::{PropertyClass, SaleAge, ScoreBreakdown};
pub use rules::{AgeRule, ClassPredicate, ClassRule, DensityRule, ScoringRules};

/// Errors that can occur while loading scoring rules.
#[derive(Debug, thiserror::Error)]
pub enum ScoringRulesError {
    /// I/O error (rules file read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing failed.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Scores property records against a [`ScoringRules`] set.
#[derive(Debug, Clone, Default)]
pub struct CandyScorer {
    rules: ScoringRules,
}

impl CandyScorer {
    /// Creates a scorer for `rules`.
    #[must_use]
    pub const fn new(rules: ScoringRules) -> Self {
        Self { rules }
    }

    /// The rules this scorer applies.
    #[must_use]
    pub const fn rules(&self) -> &ScoringRules {
        &self.rules
    }

    /// Computes the candy score of `record`. Never negative.
    #[must_use]
    pub fn score(&self, record: &PropertyRecord) -> u32 {
        self.breakdown(record).score
    }

    /// Computes every contribution to `record`'s candy score.
    #[must_use]
    pub fn breakdown(&self, record: &PropertyRecord) -> ScoreBreakdown {
        let rules = &self.rules;

        let sale_age = sale_date::sale_age(
            record.current_sales_date.as_deref(),
            rules.reference_year,
        );
        let age = match sale_age {
            SaleAge::Missing => rules.missing_sale_date,
            SaleAge::Unreadable => rules.age_fallback,
            SaleAge::Years { years } => rules.age_adjustment(years),
        };

        let (class, class_adjustment) = rules.class_adjustment(record.classification());

        let units = record.unit_count();
        let density = rules.density_adjustment(units);

        let raw = rules
            .base
            .saturating_add(age)
            .saturating_add(class_adjustment)
            .saturating_add(density);

        ScoreBreakdown {
            base: rules.base,
            sale_age,
            age,
            class,
            class_adjustment,
            units,
            density,
            raw,
            score: raw.max(0).unsigned_abs(),
        }
    }
}
