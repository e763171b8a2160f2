#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Street aggregate and ranked street result types.

use serde::{Deserialize, Serialize};

/// Running totals for one street while ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreetAggregate {
    /// Canonical street name.
    pub street: String,
    /// Sum of the candy scores of every property on the street.
    pub total_score: u64,
    /// Number of properties on the street.
    pub property_count: u32,
    /// Sum of the unit counts of every property on the street.
    pub total_units: u64,
}

impl StreetAggregate {
    /// Creates an empty aggregate for `street`.
    #[must_use]
    pub const fn new(street: String) -> Self {
        Self {
            street,
            total_score: 0,
            property_count: 0,
            total_units: 0,
        }
    }

    /// Adds one property's score and unit count.
    pub fn add(&mut self, score: u32, units: u32) {
        self.total_score += u64::from(score);
        self.property_count += 1;
        self.total_units += u64::from(units);
    }

    /// Mean score rounded to one decimal place (half away from zero).
    #[must_use]
    pub fn average_score(&self) -> f64 {
        if self.property_count == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let mean = self.total_score as f64 / f64::from(self.property_count);
        (mean * 10.0).round() / 10.0
    }

    /// Converts to the output form.
    #[must_use]
    pub fn into_entry(self) -> RankedStreetEntry {
        RankedStreetEntry {
            score: self.average_score(),
            street: self.street,
            num_houses: self.property_count,
            num_units: self.total_units,
        }
    }
}

/// One street in the ranked output.
///
/// Field names are part of the public JSON contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedStreetEntry {
    /// Canonical street name.
    pub street: String,
    /// Mean candy score, rounded to one decimal place.
    pub score: f64,
    /// Number of properties on the street.
    pub num_houses: u32,
    /// Total units across those properties.
    pub num_units: u64,
}

/// A record left out of ranking because no street could be extracted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRecord {
    /// Position of the record in the input.
    pub index: usize,
    /// Parcel number, if the record had one.
    pub parcel_number: Option<String>,
    /// The location string that failed to parse.
    pub location: Option<String>,
}

/// Result of one ranking run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingReport {
    /// Top streets by score, best first.
    pub streets: Vec<RankedStreetEntry>,
    /// Records excluded for lack of a street.
    pub skipped: Vec<SkippedRecord>,
    /// Number of input records.
    pub considered: usize,
}

impl RankingReport {
    /// Number of records excluded for lack of a street.
    #[must_use]
    pub const fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}
