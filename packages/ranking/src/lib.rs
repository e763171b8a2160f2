#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Per-street aggregation and ranking of candy scores.
//!
//! [`Ranker::rank`] groups property records by canonical street, drops
//! streets with too few properties to average meaningfully, and returns the
//! best streets by mean candy score. Records whose location cannot be parsed
//! are reported back in [`RankingReport::skipped`] instead of disappearing.
//!
//! Ranking is pure and single-pass: each call owns its aggregation state,
//! so a shared [`Ranker`] can serve concurrent callers.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use candy_map_property_models::PropertyRecord;
pub use candy_map_ranking_models::{
    RankedStreetEntry, RankingReport, SkippedRecord, StreetAggregate,
};
use candy_map_score::CandyScorer;
use candy_map_street::StreetNormalizer;

/// Streets with fewer properties than this are not ranked.
pub const DEFAULT_MIN_PROPERTIES: u32 = 3;

/// Number of streets returned when a caller does not ask for a count.
pub const DEFAULT_COUNT: usize = 3;

/// Largest number of streets a caller may ask for.
pub const MAX_COUNT: usize = 50;

/// Applies the request policy for a caller-supplied street count: missing
/// means [`DEFAULT_COUNT`], anything above [`MAX_COUNT`] is capped.
#[must_use]
pub fn clamp_count(requested: Option<usize>) -> usize {
    requested.unwrap_or(DEFAULT_COUNT).min(MAX_COUNT)
}

/// Street normalizer, scorer, and minimum-sample threshold.
#[derive(Debug, Clone)]
pub struct Ranker {
    normalizer: StreetNormalizer,
    scorer: CandyScorer,
    min_properties: u32,
}

impl Default for Ranker {
    fn default() -> Self {
        Self::new(StreetNormalizer::default(), CandyScorer::default())
    }
}

impl Ranker {
    /// Creates a ranker with the default minimum-sample threshold.
    #[must_use]
    pub const fn new(normalizer: StreetNormalizer, scorer: CandyScorer) -> Self {
        Self {
            normalizer,
            scorer,
            min_properties: DEFAULT_MIN_PROPERTIES,
        }
    }

    /// Overrides the minimum number of properties a street needs to be
    /// ranked.
    #[must_use]
    pub fn with_min_properties(mut self, min_properties: u32) -> Self {
        self.min_properties = min_properties;
        self
    }

    /// Groups `records` by street without filtering or sorting.
    ///
    /// Returns the aggregates keyed by canonical street name along with the
    /// records that had no parsable street.
    #[must_use]
    pub fn aggregate(
        &self,
        records: &[PropertyRecord],
    ) -> (BTreeMap<String, StreetAggregate>, Vec<SkippedRecord>) {
        let mut streets: BTreeMap<String, StreetAggregate> = BTreeMap::new();
        let mut skipped = Vec::new();

        for (index, record) in records.iter().enumerate() {
            let location = record.property_location.as_deref().unwrap_or("");
            let Some(street) = self.normalizer.normalize(location).into_street() else {
                log::debug!("Failed to extract street from {location:?}");
                skipped.push(SkippedRecord {
                    index,
                    parcel_number: record.parcel_number.clone(),
                    location: record.property_location.clone(),
                });
                continue;
            };

            let score = self.scorer.score(record);
            let units = record.unit_count();

            streets
                .entry(street)
                .or_insert_with_key(|key| StreetAggregate::new(key.clone()))
                .add(score, units);
        }

        (streets, skipped)
    }

    /// Ranks the streets in `records`, returning at most `count` entries.
    ///
    /// Streets are ordered by rounded mean score, best first; ties are
    /// broken by street name ascending. A `count` of zero yields no entries.
    #[must_use]
    pub fn rank(&self, records: &[PropertyRecord], count: usize) -> RankingReport {
        let (streets, skipped) = self.aggregate(records);
        let street_count = streets.len();

        let mut ranked: Vec<RankedStreetEntry> = streets
            .into_values()
            .filter(|agg| agg.property_count >= self.min_properties)
            .map(StreetAggregate::into_entry)
            .collect();
        let eligible = ranked.len();

        ranked.sort_by(compare_entries);
        ranked.truncate(count);

        log::info!(
            "Ranked {} of {eligible} eligible streets ({street_count} total) from {} records, {} skipped",
            ranked.len(),
            records.len(),
            skipped.len()
        );

        RankingReport {
            streets: ranked,
            skipped,
            considered: records.len(),
        }
    }
}

/// Best score first, then street name ascending.
fn compare_entries(a: &RankedStreetEntry, b: &RankedStreetEntry) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.street.cmp(&b.street))
}

/// Ranks `records` with the default rules.
#[must_use]
pub fn top_streets(records: &[PropertyRecord], count: usize) -> Vec<RankedStreetEntry> {
    Ranker::default().rank(records, count).streets
}
