#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command implementations for the `candy_map` binary.
//!
//! Each function returns the text to print so the commands can be tested
//! without capturing stdout.

use std::io::Read as _;
use std::path::{Path, PathBuf};

use candy_map_property::{PropertyError, PropertyRecord, RecordFilter, parse_records};
use candy_map_ranking::{Ranker, clamp_count};
use candy_map_score::{CandyScorer, ScoringRules, ScoringRulesError};
use candy_map_street::{StreetNormalizer, StreetRules, StreetRulesError};

/// Errors surfaced by CLI commands.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Reading stdin failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The property dataset could not be loaded.
    #[error(transparent)]
    Property(#[from] PropertyError),

    /// A street rules file was invalid.
    #[error("Street rules: {0}")]
    StreetRules(#[from] StreetRulesError),

    /// A scoring rules file was invalid.
    #[error("Scoring rules: {0}")]
    ScoringRules(#[from] ScoringRulesError),

    /// Output serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reads a JSON array of property records from `input`, or from stdin when
/// `input` is `-`.
///
/// # Errors
///
/// Returns [`CliError`] if the input cannot be read or parsed.
pub fn read_records(input: &Path) -> Result<Vec<PropertyRecord>, CliError> {
    if input == Path::new("-") {
        let mut data = String::new();
        std::io::stdin().read_to_string(&mut data)?;
        let records = parse_records(&data)?;
        log::info!("Read {} property records from stdin", records.len());
        return Ok(records);
    }
    Ok(candy_map_property::load_records(input)?)
}

/// Rule overrides shared by the commands that score or rank.
#[derive(Debug, Clone, Default)]
pub struct RuleOptions {
    /// Custom street rules TOML.
    pub street_rules: Option<PathBuf>,
    /// Custom scoring rules TOML.
    pub scoring_rules: Option<PathBuf>,
    /// Reference year override for sale ages.
    pub reference_year: Option<i32>,
}

impl RuleOptions {
    /// Builds the street normalizer.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::StreetRules`] if the custom rules are invalid.
    pub fn normalizer(&self) -> Result<StreetNormalizer, CliError> {
        match &self.street_rules {
            Some(path) => Ok(StreetNormalizer::new(&StreetRules::load(path)?)?),
            None => Ok(StreetNormalizer::default()),
        }
    }

    /// Builds the candy scorer.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::ScoringRules`] if the custom rules are invalid.
    pub fn scorer(&self) -> Result<CandyScorer, CliError> {
        let mut rules = match &self.scoring_rules {
            Some(path) => ScoringRules::load(path)?,
            None => ScoringRules::embedded(),
        };
        if let Some(year) = self.reference_year {
            rules = rules.with_reference_year(year);
        }
        Ok(CandyScorer::new(rules))
    }

    /// Builds a ranker from both rule sets.
    ///
    /// # Errors
    ///
    /// Returns [`CliError`] if either rule set is invalid.
    pub fn ranker(&self) -> Result<Ranker, CliError> {
        Ok(Ranker::new(self.normalizer()?, self.scorer()?))
    }
}

/// Ranks streets and renders the result as pretty JSON.
///
/// With `show_skipped` the full report (including unparsable records) is
/// rendered; otherwise just the ranked list.
///
/// # Errors
///
/// Returns [`CliError::Json`] if serialization fails.
pub fn rank(
    records: &[PropertyRecord],
    filter: &RecordFilter,
    ranker: &Ranker,
    count: Option<usize>,
    show_skipped: bool,
) -> Result<String, CliError> {
    let records = filter.apply(records);
    let report = ranker.rank(&records, clamp_count(count));

    if report.skipped_count() > 0 {
        log::warn!(
            "{} of {} records had no recognizable street",
            report.skipped_count(),
            report.considered
        );
    }

    if show_skipped {
        Ok(serde_json::to_string_pretty(&report)?)
    } else {
        Ok(serde_json::to_string_pretty(&report.streets)?)
    }
}

/// Renders one JSON line per record with its street and score breakdown.
///
/// # Errors
///
/// Returns [`CliError::Json`] if serialization fails.
pub fn score(
    records: &[PropertyRecord],
    normalizer: &StreetNormalizer,
    scorer: &CandyScorer,
) -> Result<Vec<String>, CliError> {
    records
        .iter()
        .map(|record| {
            let street = record
                .property_location
                .as_deref()
                .and_then(|loc| normalizer.normalize(loc).into_street());
            let line = serde_json::json!({
                "parcel_number": record.parcel_number,
                "location": record.property_location,
                "street": street,
                "breakdown": scorer.breakdown(record),
            });
            Ok(serde_json::to_string(&line)?)
        })
        .collect()
}

/// Renders `<input>\t<street>` for each location, with `UNPARSABLE` when no
/// street is found.
#[must_use]
pub fn normalize(locations: &[String], normalizer: &StreetNormalizer) -> Vec<String> {
    locations
        .iter()
        .map(|loc| {
            let extracted = normalizer.normalize(loc);
            format!("{loc}\t{}", extracted.street().unwrap_or("UNPARSABLE"))
        })
        .collect()
}
