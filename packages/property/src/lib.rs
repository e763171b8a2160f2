#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Property dataset loading and record filtering.
//!
//! Datasets are JSON arrays of assessor rows as exported by the city
//! open-data portal. Fetching them is someone else's job; this crate reads
//! an export that is already on disk (or in memory) and offers the same
//! neighborhood and residential-use selection the portal query would apply.

use std::collections::BTreeSet;
use std::path::Path;

pub use candy_map_property_models::{DEFAULT_UNIT_COUNT, PropertyRecord, RawUnits};

/// `use_definition` values considered residential.
pub const RESIDENTIAL_USES: &[&str] = &[
    "Single Family Residential",
    "Multi-Family Residential",
    "Condominium",
];

/// Errors that can occur while loading a dataset.
#[derive(Debug, thiserror::Error)]
pub enum PropertyError {
    /// I/O error (file read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parses a JSON array of property records.
///
/// # Errors
///
/// Returns [`PropertyError::Json`] if `data` is not a JSON array of objects.
pub fn parse_records(data: &str) -> Result<Vec<PropertyRecord>, PropertyError> {
    Ok(serde_json::from_str(data)?)
}

/// Reads a JSON array of property records from `path`.
///
/// # Errors
///
/// Returns [`PropertyError`] if the file cannot be read or parsed.
pub fn load_records(path: &Path) -> Result<Vec<PropertyRecord>, PropertyError> {
    let data = std::fs::read_to_string(path)?;
    let records = parse_records(&data)?;
    log::info!("Loaded {} property records from {}", records.len(), path.display());
    Ok(records)
}

/// Returns the distinct, non-empty neighborhood names in `records`, sorted.
#[must_use]
pub fn neighborhoods(records: &[PropertyRecord]) -> Vec<String> {
    records
        .iter()
        .filter_map(|r| r.assessor_neighborhood.as_deref())
        .filter(|n| !n.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Selects a subset of records before ranking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    /// Keep only records whose `assessor_neighborhood` equals this value.
    pub neighborhood: Option<String>,
    /// Keep only residential records with a positive declared unit count.
    pub residential_only: bool,
}

impl RecordFilter {
    /// Filter for one neighborhood's residential properties.
    #[must_use]
    pub fn residential_in(neighborhood: impl Into<String>) -> Self {
        Self {
            neighborhood: Some(neighborhood.into()),
            residential_only: true,
        }
    }

    /// Whether `record` passes this filter.
    #[must_use]
    pub fn matches(&self, record: &PropertyRecord) -> bool {
        if let Some(neighborhood) = &self.neighborhood
            && record.assessor_neighborhood.as_deref() != Some(neighborhood.as_str())
        {
            return false;
        }

        if self.residential_only {
            let residential = record
                .use_definition
                .as_deref()
                .is_some_and(|u| RESIDENTIAL_USES.contains(&u));
            if !residential || record.declared_units().is_none() {
                return false;
            }
        }

        true
    }

    /// Returns the records that pass this filter.
    #[must_use]
    pub fn apply(&self, records: &[PropertyRecord]) -> Vec<PropertyRecord> {
        let kept: Vec<PropertyRecord> = records
            .iter()
            .filter(|r| self.matches(r))
            .cloned()
            .collect();
        log::debug!("Filter kept {} of {} records", kept.len(), records.len());
        kept
    }
}
