//! Sale date parsing.
//!
//! The roll stores `current_sales_date` as a Socrata floating timestamp
//! (`"2004-06-01T00:00:00.000"`), but hand-maintained extracts also use
//! plain `YYYY-MM-DD` or `MM/DD/YYYY`.

use candy_map_score_models::SaleAge;
use chrono::{DateTime, Datelike as _, NaiveDate, NaiveDateTime};

/// Parses the year out of a sale date string.
#[must_use]
pub fn parse_sale_year(s: &str) -> Option<i32> {
    let s = s.trim();

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.year());
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.year());
    }
    for format in ["%Y-%m-%d", "%m/%d/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Some(date.year());
        }
    }

    None
}

/// Classifies a record's sale date relative to `reference_year`.
///
/// A missing or blank date is [`SaleAge::Missing`]; a non-blank date that
/// cannot be parsed is [`SaleAge::Unreadable`].
#[must_use]
pub fn sale_age(raw: Option<&str>, reference_year: i32) -> SaleAge {
    match raw.map(str::trim) {
        None | Some("") => SaleAge::Missing,
        Some(s) => parse_sale_year(s).map_or(SaleAge::Unreadable, |year| SaleAge::Years {
            years: reference_year.saturating_sub(year),
        }),
    }
}
