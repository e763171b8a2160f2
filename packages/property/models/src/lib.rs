#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Municipal property record types.
//!
//! [`PropertyRecord`] mirrors one row of the assessor's secured property
//! roll as published by the city open-data portal. Every field is optional:
//! the export is hand-entered data and any column can be missing, blank, or
//! typed inconsistently between rows. Consumers never fail on a bad field;
//! they coerce it through the helpers here.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

/// Unit count assumed for a property whose declared unit count is missing
/// or not a positive integer.
pub const DEFAULT_UNIT_COUNT: u32 = 1;

/// A declared unit count as it appears in the export.
///
/// The portal serves `number_of_units` as a JSON string on some datasets and
/// as a number on others.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawUnits {
    /// A JSON integer.
    Integer(i64),
    /// A JSON floating-point number.
    Float(f64),
    /// A numeric-like string (e.g. `"2"`, `" 4.0"`, `"3 units"`).
    Text(String),
    /// Any other JSON value (boolean, array, object). Never a valid count.
    #[serde(skip_serializing)]
    Other(IgnoredAny),
}

impl RawUnits {
    /// Leniently reads a positive unit count.
    ///
    /// Strings are read like a lenient integer parse: leading whitespace is
    /// skipped, an optional sign is accepted, and the leading run of decimal
    /// digits is taken with anything after it ignored. Floats are truncated.
    ///
    /// Returns `None` when nothing numeric can be read or the value is not
    /// positive.
    #[must_use]
    pub fn positive(&self) -> Option<u32> {
        match self {
            Self::Integer(n) => (*n > 0).then(|| u32::try_from(*n).unwrap_or(u32::MAX)),
            Self::Float(f) => {
                if f.is_finite() && *f >= 1.0 {
                    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                    Some(f.trunc().min(f64::from(u32::MAX)) as u32)
                } else {
                    None
                }
            }
            Self::Text(s) => parse_leading_int(s),
            Self::Other(_) => None,
        }
    }
}

/// Reads the leading integer of `s`, returning it only when positive.
fn parse_leading_int(s: &str) -> Option<u32> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = rest
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..end];
    if digits.is_empty() || negative {
        return None;
    }

    // Overlong digit runs saturate rather than fail.
    let value = digits.parse::<u32>().unwrap_or(u32::MAX);
    (value > 0).then_some(value)
}

/// Text column value, as loosely typed as the export serves it.
#[derive(Deserialize)]
#[serde(untagged)]
enum LenientText {
    Text(String),
    Integer(i64),
    Float(f64),
    Other(IgnoredAny),
}

/// Reads a text column, stringifying numbers and dropping any other value.
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(
        Option::<LenientText>::deserialize(deserializer)?.and_then(|value| match value {
            LenientText::Text(s) => Some(s),
            LenientText::Integer(n) => Some(n.to_string()),
            LenientText::Float(f) => Some(f.to_string()),
            LenientText::Other(IgnoredAny) => None,
        }),
    )
}

/// One property from the assessor roll.
///
/// Field names match the portal's JSON export so records deserialize
/// directly; columns not listed here are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyRecord {
    /// Assessor parcel number (block + lot).
    #[serde(default, deserialize_with = "lenient_text")]
    pub parcel_number: Option<String>,
    /// Free-text location, e.g. `"0000 1038A PINE ST 0000"`.
    #[serde(default, deserialize_with = "lenient_text")]
    pub property_location: Option<String>,
    /// Date of the most recent recorded sale.
    #[serde(default, deserialize_with = "lenient_text")]
    pub current_sales_date: Option<String>,
    /// Detailed building classification, e.g. `"Dwelling"` or
    /// `"Apartment 5 to 14 units"`.
    #[serde(default, deserialize_with = "lenient_text")]
    pub property_class_code_definition: Option<String>,
    /// Broad use category, e.g. `"Single Family Residential"`.
    #[serde(default, deserialize_with = "lenient_text")]
    pub use_definition: Option<String>,
    /// Assessor neighborhood name.
    #[serde(default, deserialize_with = "lenient_text")]
    pub assessor_neighborhood: Option<String>,
    /// Declared number of units on the parcel.
    #[serde(default)]
    pub number_of_units: Option<RawUnits>,
}

impl PropertyRecord {
    /// The declared unit count, if present and a positive integer.
    #[must_use]
    pub fn declared_units(&self) -> Option<u32> {
        self.number_of_units.as_ref().and_then(RawUnits::positive)
    }

    /// The unit count used for scoring and aggregation, falling back to
    /// [`DEFAULT_UNIT_COUNT`].
    #[must_use]
    pub fn unit_count(&self) -> u32 {
        self.declared_units().unwrap_or(DEFAULT_UNIT_COUNT)
    }

    /// The classification string, or `""` when absent.
    #[must_use]
    pub fn classification(&self) -> &str {
        self.property_class_code_definition.as_deref().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_units(units: serde_json::Value) -> PropertyRecord {
        serde_json::from_value(serde_json::json!({ "number_of_units": units })).unwrap()
    }

    #[test]
    fn deserializes_portal_row() {
        let record: PropertyRecord = serde_json::from_value(serde_json::json!({
            "parcel_number": "0275004",
            "property_location": "0000 1038A PINE ST 0000",
            "current_sales_date": "2004-06-01T00:00:00.000",
            "property_class_code_definition": "Dwelling",
            "use_definition": "Single Family Residential",
            "assessor_neighborhood": "Nob Hill",
            "number_of_units": "1",
            "some_other_column": 42
        }))
        .unwrap();

        assert_eq!(
            record.property_location.as_deref(),
            Some("0000 1038A PINE ST 0000")
        );
        assert_eq!(record.classification(), "Dwelling");
        assert_eq!(record.unit_count(), 1);
    }

    #[test]
    fn reads_string_units() {
        assert_eq!(with_units(serde_json::json!("4")).unit_count(), 4);
        assert_eq!(with_units(serde_json::json!("  12")).unit_count(), 12);
        assert_eq!(with_units(serde_json::json!("3.0")).unit_count(), 3);
        assert_eq!(with_units(serde_json::json!("7 units")).unit_count(), 7);
    }

    #[test]
    fn reads_numeric_units() {
        assert_eq!(with_units(serde_json::json!(6)).unit_count(), 6);
        assert_eq!(with_units(serde_json::json!(2.9)).unit_count(), 2);
    }

    #[test]
    fn defaults_invalid_units() {
        assert_eq!(with_units(serde_json::json!("abc")).unit_count(), 1);
        assert_eq!(with_units(serde_json::json!("")).unit_count(), 1);
        assert_eq!(with_units(serde_json::json!("0")).unit_count(), 1);
        assert_eq!(with_units(serde_json::json!("-3")).unit_count(), 1);
        assert_eq!(with_units(serde_json::json!(0)).unit_count(), 1);
        assert_eq!(with_units(serde_json::json!(-2)).unit_count(), 1);
        assert_eq!(with_units(serde_json::json!(0.5)).unit_count(), 1);
        assert_eq!(PropertyRecord::default().unit_count(), 1);
    }

    #[test]
    fn declared_units_distinguishes_missing() {
        assert_eq!(PropertyRecord::default().declared_units(), None);
        assert_eq!(with_units(serde_json::json!("0")).declared_units(), None);
        assert_eq!(with_units(serde_json::json!("2")).declared_units(), Some(2));
    }

    #[test]
    fn defaults_non_numeric_json_units() {
        assert_eq!(with_units(serde_json::json!(true)).unit_count(), 1);
        assert_eq!(with_units(serde_json::json!({"value": 3})).unit_count(), 1);
        assert_eq!(with_units(serde_json::json!([2])).declared_units(), None);
    }

    #[test]
    fn tolerates_mixed_types_in_unused_columns() {
        let records: Vec<PropertyRecord> = serde_json::from_value(serde_json::json!([
            {"parcel_number": 275004, "property_location": "0000 0123 PINE ST 0000",
             "year_property_built": 1925, "number_of_stories": 2, "number_of_units": true,
             "assessor_neighborhood": null, "use_definition": {"code": "SRES"}},
            {"property_location": "0000 0125 PINE ST 0000", "year_property_built": "1930",
             "number_of_stories": "3", "number_of_units": "2"}
        ]))
        .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].parcel_number.as_deref(), Some("275004"));
        assert_eq!(records[0].assessor_neighborhood, None);
        assert_eq!(records[0].use_definition, None);
        assert_eq!(records[0].unit_count(), 1);
        assert_eq!(records[1].unit_count(), 2);
    }

    #[test]
    fn saturates_overlong_units() {
        assert_eq!(
            with_units(serde_json::json!("99999999999999")).unit_count(),
            u32::MAX
        );
    }
}
