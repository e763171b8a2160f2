#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Property classification taxonomy and candy score breakdown types.
//!
//! Assessor classification strings (`"Dwelling"`, `"Flats & Duplex"`,
//! `"Apartment 15 units or more"`, ...) are grouped into a small
//! [`PropertyClass`] taxonomy by the scoring rules. A [`ScoreBreakdown`]
//! records every factor that went into one property's score.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Building classification groups, ordered from best to worst for
/// door-to-door visiting.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PropertyClass {
    /// A single detached dwelling
    SingleFamily,
    /// Flats, duplexes, two dwellings on one parcel
    SmallMultiFamily,
    /// Apartments or flat-and-store buildings of 4 units or less
    SmallApartment,
    /// Condominiums and live/work units
    Condominium,
    /// Apartments or flat-and-store buildings of 5 to 14 units
    MidApartment,
    /// Apartments of 15 units or more
    LargeApartment,
    /// Anything not matched by a classification rule
    Other,
}

impl PropertyClass {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::SingleFamily,
            Self::SmallMultiFamily,
            Self::SmallApartment,
            Self::Condominium,
            Self::MidApartment,
            Self::LargeApartment,
            Self::Other,
        ]
    }
}

/// How a property's sale date contributed to its score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SaleAge {
    /// No sale date on record.
    Missing,
    /// A sale date was present but could not be read.
    Unreadable,
    /// Years between the sale and the reference year.
    Years {
        /// Reference year minus sale year (negative for future dates).
        years: i32,
    },
}

/// Every contribution to one property's candy score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Base score applied to every property.
    pub base: i32,
    /// Sale recency as read from the record.
    pub sale_age: SaleAge,
    /// Age factor adjustment.
    pub age: i32,
    /// Classification group of the first matching rule.
    pub class: PropertyClass,
    /// Classification adjustment.
    pub class_adjustment: i32,
    /// Unit count used for the density penalty.
    pub units: u32,
    /// Density penalty (zero or negative).
    pub density: i32,
    /// Sum of all contributions before clamping.
    pub raw: i32,
    /// Final score, `raw` clamped to a minimum of zero.
    pub score: u32,
}
