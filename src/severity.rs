//! Magnitude → severity tier classification.
//!
//! Tiers come from an ordered threshold table rather than branching, so adding
//! a tier means adding a row.

use crate::domain::{ClassifiedRecord, EarthquakeRecord, SeverityTier};

/// Ordered `(lower bound, tier)` rules, highest first.
///
/// A magnitude takes the tier of the first rule whose bound it reaches, so each
/// band is inclusive at the bottom and exclusive at the top.
pub const SEVERITY_RULES: [(f64, SeverityTier); 3] = [
    (5.0, SeverityTier::High),
    (3.0, SeverityTier::Moderate),
    (f64::NEG_INFINITY, SeverityTier::Low),
];

/// Marker radius for a zero-magnitude event.
pub const BASE_RADIUS: f64 = 2.0;

/// Radius added per unit of Mw.
pub const RADIUS_PER_MAGNITUDE: f64 = 1.0;

/// Stand-in magnitude used only to size markers whose Mw is unknown.
///
/// The filter already drops unknown magnitudes, so today this only applies to
/// artifacts built from unfiltered records. It is never shown as a magnitude.
pub const UNKNOWN_MAGNITUDE_SIZE: f64 = 2.0;

/// Classify a (possibly unknown) magnitude.
pub fn classify(magnitude: Option<f64>) -> SeverityTier {
    let Some(mw) = magnitude.filter(|v| v.is_finite()) else {
        return SeverityTier::Unknown;
    };
    SEVERITY_RULES
        .iter()
        .find(|(bound, _)| mw >= *bound)
        .map(|(_, tier)| *tier)
        .unwrap_or(SeverityTier::Unknown)
}

/// Circle radius for a (possibly unknown) magnitude.
pub fn marker_radius(magnitude: Option<f64>) -> f64 {
    let mw = magnitude
        .filter(|v| v.is_finite())
        .unwrap_or(UNKNOWN_MAGNITUDE_SIZE);
    BASE_RADIUS + RADIUS_PER_MAGNITUDE * mw.max(0.0)
}

/// Pair each record with its tier.
pub fn classify_records(records: Vec<EarthquakeRecord>) -> Vec<ClassifiedRecord> {
    records
        .into_iter()
        .map(|record| ClassifiedRecord {
            tier: classify(record.magnitude_mw),
            record,
        })
        .collect()
}
