//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - passed stage to stage within one pipeline run
//! - exported to CSV/JSON alongside the map document

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// Positional fields sliced out of one catalog line.
///
/// Fields are kept untrimmed; any of them may be empty when the line is short.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecordTuple {
    /// 1-based line number in the catalog text.
    pub line: usize,
    pub date: String,
    pub time: String,
    pub lat: String,
    pub lon: String,
    pub depth: String,
    pub md: String,
    pub ml: String,
    pub mw: String,
    pub place: String,
}

/// A single normalized observation.
///
/// Latitude and longitude are always known; everything else may be absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarthquakeRecord {
    /// Combined date + time, or `None` when either part failed to parse.
    pub occurred_at: Option<DateTime<Utc>>,
    /// Date text as it appeared in the catalog (trimmed).
    pub date_text: String,
    /// Time text as it appeared in the catalog (trimmed).
    pub time_text: String,
    pub latitude: f64,
    pub longitude: f64,
    pub depth_km: Option<f64>,
    /// Duration magnitude; informational only.
    pub md: Option<String>,
    /// Local magnitude; informational only.
    pub ml: Option<String>,
    /// Moment magnitude, the one used for filtering and classification.
    pub magnitude_mw: Option<f64>,
    pub place: Option<String>,
}

/// Recency + magnitude thresholds supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub lookback_days: u32,
    pub min_magnitude: f64,
}

impl FilterCriteria {
    /// Validate and build criteria.
    ///
    /// `lookback_days` must be positive and `min_magnitude` finite.
    pub fn new(lookback_days: u32, min_magnitude: f64) -> Result<Self, PipelineError> {
        if lookback_days == 0 {
            return Err(PipelineError::InvalidCriteria(
                "lookback days must be greater than 0".to_string(),
            ));
        }
        if !min_magnitude.is_finite() {
            return Err(PipelineError::InvalidCriteria(format!(
                "minimum magnitude must be a finite number (got {min_magnitude})"
            )));
        }
        Ok(Self {
            lookback_days,
            min_magnitude,
        })
    }
}

/// Discrete severity classification of a magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityTier {
    Unknown,
    Low,
    Moderate,
    High,
}

impl SeverityTier {
    pub const ALL: [SeverityTier; 4] = [
        SeverityTier::Unknown,
        SeverityTier::Low,
        SeverityTier::Moderate,
        SeverityTier::High,
    ];

    /// CSS color token used for the marker fill and the legend swatch.
    pub fn color(self) -> &'static str {
        match self {
            SeverityTier::Unknown => "gray",
            SeverityTier::Low => "green",
            SeverityTier::Moderate => "orange",
            SeverityTier::High => "red",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            SeverityTier::Unknown => "Unknown",
            SeverityTier::Low => "Low",
            SeverityTier::Moderate => "Moderate",
            SeverityTier::High => "High",
        }
    }
}

/// A filtered record paired with its classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedRecord {
    pub record: EarthquakeRecord,
    pub tier: SeverityTier,
}

/// Resolved configuration for a single run.
#[derive(Debug, Clone)]
pub struct MapConfig {
    pub criteria: FilterCriteria,
    /// Map document destination; overwritten on every run.
    pub output: PathBuf,
    /// Read the catalog from this file instead of fetching it.
    pub input: Option<PathBuf>,
    /// Bounded wait for the HTTP fetch.
    pub timeout_secs: u64,
    pub export_csv: Option<PathBuf>,
    pub export_json: Option<PathBuf>,
}
