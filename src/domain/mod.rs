//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - raw and normalized catalog records (`RawRecordTuple`, `EarthquakeRecord`)
//! - filter inputs (`FilterCriteria`) and run configuration (`MapConfig`)
//! - severity tiers (`SeverityTier`, `ClassifiedRecord`)

pub mod types;

pub use types::*;
