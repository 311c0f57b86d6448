//! Reporting utilities: per-tier counts and formatted terminal output.

use std::collections::BTreeMap;

use crate::domain::{ClassifiedRecord, SeverityTier};

pub mod format;

pub use format::*;

/// Count records per severity tier; every tier is present, possibly with 0.
pub fn tier_counts(records: &[ClassifiedRecord]) -> BTreeMap<SeverityTier, usize> {
    let mut counts: BTreeMap<SeverityTier, usize> =
        SeverityTier::ALL.iter().map(|t| (*t, 0)).collect();
    for r in records {
        *counts.entry(r.tier).or_default() += 1;
    }
    counts
}
