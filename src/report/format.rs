//! Formatted terminal output for a finished run.
//!
//! We keep formatting code in one place so the pipeline stays free of
//! presentation concerns and output changes are localized.

use crate::app::pipeline::{RunOutcome, RunStats};
use crate::domain::{ClassifiedRecord, SeverityTier};
use crate::report::tier_counts;

/// Format the full run summary (ingest stats + filter + result).
pub fn format_run_summary(outcome: &RunOutcome) -> String {
    let mut out = String::new();
    out.push_str("=== quake - KOERI earthquake map ===\n");
    out.push_str(&format_stats(outcome.stats()));

    match outcome {
        RunOutcome::Rendered { path, records, .. } => {
            out.push_str(&format!("Matched: {}\n", records.len()));
            out.push_str(&format_tier_counts(records));
            out.push_str(&format!("\nMap saved to: {}\n", path.display()));
        }
        RunOutcome::Empty { .. } => {
            out.push_str("Matched: 0\n");
            out.push_str("\nNo earthquakes matched the criteria; no map was written.\n");
        }
    }

    out
}

fn format_stats(stats: &RunStats) -> String {
    let mut out = String::new();
    out.push_str(&format!("Source: {}\n", stats.source));
    out.push_str(&format!(
        "Rows: read={} | records={} | discarded={} | field issues={}\n",
        stats.rows_read,
        stats.records_parsed,
        stats.rows_discarded,
        stats.field_issues.len()
    ));
    out.push_str(&format!(
        "Filter: last {} day(s) (since {}) | Mw >= {:.1}\n",
        stats.criteria.lookback_days,
        stats.cutoff.format("%Y-%m-%d %H:%M:%S UTC"),
        stats.criteria.min_magnitude
    ));
    out
}

/// One line per tier, skipping `Unknown` when empty.
pub fn format_tier_counts(records: &[ClassifiedRecord]) -> String {
    let mut out = String::from("By severity:\n");
    for (tier, count) in tier_counts(records) {
        if tier == SeverityTier::Unknown && count == 0 {
            continue;
        }
        out.push_str(&format!(
            "  {:<9} {:>4}  ({})\n",
            tier.display_name(),
            count,
            tier.color()
        ));
    }
    out
}
