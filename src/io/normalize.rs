//! Record normalization.
//!
//! Turns raw positional fields into typed `EarthquakeRecord`s.
//!
//! Policy:
//! - a bad depth, magnitude or timestamp becomes "unknown" and is reported as a `FieldIssue`
//! - a bad latitude or longitude discards the row (it cannot be placed on a map)
//! - nothing here is fatal; one garbled line never aborts the batch

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;

use crate::domain::{EarthquakeRecord, RawRecordTuple};

/// Date-time layouts accepted for `date + " " + time`.
///
/// The catalog itself uses `YYYY.MM.DD HH:MM:SS`; the others cover mirrors and
/// hand-edited copies.
const DATETIME_FMTS: [&str; 4] = [
    "%Y.%m.%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%d.%m.%Y %H:%M:%S",
];

/// Which field of a row failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Timestamp,
    Latitude,
    Longitude,
    Depth,
    Magnitude,
}

/// A per-field parse problem. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub line: usize,
    pub field: Field,
    pub value: String,
}

/// Result of normalizing one raw row.
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized {
    Record(EarthquakeRecord),
    /// Latitude/longitude missing or invalid.
    Discarded,
}

/// Normalization output for a whole catalog.
#[derive(Debug, Clone, Default)]
pub struct NormalizedCatalog {
    pub records: Vec<EarthquakeRecord>,
    pub issues: Vec<FieldIssue>,
    pub rows_read: usize,
    pub rows_discarded: usize,
}

/// Normalize every row, collecting records and issues.
pub fn normalize_rows(rows: impl IntoIterator<Item = RawRecordTuple>) -> NormalizedCatalog {
    let mut out = NormalizedCatalog::default();

    for row in rows {
        out.rows_read += 1;
        match normalize_row(&row, &mut out.issues) {
            Normalized::Record(record) => out.records.push(record),
            Normalized::Discarded => out.rows_discarded += 1,
        }
    }

    out
}

/// Normalize a single row, appending any field issues to `issues`.
pub fn normalize_row(row: &RawRecordTuple, issues: &mut Vec<FieldIssue>) -> Normalized {
    let lat = parse_field(row.line, Field::Latitude, &row.lat, issues)
        .filter(|v| (-90.0..=90.0).contains(v));
    let lon = parse_field(row.line, Field::Longitude, &row.lon, issues)
        .filter(|v| (-180.0..=180.0).contains(v));

    let (Some(latitude), Some(longitude)) = (lat, lon) else {
        return Normalized::Discarded;
    };

    let date_text = row.date.trim().to_string();
    let time_text = row.time.trim().to_string();
    let occurred_at = parse_timestamp(&date_text, &time_text);
    if occurred_at.is_none() {
        issues.push(FieldIssue {
            line: row.line,
            field: Field::Timestamp,
            value: format!("{date_text} {time_text}"),
        });
    }

    Normalized::Record(EarthquakeRecord {
        occurred_at,
        date_text,
        time_text,
        latitude,
        longitude,
        depth_km: parse_field(row.line, Field::Depth, &row.depth, issues),
        md: non_empty(&row.md),
        ml: non_empty(&row.ml),
        magnitude_mw: parse_field(row.line, Field::Magnitude, &row.mw, issues),
        place: non_empty(&row.place),
    })
}

/// Parse `date + " " + time` as a UTC timestamp.
pub fn parse_timestamp(date: &str, time: &str) -> Option<DateTime<Utc>> {
    let combined = format!("{} {}", date.trim(), time.trim());
    DATETIME_FMTS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(&combined, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Parse a decimal number written with `.` as separator.
///
/// Empty cells and placeholders such as `-.-` yield `None`, as do `NaN`/`inf`.
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let v = trimmed.parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}

fn parse_field(line: usize, field: Field, raw: &str, issues: &mut Vec<FieldIssue>) -> Option<f64> {
    let parsed = parse_number(raw);
    // Blank cells are simply absent; only garbled text is worth reporting.
    if parsed.is_none() && !raw.trim().is_empty() {
        issues.push(FieldIssue {
            line,
            field,
            value: raw.trim().to_string(),
        });
    }
    parsed
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
