//! Recency + magnitude filtering.
//!
//! Records with an unknown timestamp or unknown Mw never pass: their age or
//! size cannot be checked against the criteria.

use chrono::{DateTime, Duration, Utc};

use crate::domain::{EarthquakeRecord, FilterCriteria};

/// Earliest timestamp admitted for the given reference time.
///
/// Windows reaching past the representable range admit everything.
pub fn cutoff(criteria: &FilterCriteria, now: DateTime<Utc>) -> DateTime<Utc> {
    now.checked_sub_signed(Duration::days(i64::from(criteria.lookback_days)))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Whether one record satisfies both criteria against a precomputed cutoff.
pub fn matches(record: &EarthquakeRecord, criteria: &FilterCriteria, cutoff: DateTime<Utc>) -> bool {
    let recent = record.occurred_at.is_some_and(|t| t >= cutoff);
    let strong_enough = record
        .magnitude_mw
        .is_some_and(|mw| mw >= criteria.min_magnitude);
    recent && strong_enough
}

/// Keep the records within the lookback window and at/above the minimum Mw.
///
/// `now` is taken once by the caller so the whole batch shares one cutoff.
pub fn filter_records(
    records: Vec<EarthquakeRecord>,
    criteria: &FilterCriteria,
    now: DateTime<Utc>,
) -> Vec<EarthquakeRecord> {
    let cutoff = cutoff(criteria, now);
    records
        .into_iter()
        .filter(|r| matches(r, criteria, cutoff))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 21, 12, 0, 0).unwrap()
    }

    fn record(age_days: Option<i64>, mw: Option<f64>) -> EarthquakeRecord {
        EarthquakeRecord {
            occurred_at: age_days.map(|d| now() - Duration::days(d)),
            date_text: String::new(),
            time_text: String::new(),
            latitude: 39.0,
            longitude: 35.0,
            depth_km: None,
            md: None,
            ml: None,
            magnitude_mw: mw,
            place: None,
        }
    }

    #[test]
    fn lookback_window_excludes_older_records() {
        let criteria = FilterCriteria::new(7, 1.0).unwrap();
        let kept = filter_records(
            vec![record(Some(8), Some(3.0)), record(Some(6), Some(3.0))],
            &criteria,
            now(),
        );
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].occurred_at, Some(now() - Duration::days(6)));
    }

    #[test]
    fn cutoff_is_inclusive() {
        let criteria = FilterCriteria::new(7, 0.0).unwrap();
        assert!(matches(&record(Some(7), Some(1.0)), &criteria, cutoff(&criteria, now())));
    }

    #[test]
    fn unknown_magnitude_never_passes() {
        let criteria = FilterCriteria::new(30, 0.0).unwrap();
        let kept = filter_records(vec![record(Some(1), None)], &criteria, now());
        assert!(kept.is_empty());

        let criteria = FilterCriteria::new(30, -10.0).unwrap();
        let kept = filter_records(vec![record(Some(1), None)], &criteria, now());
        assert!(kept.is_empty());
    }

    #[test]
    fn huge_window_does_not_overflow() {
        let criteria = FilterCriteria::new(u32::MAX, 0.0).unwrap();
        assert_eq!(cutoff(&criteria, now()), DateTime::<Utc>::MIN_UTC);
        assert_eq!(filter_records(vec![record(Some(4000), Some(1.0))], &criteria, now()).len(), 1);
    }

    #[test]
    fn unknown_timestamp_never_passes() {
        let criteria = FilterCriteria::new(3650, 0.0).unwrap();
        assert!(filter_records(vec![record(None, Some(6.0))], &criteria, now()).is_empty());
    }

    #[test]
    fn magnitude_threshold_is_inclusive() {
        let criteria = FilterCriteria::new(7, 4.2).unwrap();
        let kept = filter_records(
            vec![record(Some(1), Some(4.2)), record(Some(1), Some(4.1))],
            &criteria,
            now(),
        );
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].magnitude_mw, Some(4.2));
    }
}
