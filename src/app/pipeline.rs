//! Shared "catalog → map" pipeline logic used by both CLI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! fetch -> parse -> normalize -> filter -> classify -> build -> write
//!
//! The `map` and `form` commands then only differ in how they collect criteria.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::data::{CatalogSource, FileCatalog, KoeriClient};
use crate::domain::{ClassifiedRecord, FilterCriteria, MapConfig};
use crate::error::PipelineError;
use crate::filter;
use crate::io::export::{write_artifact_json, write_records_csv};
use crate::io::normalize::{FieldIssue, normalize_rows};
use crate::io::parse::parse_catalog;
use crate::map::{MapArtifact, build_artifact, render_html};
use crate::severity::classify_records;

/// Counters and context gathered along the way, for the run summary.
#[derive(Debug, Clone)]
pub struct RunStats {
    pub source: String,
    pub header_line: usize,
    pub rows_read: usize,
    pub records_parsed: usize,
    pub rows_discarded: usize,
    pub field_issues: Vec<FieldIssue>,
    pub criteria: FilterCriteria,
    pub now: DateTime<Utc>,
    pub cutoff: DateTime<Utc>,
}

/// All computed outputs of a single run, before anything is written.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub stats: RunStats,
    pub records: Vec<ClassifiedRecord>,
    /// `None` when no record matched the criteria.
    pub artifact: Option<MapArtifact>,
}

/// Terminal outcome of a successful run. Failures are `Err(PipelineError)`.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    /// The map document was written to `path`.
    Rendered {
        path: PathBuf,
        stats: RunStats,
        records: Vec<ClassifiedRecord>,
    },
    /// Nothing matched; no file was written.
    Empty { stats: RunStats },
}

impl RunOutcome {
    pub fn stats(&self) -> &RunStats {
        match self {
            RunOutcome::Rendered { stats, .. } | RunOutcome::Empty { stats } => stats,
        }
    }
}

/// Execute the full pipeline against the configured catalog source.
pub fn run_map(config: &MapConfig) -> Result<RunOutcome, PipelineError> {
    let source: Box<dyn CatalogSource> = match &config.input {
        Some(path) => Box::new(FileCatalog::new(path)),
        None => Box::new(KoeriClient::from_env(Duration::from_secs(config.timeout_secs))?),
    };
    run_map_with_source(config, source.as_ref())
}

/// Execute the pipeline with an explicit source.
pub fn run_map_with_source(
    config: &MapConfig,
    source: &dyn CatalogSource,
) -> Result<RunOutcome, PipelineError> {
    let origin = source.describe();
    log::info!("Fetching earthquake catalog from {origin}");
    let text = source.fetch_catalog()?;
    log::debug!("Catalog body: {} bytes", text.len());

    run_map_with_catalog(config, &origin, &text, Utc::now())
}

/// Execute the pipeline with pre-fetched catalog text and a fixed reference time.
///
/// Writes the map document (and any exports) only when at least one record matched.
pub fn run_map_with_catalog(
    config: &MapConfig,
    origin: &str,
    text: &str,
    now: DateTime<Utc>,
) -> Result<RunOutcome, PipelineError> {
    let RunOutput {
        stats,
        records,
        artifact,
    } = build_output(origin, text, &config.criteria, now)?;

    let Some(artifact) = artifact else {
        log::info!("No earthquakes matched the criteria; nothing written");
        return Ok(RunOutcome::Empty { stats });
    };

    write_artifact(&config.output, &artifact)?;
    let path = std::path::absolute(&config.output).unwrap_or_else(|_| config.output.clone());
    log::info!("Map written to {}", path.display());

    if let Some(csv_path) = &config.export_csv {
        write_records_csv(csv_path, &records)?;
        log::info!("Records exported to {}", csv_path.display());
    }
    if let Some(json_path) = &config.export_json {
        write_artifact_json(json_path, &artifact)?;
        log::info!("Map model exported to {}", json_path.display());
    }

    Ok(RunOutcome::Rendered {
        path,
        stats,
        records,
    })
}

/// Parse, normalize, filter, classify and build, without any I/O.
pub fn build_output(
    origin: &str,
    text: &str,
    criteria: &FilterCriteria,
    now: DateTime<Utc>,
) -> Result<RunOutput, PipelineError> {
    let rows = parse_catalog(text)?;
    let header_line = rows.header_line();
    log::debug!("Catalog header found on line {header_line}");

    let normalized = normalize_rows(rows);
    for issue in &normalized.issues {
        log::debug!(
            "line {}: unparseable {:?} value '{}'",
            issue.line,
            issue.field,
            issue.value
        );
    }
    log::info!(
        "Read {} rows: {} records, {} discarded, {} field issues",
        normalized.rows_read,
        normalized.records.len(),
        normalized.rows_discarded,
        normalized.issues.len()
    );

    let records_parsed = normalized.records.len();
    let cutoff = filter::cutoff(criteria, now);
    let matched = filter::filter_records(normalized.records, criteria, now);
    log::info!(
        "{} of {records_parsed} records since {} with Mw >= {}",
        matched.len(),
        cutoff.format("%Y-%m-%d %H:%M:%S UTC"),
        criteria.min_magnitude
    );

    let records = classify_records(matched);
    let artifact = (!records.is_empty()).then(|| build_artifact(&records));

    Ok(RunOutput {
        stats: RunStats {
            source: origin.to_string(),
            header_line,
            rows_read: normalized.rows_read,
            records_parsed,
            rows_discarded: normalized.rows_discarded,
            field_issues: normalized.issues,
            criteria: *criteria,
            now,
            cutoff,
        },
        records,
        artifact,
    })
}

/// Render the artifact and write it to `path`, replacing any previous file.
pub fn write_artifact(path: &Path, artifact: &MapArtifact) -> Result<(), PipelineError> {
    let html = render_html(artifact)?;
    std::fs::write(path, html).map_err(|e| {
        PipelineError::Output(format!("Failed to write map '{}': {e}", path.display()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SeverityTier;
    use crate::io::parse::{TEST_HEADER, format_row};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 21, 12, 0, 0).unwrap()
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("koeri_pipeline_{}_{name}", std::process::id()))
    }

    fn config(days: u32, min_mw: f64, output: PathBuf) -> MapConfig {
        MapConfig {
            criteria: FilterCriteria::new(days, min_mw).unwrap(),
            output,
            input: None,
            timeout_secs: 20,
            export_csv: None,
            export_json: None,
        }
    }

    fn catalog(rows: &[String]) -> String {
        let mut text = format!("<pre>\n{TEST_HEADER}\n---------- --------  ---------  ---------\n");
        for row in rows {
            text.push_str(row);
            text.push('\n');
        }
        text.push_str("</pre>\n");
        text
    }

    struct StaticSource(&'static str);

    impl CatalogSource for StaticSource {
        fn describe(&self) -> String {
            "static".to_string()
        }

        fn fetch_catalog(&self) -> Result<String, PipelineError> {
            Ok(self.0.to_string())
        }
    }

    struct FailingSource;

    impl CatalogSource for FailingSource {
        fn describe(&self) -> String {
            "failing".to_string()
        }

        fn fetch_catalog(&self) -> Result<String, PipelineError> {
            Err(PipelineError::Ingestion("timed out".to_string()))
        }
    }

    #[test]
    fn single_row_produces_one_moderate_marker() {
        let text = catalog(&[format_row(
            "2025.10.19", "08:15:00", "39.50", "35.10", "10.0", "-.-", "4.0", "4.2", "Test",
        )]);
        let output = build_output("test", &text, &FilterCriteria::new(30, 0.0).unwrap(), now()).unwrap();

        let artifact = output.artifact.expect("one record should match");
        assert_eq!(artifact.markers().len(), 1);
        let marker = &artifact.markers()[0];
        assert_eq!(marker.position.lat, 39.50);
        assert_eq!(marker.position.lon, 35.10);
        assert_eq!(marker.tier, SeverityTier::Moderate);
        assert_eq!(marker.fill_color, "orange");
        assert!(marker.popup.contains("Location: Test"));
        assert_eq!(output.stats.header_line, 2);
        assert_eq!(output.stats.records_parsed, 1);
        // separator + data row + closing tag
        assert_eq!(output.stats.rows_read, 3);
        assert_eq!(output.stats.rows_discarded, 2);
    }

    #[test]
    fn rows_without_coordinates_never_reach_the_map() {
        let text = catalog(&[
            format_row("2025.10.20", "01:00:00", "", "35.10", "5.0", "", "", "5.1", "NO LAT"),
            format_row("2025.10.20", "02:00:00", "39.10", "xx", "5.0", "", "", "5.1", "BAD LON"),
            format_row("2025.10.20", "03:00:00", "38.00", "27.00", "5.0", "", "", "5.1", "OK"),
        ]);
        let output = build_output("test", &text, &FilterCriteria::new(7, 0.0).unwrap(), now()).unwrap();

        let artifact = output.artifact.unwrap();
        assert_eq!(artifact.markers().len(), 1);
        assert!(artifact.markers()[0].popup.contains("Location: OK"));
        assert!(output.records.iter().all(|r| r.record.place.as_deref() == Some("OK")));
    }

    #[test]
    fn missing_header_fails_the_run() {
        let err = build_output("test", "<html>maintenance</html>", &FilterCriteria::new(7, 0.0).unwrap(), now())
            .unwrap_err();
        assert_eq!(err, PipelineError::HeaderNotFound);
    }

    #[test]
    fn empty_result_is_not_an_error_and_writes_nothing() {
        let output = temp_path("empty.html");
        std::fs::remove_file(&output).ok();
        let text = catalog(&[format_row(
            "2025.10.01", "08:15:00", "39.50", "35.10", "10.0", "", "", "4.2", "OLD",
        )]);

        let outcome = run_map_with_catalog(&config(7, 0.0, output.clone()), "test", &text, now()).unwrap();

        assert!(matches!(outcome, RunOutcome::Empty { .. }));
        assert_eq!(outcome.stats().records_parsed, 1);
        assert!(!output.exists());
    }

    #[test]
    fn rendered_run_writes_map_and_exports() {
        let output = temp_path("rendered.html");
        let csv_path = temp_path("rendered.csv");
        let json_path = temp_path("rendered.json");
        let mut cfg = config(7, 3.0, output.clone());
        cfg.export_csv = Some(csv_path.clone());
        cfg.export_json = Some(json_path.clone());

        let text = catalog(&[
            format_row("2025.10.20", "01:00:00", "39.50", "35.10", "7.0", "", "", "5.4", "A"),
            format_row("2025.10.20", "02:00:00", "38.50", "27.10", "7.0", "", "", "2.1", "B"),
        ]);
        let outcome = run_map_with_catalog(&cfg, "test", &text, now()).unwrap();

        let RunOutcome::Rendered { path, records, .. } = outcome else {
            panic!("expected a rendered outcome");
        };
        assert!(path.is_absolute());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].tier, SeverityTier::High);

        let html = std::fs::read_to_string(&output).unwrap();
        assert!(html.contains("\"fill_color\":\"red\""));
        assert!(csv_path.exists());
        assert!(json_path.exists());

        for p in [&output, &csv_path, &json_path] {
            std::fs::remove_file(p).ok();
        }
    }

    #[test]
    fn legend_is_identical_across_different_results() {
        let a = catalog(&[format_row("2025.10.20", "01:00:00", "39.5", "35.1", "7.0", "", "", "1.0", "A")]);
        let b = catalog(&[
            format_row("2025.10.20", "01:00:00", "39.5", "35.1", "7.0", "", "", "6.0", "B"),
            format_row("2025.10.20", "02:00:00", "38.5", "27.1", "7.0", "", "", "3.5", "C"),
        ]);
        let criteria = FilterCriteria::new(7, 0.0).unwrap();
        let a = build_output("a", &a, &criteria, now()).unwrap().artifact.unwrap();
        let b = build_output("b", &b, &criteria, now()).unwrap().artifact.unwrap();

        assert_ne!(a.markers().len(), b.markers().len());
        assert_eq!(a.legend, b.legend);
        assert_eq!(
            crate::map::render_legend(&a.legend),
            crate::map::render_legend(&b.legend)
        );
    }

    #[test]
    fn source_failures_propagate() {
        let cfg = config(7, 0.0, temp_path("never.html"));
        let err = run_map_with_source(&cfg, &FailingSource).unwrap_err();
        assert_eq!(err, PipelineError::Ingestion("timed out".to_string()));
        assert!(!temp_path("never.html").exists());
    }

    #[test]
    fn run_with_source_uses_fetched_text() {
        // The fixed rows are far in the past relative to the wall clock.
        let cfg = config(1, 0.0, temp_path("static.html"));
        let source = StaticSource(
            "Tarih      Saat\n2001.01.01 00:00:00   39.5000    35.1000     5.0  -.-  2.0  3.0   OLD\n",
        );
        let outcome = run_map_with_source(&cfg, &source).unwrap();
        assert!(matches!(outcome, RunOutcome::Empty { .. }));
        assert_eq!(outcome.stats().source, "static");
    }
}
