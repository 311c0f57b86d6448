//! Export matched records (CSV) and the map document model (JSON).
//!
//! The CSV is meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::path::Path;

use serde::Serialize;

use crate::domain::{ClassifiedRecord, SeverityTier};
use crate::error::PipelineError;
use crate::map::MapArtifact;

#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    occurred_at: String,
    date: &'a str,
    time: &'a str,
    latitude: f64,
    longitude: f64,
    depth_km: Option<f64>,
    md: Option<&'a str>,
    ml: Option<&'a str>,
    mw: Option<f64>,
    tier: SeverityTier,
    place: Option<&'a str>,
}

/// Write one CSV row per classified record.
pub fn write_records_csv(path: &Path, records: &[ClassifiedRecord]) -> Result<(), PipelineError> {
    let file = File::create(path).map_err(|e| {
        PipelineError::Output(format!("Failed to create export CSV '{}': {e}", path.display()))
    })?;
    let mut writer = csv::Writer::from_writer(file);

    for c in records {
        let r = &c.record;
        writer
            .serialize(ExportRow {
                occurred_at: r.occurred_at.map(|t| t.to_rfc3339()).unwrap_or_default(),
                date: &r.date_text,
                time: &r.time_text,
                latitude: r.latitude,
                longitude: r.longitude,
                depth_km: r.depth_km,
                md: r.md.as_deref(),
                ml: r.ml.as_deref(),
                mw: r.magnitude_mw,
                tier: c.tier,
                place: r.place.as_deref(),
            })
            .map_err(|e| PipelineError::Output(format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| PipelineError::Output(format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}

/// Write the artifact model as pretty-printed JSON.
pub fn write_artifact_json(path: &Path, artifact: &MapArtifact) -> Result<(), PipelineError> {
    let file = File::create(path).map_err(|e| {
        PipelineError::Output(format!("Failed to create export JSON '{}': {e}", path.display()))
    })?;
    serde_json::to_writer_pretty(file, artifact)
        .map_err(|e| PipelineError::Output(format!("Failed to write export JSON: {e}")))?;
    Ok(())
}
