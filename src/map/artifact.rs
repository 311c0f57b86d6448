//! Map document model and builder.
//!
//! The builder is pure: it turns classified records into a `MapArtifact` and
//! leaves serialization and file I/O to `map::html` and the pipeline.

use serde::Serialize;

use crate::domain::{ClassifiedRecord, EarthquakeRecord, SeverityTier};
use crate::severity::marker_radius;

/// Placeholder for absent popup values.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Marker outline color, shared by every tier.
pub const STROKE_COLOR: &str = "black";

pub const FILL_OPACITY: f64 = 0.7;

/// Fixed starting view centered on Türkiye.
pub const DEFAULT_VIEW: BaseView = BaseView {
    center: LatLon { lat: 39.0, lon: 35.0 },
    zoom: 6,
};

/// Static legend; it does not depend on which tiers are present.
pub const LEGEND: Legend = Legend {
    title: "Magnitude (Mw)",
    entries: &[
        LegendEntry {
            tier: SeverityTier::Low,
            color: "green",
            label: "< 3.0",
        },
        LegendEntry {
            tier: SeverityTier::Moderate,
            color: "orange",
            label: "3.0 - 4.9",
        },
        LegendEntry {
            tier: SeverityTier::High,
            color: "red",
            label: ">= 5.0",
        },
    ],
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BaseView {
    pub center: LatLon,
    pub zoom: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub position: LatLon,
    pub radius: f64,
    pub fill_color: &'static str,
    pub stroke_color: &'static str,
    pub fill_opacity: f64,
    pub popup: String,
    pub tier: SeverityTier,
}

/// Groups nearby markers at low zoom. Membership is exactly the input record set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MarkerCluster {
    pub markers: Vec<Marker>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LegendEntry {
    pub tier: SeverityTier,
    pub color: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Legend {
    pub title: &'static str,
    pub entries: &'static [LegendEntry],
}

/// Render-ready map document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapArtifact {
    pub view: BaseView,
    pub cluster: MarkerCluster,
    pub legend: Legend,
}

impl MapArtifact {
    pub fn markers(&self) -> &[Marker] {
        &self.cluster.markers
    }
}

/// Build the artifact: one marker per record, in input order.
pub fn build_artifact(records: &[ClassifiedRecord]) -> MapArtifact {
    let markers = records.iter().map(build_marker).collect();
    MapArtifact {
        view: DEFAULT_VIEW,
        cluster: MarkerCluster { markers },
        legend: LEGEND,
    }
}

fn build_marker(classified: &ClassifiedRecord) -> Marker {
    let record = &classified.record;
    Marker {
        position: LatLon {
            lat: record.latitude,
            lon: record.longitude,
        },
        radius: marker_radius(record.magnitude_mw),
        fill_color: classified.tier.color(),
        stroke_color: STROKE_COLOR,
        fill_opacity: FILL_OPACITY,
        popup: popup_text(record),
        tier: classified.tier,
    }
}

/// Popup body: date/time, place, magnitude, depth (one per line).
pub fn popup_text(record: &EarthquakeRecord) -> String {
    let place = record.place.as_deref().unwrap_or(UNKNOWN_LABEL);
    let magnitude = record
        .magnitude_mw
        .map(|mw| format!("{mw:.1}"))
        .unwrap_or_else(|| UNKNOWN_LABEL.to_string());
    let depth = record
        .depth_km
        .map(|d| format!("{d:.1} km"))
        .unwrap_or_else(|| UNKNOWN_LABEL.to_string());

    format!(
        "Date: {} {}\nLocation: {place}\nMagnitude (Mw): {magnitude}\nDepth: {depth}",
        record.date_text, record.time_text
    )
}
