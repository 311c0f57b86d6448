//! Serialize a `MapArtifact` to a standalone Leaflet HTML page.
//!
//! Marker data is embedded as JSON; popups are built with DOM text nodes so
//! place names never reach the page as markup.

use serde::Serialize;

use crate::error::PipelineError;
use crate::map::artifact::{Legend, MapArtifact, Marker};

const LEAFLET_VERSION: &str = "1.9.4";
const MARKERCLUSTER_VERSION: &str = "1.5.3";

const PAGE_TITLE: &str = "KOERI Türkiye Earthquake Map";

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{{TITLE}}</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@{{LEAFLET}}/dist/leaflet.css">
<link rel="stylesheet" href="https://unpkg.com/leaflet.markercluster@{{CLUSTER}}/dist/MarkerCluster.css">
<link rel="stylesheet" href="https://unpkg.com/leaflet.markercluster@{{CLUSTER}}/dist/MarkerCluster.Default.css">
<script src="https://unpkg.com/leaflet@{{LEAFLET}}/dist/leaflet.js"></script>
<script src="https://unpkg.com/leaflet.markercluster@{{CLUSTER}}/dist/leaflet.markercluster.js"></script>
<style>
html, body, #map { width: 100%; height: 100%; margin: 0; padding: 0; }
.legend {
  position: fixed; bottom: 50px; right: 50px; width: 150px;
  background-color: white; z-index: 9999;
  border: 2px solid grey; padding: 10px; font-size: 14px;
}
.legend i { width: 15px; height: 15px; display: inline-block; }
</style>
</head>
<body>
<div id="map"></div>
{{LEGEND}}
<script>
const view = {{VIEW}};
const markers = {{MARKERS}};
const map = L.map("map").setView([view.center.lat, view.center.lon], view.zoom);
L.tileLayer("https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png", {
  maxZoom: 18,
  attribution: "&copy; OpenStreetMap contributors"
}).addTo(map);
const cluster = L.markerClusterGroup();
for (const m of markers) {
  const body = document.createElement("div");
  m.popup.split("\n").forEach((line, i) => {
    if (i > 0) body.appendChild(document.createElement("br"));
    body.appendChild(document.createTextNode(line));
  });
  L.circleMarker([m.position.lat, m.position.lon], {
    radius: m.radius,
    color: m.stroke_color,
    fill: true,
    fillColor: m.fill_color,
    fillOpacity: m.fill_opacity
  }).bindPopup(body).addTo(cluster);
}
map.addLayer(cluster);
</script>
</body>
</html>
"#;

/// Render the artifact to a complete HTML document.
pub fn render_html(artifact: &MapArtifact) -> Result<String, PipelineError> {
    let view = script_json(&artifact.view)?;
    let markers = script_json::<[Marker]>(artifact.markers())?;

    Ok(TEMPLATE
        .replace("{{TITLE}}", PAGE_TITLE)
        .replace("{{LEAFLET}}", LEAFLET_VERSION)
        .replace("{{CLUSTER}}", MARKERCLUSTER_VERSION)
        .replace("{{LEGEND}}", &render_legend(&artifact.legend))
        .replace("{{VIEW}}", &view)
        .replace("{{MARKERS}}", &markers))
}

/// Legend overlay markup.
pub fn render_legend(legend: &Legend) -> String {
    let mut out = String::from("<div class=\"legend\">\n");
    out.push_str(&format!("<b>{}</b><br>\n", escape_html(legend.title)));
    for entry in legend.entries {
        out.push_str(&format!(
            "<i style=\"background:{};\"></i> {}<br>\n",
            escape_html(entry.color),
            escape_html(entry.label)
        ));
    }
    out.push_str("</div>");
    out
}

/// JSON safe to inline inside a `<script>` element.
fn script_json<T: Serialize + ?Sized>(value: &T) -> Result<String, PipelineError> {
    let json = serde_json::to_string(value)
        .map_err(|e| PipelineError::Output(format!("Failed to serialize map data: {e}")))?;
    Ok(json.replace("</", "<\\/"))
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
