//! Leaflet map rendering
//!
//! Produces a self-contained HTML page with one blue marker for the user
//! and one red marker per facility, each tooltipped.

use std::path::Path;

use super::{Coordinates, Facility};
use crate::errors::Result;

const ZOOM: u8 = 12;
const USER_COLOR: &str = "blue";
const FACILITY_COLOR: &str = "red";
const LEAFLET_VERSION: &str = "1.9.4";

/// JS string literal that is also safe inside a <script> element
fn js_string(value: &str) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|_| "\"\"".to_string())
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
}

fn marker(at: Coordinates, tooltip: &str, color: &str) -> String {
    format!(
        "L.circleMarker([{}, {}], {{radius: 8, color: {}, fillColor: {}, fillOpacity: 0.8}}).bindTooltip({}).addTo(map);",
        at.lat,
        at.lon,
        js_string(color),
        js_string(color),
        js_string(tooltip)
    )
}

/// Full HTML document centred on the user
pub fn render_map(user: Coordinates, facilities: &[Facility]) -> String {
    let mut markers = vec![marker(user, "Your Location", USER_COLOR)];
    markers.extend(
        facilities
            .iter()
            .map(|f| marker(f.coords(), &f.name, FACILITY_COLOR)),
    );

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Nearby Hospitals &amp; Pharmacies</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@{version}/dist/leaflet.css">
<script src="https://unpkg.com/leaflet@{version}/dist/leaflet.js"></script>
<style>html, body, #map {{ height: 100%; margin: 0; }}</style>
</head>
<body>
<div id="map"></div>
<script>
var map = L.map("map").setView([{lat}, {lon}], {zoom});
L.tileLayer("https://{{s}}.tile.openstreetmap.org/{{z}}/{{x}}/{{y}}.png", {{
  attribution: "&copy; OpenStreetMap contributors"
}}).addTo(map);
{markers}
</script>
</body>
</html>
"#,
        version = LEAFLET_VERSION,
        lat = user.lat,
        lon = user.lon,
        zoom = ZOOM,
        markers = markers.join("\n"),
    )
}

/// Render and write the map page to `path`
pub fn write_map(path: &Path, user: Coordinates, facilities: &[Facility]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, render_map(user, facilities))?;
    tracing::debug!(path = %path.display(), markers = facilities.len() + 1, "map written");
    Ok(())
}
