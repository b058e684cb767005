//! Standalone Leaflet map of a trip: both places, the line between them,
//! and the view centered on the midpoint and fit to their bounding box.

use std::fs;
use std::io;
use std::path::Path;

use crate::location::format_coords;
use crate::trip::TripReport;

pub const DEFAULT_MAP_FILE: &str = "map.html";

const LINE_COLOR: &str = "#FF0000";
const LINE_WEIGHT: u32 = 3;

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{{TITLE}}</title>
  <link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
  <script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
  <style>html, body, #map { height: 100%; margin: 0; }</style>
</head>
<body>
  <div id="map"></div>
  <script>
    const map = L.map("map").setView([{{MID_LAT}}, {{MID_LON}}], 3);
    L.tileLayer("https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png", {
      attribution: "&copy; OpenStreetMap contributors"
    }).addTo(map);
    map.fitBounds([[{{SW_LAT}}, {{SW_LON}}], [{{NE_LAT}}, {{NE_LON}}]]);
    L.polyline([[{{A_LAT}}, {{A_LON}}], [{{B_LAT}}, {{B_LON}}]], {
      color: "{{COLOR}}", weight: {{WEIGHT}}
    }).addTo(map);
    L.marker([{{A_LAT}}, {{A_LON}}]).bindPopup({{A_LABEL}}).addTo(map);
    L.marker([{{B_LAT}}, {{B_LON}}]).bindPopup({{B_LABEL}}).addTo(map);
    L.circleMarker([{{MID_LAT}}, {{MID_LON}}], { radius: 5, color: "{{COLOR}}" })
      .bindPopup({{MID_LABEL}}).addTo(map);
  </script>
</body>
</html>
"#;

/// Render the trip as a self-contained HTML page.
pub fn render_map(report: &TripReport) -> String {
    let a = report.from.coordinate();
    let b = report.to.coordinate();
    let mid = report.midpoint;
    let sw = report.bounds.south_west;
    let ne = report.bounds.north_east;

    let title = format!("{} \u{2194} {} ({})", report.from.label(), report.to.label(), report.distance);
    let mid_label = format!("Midpoint: {} \u{2014} {}", format_coords(mid.lat, mid.lon), report.distance);

    let values = [
        ("TITLE", escape_html(&title)),
        ("MID_LAT", mid.lat.to_string()),
        ("MID_LON", mid.lon.to_string()),
        ("SW_LAT", sw.lat.to_string()),
        ("SW_LON", sw.lon.to_string()),
        ("NE_LAT", ne.lat.to_string()),
        ("NE_LON", ne.lon.to_string()),
        ("A_LAT", a.lat.to_string()),
        ("A_LON", a.lon.to_string()),
        ("B_LAT", b.lat.to_string()),
        ("B_LON", b.lon.to_string()),
        ("COLOR", LINE_COLOR.to_string()),
        ("WEIGHT", LINE_WEIGHT.to_string()),
        ("A_LABEL", js_string(&escape_html(report.from.label()))),
        ("B_LABEL", js_string(&escape_html(report.to.label()))),
        ("MID_LABEL", js_string(&escape_html(&mid_label))),
    ];

    fill(TEMPLATE, &values)
}

/// Expand `{{KEY}}` placeholders in one pass; substituted text is never rescanned.
fn fill(template: &str, values: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len() + 256);
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let hit = after.find("}}").and_then(|end| {
            let key = &after[..end];
            values.iter().find(|(k, _)| *k == key).map(|(_, v)| (end, v))
        });
        match hit {
            Some((end, value)) => {
                out.push_str(value);
                rest = &after[end + 2..];
            }
            None => {
                out.push_str("{{");
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Render and write the map, creating parent directories as needed.
pub fn save_map(path: &Path, report: &TripReport) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, render_map(report))
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

/// A JSON string literal that is also safe inside a <script> block.
fn js_string(s: &str) -> String {
    serde_json::Value::from(s).to_string().replace("</", "<\\/")
}
