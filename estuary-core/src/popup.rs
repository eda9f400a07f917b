//! Human-readable popup content for a station marker.

use crate::point::{Measurement, PointRecord};
use serde::Serialize;

/// Shown when the endpoint sent no value for a field.
pub const MISSING: &str = "n/a";

/// Popup content, already rendered to display strings.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct Popup {
    pub station_code: String,
    pub water_abundance: String,
    pub sediment_abundance: String,
    pub sample_date: String,
}

fn measurement_text(m: &Option<Measurement>) -> String {
    m.as_ref()
        .map(|v| v.to_string())
        .unwrap_or_else(|| MISSING.to_string())
}

impl Popup {
    pub fn from_record(record: &PointRecord) -> Self {
        Popup {
            station_code: record
                .station_code
                .clone()
                .unwrap_or_else(|| MISSING.to_string()),
            water_abundance: measurement_text(&record.water_abundance),
            sediment_abundance: measurement_text(&record.sediment_abundance),
            sample_date: record
                .sample_date
                .clone()
                .unwrap_or_else(|| MISSING.to_string()),
        }
    }

    /// `(label, value)` pairs in display order.
    pub fn fields(&self) -> [(&'static str, &str); 4] {
        [
            ("Station", self.station_code.as_str()),
            ("Water abundance", self.water_abundance.as_str()),
            ("Sediment abundance", self.sediment_abundance.as_str()),
            ("Sample date", self.sample_date.as_str()),
        ]
    }

    /// Plain text, one field per line.
    pub fn to_text(&self) -> String {
        self.fields()
            .iter()
            .map(|(label, value)| format!("{}: {}", label, value))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// HTML for Leaflet's `bindPopup`. Values are escaped since they come
    /// straight from the endpoint.
    pub fn to_html(&self) -> String {
        self.fields()
            .iter()
            .map(|(label, value)| format!("<b>{}:</b> {}", label, escape_html(value)))
            .collect::<Vec<_>>()
            .join("<br>")
    }
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
            c => out.push(c),
        }
    }
    out
}
