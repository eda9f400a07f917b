//! Export an estuary's points as CSV.

use crate::show::http_source;
use estuary_core::config::MapConfig;
use estuary_core::point::{parse_points, PointRecord};
use estuary_core::region::RegionId;
use estuary_core::source::PointSource;
use log::info;
use serde::Serialize;
use std::io;

#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    station_code: Option<&'a str>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    water_abundance: Option<String>,
    sediment_abundance: Option<String>,
    sample_date: Option<&'a str>,
}

impl<'a> From<&'a PointRecord> for ExportRow<'a> {
    fn from(point: &'a PointRecord) -> Self {
        ExportRow {
            station_code: point.station_code.as_deref(),
            latitude: point.latitude,
            longitude: point.longitude,
            water_abundance: point.water_abundance.as_ref().map(|m| m.to_string()),
            sediment_abundance: point.sediment_abundance.as_ref().map(|m| m.to_string()),
            sample_date: point.sample_date.as_deref(),
        }
    }
}

/// Write points as CSV with a header row. Missing values are empty fields.
pub fn write_points<W: io::Write>(writer: W, points: &[PointRecord]) -> anyhow::Result<usize> {
    let mut wtr = csv::Writer::from_writer(writer);
    for point in points {
        wtr.serialize(ExportRow::from(point))?;
    }
    wtr.flush()?;
    Ok(points.len())
}

pub async fn run_export(region: &str, output: &str, config: &MapConfig) -> anyhow::Result<()> {
    let region = RegionId::parse(region).ok_or_else(|| anyhow::anyhow!("Region must not be empty"))?;
    let source = http_source(config)?;

    let body = source
        .fetch_body(&region)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load '{}': {}", region, e))?;
    let points = parse_points(&body)?;

    let file = std::fs::File::create(output)?;
    let written = write_points(file, &points)?;
    info!("Wrote {} points for '{}' to {}", written, region, output);
    Ok(())
}
