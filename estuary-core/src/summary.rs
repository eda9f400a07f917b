use crate::point::{Measurement, PointRecord};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// Date format of `sample_date`: "YYYY-MM-DD"
pub const SAMPLE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Aggregate view of one region's response.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct RegionSummary {
    pub point_count: usize,
    /// Mean over numeric water abundances; `None` when there are none
    pub average_water_abundance: Option<f64>,
    /// Mean over numeric sediment abundances; `None` when there are none
    pub average_sediment_abundance: Option<f64>,
    pub latest_sample: Option<NaiveDate>,
}

fn mean<'a>(values: impl Iterator<Item = &'a Option<Measurement>>) -> Option<f64> {
    let numbers: Vec<f64> = values
        .filter_map(|m| m.as_ref().and_then(Measurement::as_f64))
        .collect();
    if numbers.is_empty() {
        None
    } else {
        Some(numbers.iter().sum::<f64>() / numbers.len() as f64)
    }
}

/// Parse a sample date, tolerating a trailing time component.
pub fn parse_sample_date(s: &str) -> Option<NaiveDate> {
    let day = s.trim().get(..10)?;
    NaiveDate::parse_from_str(day, SAMPLE_DATE_FORMAT).ok()
}

impl RegionSummary {
    pub fn from_points(points: &[PointRecord]) -> Self {
        RegionSummary {
            point_count: points.len(),
            average_water_abundance: mean(points.iter().map(|p| &p.water_abundance)),
            average_sediment_abundance: mean(points.iter().map(|p| &p.sediment_abundance)),
            latest_sample: points
                .iter()
                .filter_map(|p| p.sample_date.as_deref().and_then(parse_sample_date))
                .max(),
        }
    }
}

fn fmt_average(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => crate::popup::MISSING.to_string(),
    }
}

impl fmt::Display for RegionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} points, mean water abundance {}, mean sediment abundance {}",
            self.point_count,
            fmt_average(self.average_water_abundance),
            fmt_average(self.average_sediment_abundance)
        )?;
        if let Some(date) = self.latest_sample {
            write!(f, ", latest sample {}", date.format(SAMPLE_DATE_FORMAT))?;
        }
        Ok(())
    }
}
