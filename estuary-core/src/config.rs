//! Map and endpoint configuration.
//!
//! Every field has a default, so a config file only needs the keys it
//! changes. The web app embeds its config as JSON; the CLI can load one
//! from disk.

use crate::error::ConfigError;
use crate::region::RegionOption;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const DEFAULT_ATTRIBUTION: &str = "&copy; OpenStreetMap contributors";

/// What to do when responses for overlapping selections resolve out of order.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RacePolicy {
    /// Every response renders; whichever resolves last wins.
    #[default]
    LastResolved,
    /// Responses older than the most recently issued request are dropped.
    LatestIssued,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Prefix for the data endpoint; empty means same origin
    pub api_base: String,
    /// Initial map center as `[latitude, longitude]`
    pub center: [f64; 2],
    pub zoom: u8,
    pub max_zoom: u8,
    /// Leaflet tile URL template
    pub tile_url: String,
    pub attribution: String,
    pub race_policy: RacePolicy,
    /// Dropdown entries
    pub regions: Vec<RegionOption>,
}

impl Default for MapConfig {
    fn default() -> Self {
        MapConfig {
            api_base: String::new(),
            center: [20.5937, 78.9629],
            zoom: 5,
            max_zoom: 18,
            tile_url: DEFAULT_TILE_URL.to_string(),
            attribution: DEFAULT_ATTRIBUTION.to_string(),
            race_policy: RacePolicy::default(),
            regions: vec![
                RegionOption::new("ganga", "Ganga (Hooghly)"),
                RegionOption::new("mahanadi", "Mahanadi"),
                RegionOption::new("godavari", "Godavari"),
                RegionOption::new("krishna", "Krishna"),
                RegionOption::new("cauvery", "Cauvery"),
                RegionOption::new("narmada", "Narmada"),
                RegionOption::new("tapi", "Tapi"),
            ],
        }
    }
}

impl MapConfig {
    pub fn from_json(json: &str) -> Result<MapConfig, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<MapConfig, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        MapConfig::from_json(&contents)
    }

    pub fn with_api_base(mut self, api_base: &str) -> MapConfig {
        self.api_base = api_base.to_string();
        self
    }
}
