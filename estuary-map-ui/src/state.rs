//! Application state managed via Dioxus context.
//!
//! `AppState` bundles the reactive signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with `use_context::<AppState>()`.

use estuary_core::config::MapConfig;
use estuary_core::summary::RegionSummary;
use dioxus::prelude::*;

/// Shared state for the estuary map app.
#[derive(Clone, Copy)]
pub struct AppState {
    /// Map and endpoint configuration
    pub config: Signal<MapConfig>,
    /// Currently selected estuary (empty until the user picks one)
    pub selected_region: Signal<String>,
    /// Summary of the most recently rendered response
    pub summary: Signal<Option<RegionSummary>>,
}

impl AppState {
    pub fn new(config: MapConfig) -> Self {
        Self {
            config: Signal::new(config),
            selected_region: Signal::new(String::new()),
            summary: Signal::new(None),
        }
    }
}
