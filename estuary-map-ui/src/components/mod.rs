//! Reusable Dioxus RSX components for the estuary map app.

mod estuary_selector;
mod map_container;
mod summary_panel;

pub use estuary_selector::EstuarySelector;
pub use map_container::MapContainer;
pub use summary_panel::SummaryPanel;
