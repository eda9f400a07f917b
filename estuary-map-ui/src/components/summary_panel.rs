//! Summary line for the currently shown estuary.

use crate::state::AppState;
use dioxus::prelude::*;

/// Shows point count and mean abundances once a region has rendered.
#[component]
pub fn SummaryPanel() -> Element {
    let state = use_context::<AppState>();
    let summary = state.summary.read().clone();

    rsx! {
        if let Some(summary) = summary {
            div {
                style: "margin: 8px 0; padding: 8px 12px; background: #F5F5F5; border-radius: 4px; font-size: 12px; color: #616161; border: 1px solid #E0E0E0;",
                "{summary}"
            }
        }
    }
}
