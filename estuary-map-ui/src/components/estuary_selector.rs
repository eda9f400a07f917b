//! Dropdown selector for choosing an estuary.

use crate::state::AppState;
use dioxus::prelude::*;

/// DOM id of the select element.
pub const ESTUARY_SELECT_ID: &str = "estuarySelect";

#[derive(Props, Clone, PartialEq)]
pub struct EstuarySelectorProps {
    /// Called with the raw option value on every change (may be empty)
    pub on_select: EventHandler<String>,
}

/// Estuary dropdown selector.
/// Reads the configured regions from AppState, records the selection and
/// forwards it to `on_select`.
#[component]
pub fn EstuarySelector(props: EstuarySelectorProps) -> Element {
    let mut state = use_context::<AppState>();
    let regions = state.config.read().regions.clone();
    let selected = (state.selected_region)();
    let on_select = props.on_select;

    let on_change = move |evt: Event<FormData>| {
        let value = evt.value();
        state.selected_region.set(value.clone());
        on_select.call(value);
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            label {
                r#for: ESTUARY_SELECT_ID,
                style: "font-weight: bold; margin-right: 8px;",
                "Estuary: "
            }
            select {
                id: ESTUARY_SELECT_ID,
                onchange: on_change,
                option {
                    value: "",
                    selected: selected.is_empty(),
                    "-- Select an estuary --"
                }
                for region in regions.iter() {
                    option {
                        value: "{region.value}",
                        selected: region.value == selected,
                        "{region.label}"
                    }
                }
            }
        }
    }
}
