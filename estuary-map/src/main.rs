//! Estuary Microplastics Map
//!
//! Shows sampling stations of one estuary at a time on a Leaflet map.
//!
//! Data flow:
//! 1. `assets/map-config.json` is embedded with `include_str!` and parsed
//!    into a `MapConfig` (defaults are used if it does not parse).
//! 2. On mount, Leaflet is initialized into the `#map` container.
//! 3. Each change of `#estuarySelect` spawns `SelectionHandler::on_select`,
//!    which fetches `/estuary-data/{region}` and replaces the markers.
//! 4. A successful render updates the summary panel. Failures only reach
//!    the log.

use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;
use estuary_core::config::MapConfig;
use estuary_core::handler::{SelectionHandler, SelectionOutcome};
use estuary_core::surface::MapContext;
use estuary_map_ui::components::{EstuarySelector, MapContainer, SummaryPanel};
use estuary_map_ui::fetch::BrowserPointSource;
use estuary_map_ui::js_bridge::{self, LeafletSurface, LEAFLET_CSS, LEAFLET_JS};
use estuary_map_ui::state::AppState;

/// Map and endpoint configuration, editable without touching code.
const MAP_CONFIG_JSON: &str = include_str!("../assets/map-config.json");

/// DOM id of the Leaflet container.
const MAP_CONTAINER_ID: &str = "map";

type MapHandler = SelectionHandler<BrowserPointSource, LeafletSurface>;

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("estuary-map-root"))
        .launch(App);
}

fn load_config() -> MapConfig {
    match MapConfig::from_json(MAP_CONFIG_JSON) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Falling back to default map config: {}", e);
            MapConfig::default()
        }
    }
}

#[component]
fn App() -> Element {
    let state = use_context_provider(|| AppState::new(load_config()));

    let handler: Rc<MapHandler> = use_hook(|| {
        let config = state.config.peek();
        let context = Rc::new(RefCell::new(MapContext::new(LeafletSurface::new())));
        Rc::new(SelectionHandler::new(
            BrowserPointSource::new(&config.api_base),
            context,
            config.race_policy,
        ))
    });

    // Initialize Leaflet once on mount
    use_effect(move || {
        let config = state.config.peek().clone();
        js_bridge::init_map(MAP_CONTAINER_ID, &config);
    });

    let on_select = move |region: String| {
        let handler = handler.clone();
        let mut summary = state.summary;
        spawn(async move {
            if let SelectionOutcome::Rendered { summary: rendered, .. } =
                handler.on_select(&region).await
            {
                summary.set(Some(rendered));
            }
        });
    };

    rsx! {
        document::Link { rel: "stylesheet", href: LEAFLET_CSS }
        document::Script { src: LEAFLET_JS }

        div {
            style: "padding: 16px; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;",

            h3 {
                style: "margin: 0 0 4px 0; font-size: 16px;",
                "Estuary Microplastics Survey"
            }

            EstuarySelector { on_select: on_select }
            SummaryPanel {}
            MapContainer { id: MAP_CONTAINER_ID.to_string() }
        }
    }
}
