//! Typed wrappers around Leaflet via `js_sys::eval()`.
//!
//! The Leaflet glue lives in `assets/js/leaflet-bridge.js`. It is evaluated as
//! globals (no ES modules) once `window.L` exists, and exposed via `window.*`.
//! This module serializes arguments and calls those globals.
//!
//! Selections can resolve before Leaflet has loaded. Until the bridge sets
//! `window.__estuaryMapReady`, adds are queued in `window.__estuaryPending`
//! and removes take entries back out of that queue, so the JS side always
//! matches the handles `MapContext` holds.

use estuary_core::config::MapConfig;
use estuary_core::surface::{MapSurface, MarkerSpec};

// Embed the Leaflet glue at compile time
static LEAFLET_BRIDGE_JS: &str = include_str!("../assets/js/leaflet-bridge.js");

/// Leaflet assets loaded by the app shell.
pub const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
pub const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('Estuary JS call failed:', e); }}",
        code
    );
    let _ = js_sys::eval(&wrapped);
}

/// Initialize the Leaflet map with a wait-for-Leaflet polling loop.
///
/// The bridge defines `estuaryInitMap(...)` and friends via `function`
/// declarations. They are evaluated at global scope via indirect eval once
/// Leaflet is ready and the container exists, then promoted to `window.*`.
pub fn init_map(container_id: &str, config: &MapConfig) {
    let store_js = format!(
        "window.__estuaryBridgeScript = {}; window.__estuaryMapConfig = {};",
        serde_json::to_string(LEAFLET_BRIDGE_JS).unwrap_or_default(),
        serde_json::to_string(config).unwrap_or_else(|_| "{}".to_string())
    );
    let _ = js_sys::eval(&store_js);

    let init_js = format!(
        r#"
        (function() {{
            var waitForLeaflet = setInterval(function() {{
                if (typeof L !== 'undefined' && document.getElementById('{container_id}')) {{
                    clearInterval(waitForLeaflet);
                    (0, eval)(window.__estuaryBridgeScript);
                    delete window.__estuaryBridgeScript;
                    if (typeof estuaryInitMap !== 'undefined') window.estuaryInitMap = estuaryInitMap;
                    if (typeof estuaryAddMarker !== 'undefined') window.estuaryAddMarker = estuaryAddMarker;
                    if (typeof estuaryRemoveMarker !== 'undefined') window.estuaryRemoveMarker = estuaryRemoveMarker;
                    try {{
                        window.estuaryInitMap('{container_id}', window.__estuaryMapConfig);
                        console.log('[estuary] map initialized');
                    }} catch(e) {{ console.error('[estuary] estuaryInitMap error:', e); }}
                }}
            }}, 100);
        }})();
        "#,
    );
    let _ = js_sys::eval(&init_js);
}

fn add_marker_js(id: u32, spec: &MarkerSpec) -> String {
    let args = format!(
        "{}, {}, {}, {}",
        id,
        spec.latitude,
        spec.longitude,
        serde_json::to_string(&spec.popup.to_html()).unwrap_or_default()
    );
    format!(
        "if (window.__estuaryMapReady) {{ window.estuaryAddMarker({args}); }} \
         else {{ (window.__estuaryPending = window.__estuaryPending || []).push([{args}]); }}"
    )
}

fn remove_marker_js(id: u32) -> String {
    format!(
        "if (window.__estuaryMapReady) {{ window.estuaryRemoveMarker({id}); }} \
         else {{ window.__estuaryPending = (window.__estuaryPending || []).filter(function(p) {{ return p[0] !== {id}; }}); }}"
    )
}

/// The Leaflet map as a [`MapSurface`]. Marker handles are ids into
/// `window.__estuaryMarkers`.
#[derive(Debug, Default)]
pub struct LeafletSurface {
    next_id: u32,
}

impl LeafletSurface {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MapSurface for LeafletSurface {
    type Marker = u32;

    fn add_marker(&mut self, spec: &MarkerSpec) -> u32 {
        self.next_id += 1;
        call_js(&add_marker_js(self.next_id, spec));
        self.next_id
    }

    fn remove_marker(&mut self, marker: u32) {
        call_js(&remove_marker_js(marker));
    }
}
