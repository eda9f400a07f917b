//! Browser side of the estuary map.
//!
//! This crate provides:
//! - `js_bridge`: Leaflet wrappers via `js_sys::eval()`, and `LeafletSurface`
//! - `fetch`: `BrowserPointSource`, the `fetch()`-backed point source
//! - `state`: Reactive AppState with Dioxus Signals
//! - `components`: the estuary selector, map container and summary panel

pub mod components;
pub mod fetch;
pub mod js_bridge;
pub mod state;
