//! The display surface seam and the context that owns its markers.

use crate::popup::Popup;
use serde::Serialize;

/// Everything needed to place one marker.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct MarkerSpec {
    pub latitude: f64,
    pub longitude: f64,
    pub popup: Popup,
}

/// Something that can show markers: the Leaflet map in the browser, a text
/// listing in the CLI.
pub trait MapSurface {
    /// Handle used to remove a marker later.
    type Marker;

    fn add_marker(&mut self, spec: &MarkerSpec) -> Self::Marker;

    fn remove_marker(&mut self, marker: Self::Marker);
}

/// A surface together with the markers currently shown on it.
///
/// Only one region is shown at a time, so every marker here belongs to the
/// current selection.
pub struct MapContext<M: MapSurface> {
    surface: M,
    markers: Vec<M::Marker>,
}

impl<M: MapSurface> MapContext<M> {
    pub fn new(surface: M) -> Self {
        Self {
            surface,
            markers: Vec::new(),
        }
    }

    pub fn surface(&self) -> &M {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut M {
        &mut self.surface
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// Remove every marker currently shown.
    pub fn clear(&mut self) {
        for marker in self.markers.drain(..) {
            self.surface.remove_marker(marker);
        }
    }

    /// Full replace: clear, then add one marker per spec. No diffing.
    pub fn replace(&mut self, specs: &[MarkerSpec]) {
        self.clear();
        for spec in specs {
            let marker = self.surface.add_marker(spec);
            self.markers.push(marker);
        }
    }
}
