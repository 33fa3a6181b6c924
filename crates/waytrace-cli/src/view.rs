//! Headless map view model.
//!
//! Stands in for the map/UI layer in demos: keeps the polyline, the
//! labeled markers, and the center that a real map widget would render
//! from the tracking events.

use std::sync::Mutex;

use waytrace_core::{Coordinate, TrackError};
use waytrace_tracker::RenderSink;

pub const START_LABEL: &str = "Home";
pub const DESTINATION_LABEL: &str = "Destination";

/// A rendered waypoint marker, optionally labeled.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: Coordinate,
    pub label: Option<String>,
}

#[derive(Debug, Default)]
struct ViewState {
    polyline: Vec<Coordinate>,
    markers: Vec<Marker>,
    center: Option<Coordinate>,
    last_error: Option<String>,
}

/// Render sink maintaining what a map widget would draw.
#[derive(Debug, Default)]
pub struct MapView {
    state: Mutex<ViewState>,
}

impl MapView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn polyline(&self) -> Vec<Coordinate> {
        self.state
            .lock()
            .map(|s| s.polyline.clone())
            .unwrap_or_default()
    }

    pub fn markers(&self) -> Vec<Marker> {
        self.state
            .lock()
            .map(|s| s.markers.clone())
            .unwrap_or_default()
    }

    pub fn center(&self) -> Option<Coordinate> {
        self.state.lock().ok().and_then(|s| s.center)
    }

    pub fn last_error(&self) -> Option<String> {
        self.state.lock().ok().and_then(|s| s.last_error.clone())
    }
}

impl RenderSink for MapView {
    fn on_waypoint_added(&self, point: Coordinate, index: usize) {
        if let Ok(mut state) = self.state.lock() {
            // Index zero means a new route: drop whatever the previous
            // route left behind.
            if index == 0 {
                state.polyline.clear();
                state.markers.clear();
            }
            state.polyline.push(point);
            state.markers.push(Marker {
                position: point,
                label: (index == 0).then(|| START_LABEL.to_string()),
            });
            state.center = Some(point);
        }
    }

    fn on_destination_reached(&self, point: Coordinate) {
        if let Ok(mut state) = self.state.lock() {
            match state.markers.last_mut() {
                Some(marker) if marker.position == point => {
                    marker.label = Some(DESTINATION_LABEL.to_string());
                }
                _ => state.markers.push(Marker {
                    position: point,
                    label: Some(DESTINATION_LABEL.to_string()),
                }),
            }
            state.center = Some(point);
        }
    }

    fn on_error(&self, error: &TrackError) {
        if let Ok(mut state) = self.state.lock() {
            state.last_error = Some(error.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lat: f64, lng: f64) -> Coordinate {
        Coordinate::new(lat, lng).unwrap()
    }

    #[test]
    fn first_waypoint_is_the_home_marker() {
        let view = MapView::new();
        view.on_waypoint_added(point(10.0, 20.0), 0);
        view.on_waypoint_added(point(10.001, 20.001), 1);

        let markers = view.markers();
        assert_eq!(markers[0].label.as_deref(), Some(START_LABEL));
        assert_eq!(markers[1].label, None);
        assert_eq!(view.polyline().len(), 2);
        assert_eq!(view.center(), Some(point(10.001, 20.001)));
    }

    #[test]
    fn destination_labels_the_last_marker() {
        let view = MapView::new();
        view.on_waypoint_added(point(10.0, 20.0), 0);
        view.on_waypoint_added(point(10.001, 20.001), 1);
        view.on_destination_reached(point(10.001, 20.001));

        let markers = view.markers();
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[1].label.as_deref(), Some(DESTINATION_LABEL));
    }

    #[test]
    fn index_zero_starts_a_fresh_route() {
        let view = MapView::new();
        view.on_waypoint_added(point(10.0, 20.0), 0);
        view.on_waypoint_added(point(10.001, 20.001), 1);

        // A reset route begins again at index zero.
        view.on_waypoint_added(point(50.0, 60.0), 0);

        assert_eq!(view.polyline(), vec![point(50.0, 60.0)]);
        let markers = view.markers();
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].label.as_deref(), Some(START_LABEL));
    }
}
