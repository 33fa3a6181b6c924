//! Render-side event consumers.

use waytrace_core::{Coordinate, TrackError};

/// Consumer of tracking events, implemented by the map/UI layer.
///
/// Calls are fire-and-forget from the tracker's perspective and must not
/// block. Implementations receive only immutable snapshots (coordinate
/// values and indices), never a handle to the live route.
pub trait RenderSink: Send + Sync {
    fn on_tracking_started(&self) {}

    fn on_tracking_stopped(&self) {}

    fn on_waypoint_added(&self, _point: Coordinate, _index: usize) {}

    fn on_destination_reached(&self, _point: Coordinate) {}

    fn on_error(&self, _error: &TrackError) {}
}

/// Sink that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl RenderSink for NullSink {}
