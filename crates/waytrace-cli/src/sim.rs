//! Simulated walks for driving the tracker without a real positioning
//! backend.

use std::sync::Mutex;

use async_trait::async_trait;

use waytrace_core::{Coordinate, SampleError};
use waytrace_tracker::LocationProvider;

/// Straight-line walk between two points at a fixed pace.
pub struct WalkPath {
    pub start_lat: f64,
    pub start_lng: f64,
    pub end_lat: f64,
    pub end_lng: f64,
    pub speed_mps: f64,
    pub distance_m: f64,
    duration_s: f64,
}

impl WalkPath {
    pub fn new(start_lat: f64, start_lng: f64, end_lat: f64, end_lng: f64, speed_mps: f64) -> Self {
        let distance_m = haversine_distance(start_lat, start_lng, end_lat, end_lng);
        let duration_s = if speed_mps > 0.0 {
            distance_m / speed_mps
        } else {
            0.0
        };

        Self {
            start_lat,
            start_lng,
            end_lat,
            end_lng,
            speed_mps,
            distance_m,
            duration_s,
        }
    }

    /// Get (lat, lng) at `t` seconds from the start; holds at the end
    /// point once the walk is over.
    pub fn position(&self, t: f64) -> (f64, f64) {
        let progress = if self.duration_s > 0.0 {
            (t / self.duration_s).clamp(0.0, 1.0)
        } else {
            0.0
        };

        let lat = self.start_lat + progress * (self.end_lat - self.start_lat);
        let lng = self.start_lng + progress * (self.end_lng - self.start_lng);

        (lat, lng)
    }
}

/// Location provider that advances along a [`WalkPath`] by a fixed time
/// step on every sample request.
pub struct SimulatedWalk {
    path: WalkPath,
    step_s: f64,
    elapsed_s: Mutex<f64>,
}

impl SimulatedWalk {
    pub fn new(path: WalkPath, step_s: f64) -> Self {
        Self {
            path,
            step_s,
            elapsed_s: Mutex::new(0.0),
        }
    }
}

#[async_trait]
impl LocationProvider for SimulatedWalk {
    async fn current_position(&self) -> Result<Coordinate, SampleError> {
        let t = {
            let mut elapsed = self
                .elapsed_s
                .lock()
                .map_err(|_| SampleError::Unavailable("walk clock poisoned".into()))?;
            let t = *elapsed;
            *elapsed += self.step_s;
            t
        };

        let (lat, lng) = self.path.position(t);
        Coordinate::new(lat, lng).map_err(|err| SampleError::Unavailable(err.to_string()))
    }
}

/// Distance between two points in meters (Haversine formula).
pub fn haversine_distance(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    const R: f64 = 6_371_000.0; // Earth radius in meters

    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let dphi = (lat2 - lat1).to_radians();
    let dlambda = (lng2 - lng1).to_radians();

    let a = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);

    2.0 * R * a.sqrt().atan2((1.0 - a).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walk_starts_at_the_start_point() {
        let path = WalkPath::new(40.0, -3.0, 40.01, -3.01, 1.4);
        let (lat, lng) = path.position(0.0);

        assert!((lat - 40.0).abs() < 0.0001);
        assert!((lng - (-3.0)).abs() < 0.0001);
    }

    #[test]
    fn walk_holds_at_the_end_point() {
        let path = WalkPath::new(40.0, -3.0, 40.01, -3.01, 1.4);
        let (lat, lng) = path.position(1_000_000.0);

        assert!((lat - 40.01).abs() < 0.0001);
        assert!((lng - (-3.01)).abs() < 0.0001);
    }

    #[tokio::test]
    async fn simulated_walk_advances_per_sample() {
        let path = WalkPath::new(40.0, -3.0, 41.0, -3.0, 10.0);
        let walk = SimulatedWalk::new(path, 60.0);

        let first = walk.current_position().await.unwrap();
        let second = walk.current_position().await.unwrap();

        assert!((first.lat() - 40.0).abs() < 0.0001);
        assert!(second.lat() > first.lat());
    }
}
