//! Core data model for route tracking.

use serde::{Deserialize, Serialize};

use crate::error::CoordinateError;

/// Wire record for a single stored waypoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointRecord {
    pub lat: f64,
    pub lng: f64,
}

/// The on-storage representation of a route: `{lat, lng}` records in
/// arrival order, written wholesale on every mutation.
pub type PersistedRoute = Vec<PointRecord>;

/// A validated geographic position.
///
/// Latitude is bounded to [-90, 90] and longitude to [-180, 180];
/// construction fails outside those ranges and the value is immutable
/// afterwards. Serializes as a [`PointRecord`], and deserialization of an
/// out-of-range record fails.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PointRecord", into = "PointRecord")]
pub struct Coordinate {
    lat: f64,
    lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Result<Self, CoordinateError> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(CoordinateError::Latitude(lat));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(CoordinateError::Longitude(lng));
        }
        Ok(Self { lat, lng })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }
}

impl TryFrom<PointRecord> for Coordinate {
    type Error = CoordinateError;

    fn try_from(record: PointRecord) -> Result<Self, Self::Error> {
        Coordinate::new(record.lat, record.lng)
    }
}

impl From<Coordinate> for PointRecord {
    fn from(point: Coordinate) -> Self {
        PointRecord {
            lat: point.lat,
            lng: point.lng,
        }
    }
}

/// An ordered sequence of waypoints.
///
/// Insertion order is arrival order; no reordering or deduplication is
/// performed. The tracker owns the only live instance; stores hold a
/// serialized copy.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Route {
    points: Vec<Coordinate>,
}

impl Route {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_points(points: Vec<Coordinate>) -> Self {
        Self { points }
    }

    /// Hydrate from stored records, failing if any record is out of range.
    pub fn from_persisted(records: &PersistedRoute) -> Result<Self, CoordinateError> {
        let points = records
            .iter()
            .map(|record| Coordinate::try_from(*record))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { points })
    }

    pub fn to_persisted(&self) -> PersistedRoute {
        self.points.iter().map(|point| (*point).into()).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    pub fn last(&self) -> Option<Coordinate> {
        self.points.last().copied()
    }

    /// Append a waypoint, returning its index.
    pub fn push(&mut self, point: Coordinate) -> usize {
        self.points.push(point);
        self.points.len() - 1
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}

/// Lifecycle state of a route tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackingState {
    /// Not yet initialized, or stopped.
    Idle,
    /// Waiting on (or refused) location authorization.
    AwaitingPermission,
    /// Periodic sampling is active.
    Sampling,
    /// The route reached its maximum length; terminal until reset.
    Complete,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinate_accepts_range_bounds() {
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
        assert!(Coordinate::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn coordinate_rejects_out_of_range() {
        assert!(matches!(
            Coordinate::new(90.0001, 0.0),
            Err(CoordinateError::Latitude(_))
        ));
        assert!(matches!(
            Coordinate::new(-90.0001, 0.0),
            Err(CoordinateError::Latitude(_))
        ));
        assert!(matches!(
            Coordinate::new(0.0, 180.0001),
            Err(CoordinateError::Longitude(_))
        ));
        assert!(matches!(
            Coordinate::new(0.0, -180.0001),
            Err(CoordinateError::Longitude(_))
        ));
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn coordinate_serializes_as_point_record() {
        let point = Coordinate::new(40.4168, -3.7038).unwrap();
        let json = serde_json::to_string(&point).unwrap();
        assert_eq!(json, r#"{"lat":40.4168,"lng":-3.7038}"#);

        let back: Coordinate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, point);
    }

    #[test]
    fn coordinate_deserialization_rejects_out_of_range() {
        let result = serde_json::from_str::<Coordinate>(r#"{"lat":123.456,"lng":0.0}"#);
        assert!(result.is_err());
    }

    #[test]
    fn route_keeps_arrival_order_and_duplicates() {
        let a = Coordinate::new(10.0, 20.0).unwrap();
        let b = Coordinate::new(10.001, 20.001).unwrap();

        let mut route = Route::new();
        assert_eq!(route.push(a), 0);
        assert_eq!(route.push(b), 1);
        assert_eq!(route.push(a), 2);

        assert_eq!(route.points(), &[a, b, a]);
        assert_eq!(route.last(), Some(a));
    }

    #[test]
    fn route_round_trips_through_persisted_form() {
        let route = Route::from_points(vec![
            Coordinate::new(10.0, 20.0).unwrap(),
            Coordinate::new(10.001, 20.001).unwrap(),
        ]);

        let records = route.to_persisted();
        let back = Route::from_persisted(&records).unwrap();
        assert_eq!(back, route);
    }

    #[test]
    fn hydration_rejects_out_of_range_records() {
        let records = vec![
            PointRecord { lat: 10.0, lng: 20.0 },
            PointRecord {
                lat: 123.456,
                lng: 20.0,
            },
        ];
        assert!(Route::from_persisted(&records).is_err());
    }

    #[test]
    fn clear_empties_the_route() {
        let mut route = Route::from_points(vec![Coordinate::new(10.0, 20.0).unwrap()]);
        route.clear();
        assert!(route.is_empty());
    }
}
