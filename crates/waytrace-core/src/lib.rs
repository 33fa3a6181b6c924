//! Core data model and error taxonomy for waytrace route tracking.

pub mod error;
pub mod models;

pub use error::{
    CoordinateError, ErrorKind, PermissionDenied, SampleError, StoreError, TrackError,
};
pub use models::{Coordinate, PersistedRoute, PointRecord, Route, TrackingState};
