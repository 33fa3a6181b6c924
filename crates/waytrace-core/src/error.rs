//! Error taxonomy for the tracking core.

use std::time::Duration;

use thiserror::Error;

/// A coordinate component was outside its valid range.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CoordinateError {
    #[error("latitude {0} outside [-90, 90]")]
    Latitude(f64),
    #[error("longitude {0} outside [-180, 180]")]
    Longitude(f64),
}

/// Location authorization was not granted.
///
/// Fatal to starting a tracking session; recoverable by the user granting
/// access and initializing again.
#[derive(Debug, Clone, Error)]
#[error("location permission denied: {reason}")]
pub struct PermissionDenied {
    pub reason: String,
}

impl PermissionDenied {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// A single position sample failed. Transient: the sampling schedule
/// continues.
#[derive(Debug, Clone, Error)]
pub enum SampleError {
    #[error("position request timed out after {0:?}")]
    TimedOut(Duration),
    #[error("position unavailable: {0}")]
    Unavailable(String),
}

/// The route store failed to read or write.
///
/// The in-memory route stays authoritative for the session; storage may
/// diverge until the next successful save.
#[derive(Debug, Clone, Error)]
#[error("route store failure: {message}")]
pub struct StoreError {
    pub message: String,
}

impl StoreError {
    pub fn new(source: impl std::fmt::Display) -> Self {
        Self {
            message: source.to_string(),
        }
    }
}

/// Umbrella error surfaced to render sinks and tracker callers.
#[derive(Debug, Clone, Error)]
pub enum TrackError {
    #[error(transparent)]
    Permission(#[from] PermissionDenied),
    #[error(transparent)]
    Sample(#[from] SampleError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Failure class, for sinks that key off the kind rather than the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    PermissionDenied,
    SampleTimedOut,
    SampleUnavailable,
    PersistenceWrite,
}

impl TrackError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TrackError::Permission(_) => ErrorKind::PermissionDenied,
            TrackError::Sample(SampleError::TimedOut(_)) => ErrorKind::SampleTimedOut,
            TrackError::Sample(SampleError::Unavailable(_)) => ErrorKind::SampleUnavailable,
            TrackError::Store(_) => ErrorKind::PersistenceWrite,
        }
    }
}
