//! Route tracking core: permission gating, periodic location sampling,
//! bounded waypoint accumulation, and persistence.
//!
//! The tracker is decoupled from any map or UI framework: the map layer
//! implements [`RenderSink`] and receives immutable event snapshots, while
//! platform capabilities are injected through [`PermissionGate`],
//! [`LocationProvider`], and [`RouteStore`].

pub mod config;
pub mod gate;
pub mod provider;
pub mod sink;
pub mod store;
pub mod tracker;

pub use config::TrackerConfig;
pub use gate::{PermissionGate, StaticGate};
pub use provider::{sample_with_timeout, LocationProvider};
pub use sink::{NullSink, RenderSink};
pub use store::{init_store, MemoryRouteStore, RouteStore, SqliteRouteStore};
pub use tracker::RouteTracker;
