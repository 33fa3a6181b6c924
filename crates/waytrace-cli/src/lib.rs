//! Demo tooling for the waytrace route tracker.
//!
//! Binaries:
//! - track_walk: runs the tracker end to end with a simulated walk
//! - show_route: prints the persisted route

pub mod sim;
pub mod view;

pub use sim::{SimulatedWalk, WalkPath};
pub use view::MapView;
