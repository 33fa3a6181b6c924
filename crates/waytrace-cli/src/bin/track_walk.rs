//! Run the route tracker end to end with a simulated walk.
//!
//! Samples a straight-line walk on the configured period, persists each
//! waypoint to the route database, and prints what the map layer would
//! render once tracking completes or ctrl-c is pressed.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use waytrace_cli::{MapView, SimulatedWalk, WalkPath};
use waytrace_core::TrackingState;
use waytrace_tracker::{init_store, RouteTracker, StaticGate, TrackerConfig};

/// Track a simulated walk and persist it as the current route
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Route database path
    #[arg(long, default_value = "data/waytrace.db", env = "WAYTRACE_DB")]
    db: String,

    /// Start latitude (default: Madrid)
    #[arg(long, default_value_t = 40.4168)]
    lat: f64,

    /// Start longitude (default: Madrid)
    #[arg(long, default_value_t = -3.7038)]
    lng: f64,

    /// End latitude
    #[arg(long, default_value_t = 40.4268)]
    end_lat: f64,

    /// End longitude
    #[arg(long, default_value_t = -3.6938)]
    end_lng: f64,

    /// Walking speed in meters per second
    #[arg(long, default_value_t = 1.4)]
    speed: f64,

    /// Route length at which tracking completes
    #[arg(long, default_value_t = 15)]
    max_points: usize,

    /// Seconds between samples
    #[arg(long, default_value_t = 60)]
    period_secs: u64,

    /// Per-sample timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,

    /// Discard any stored route before starting
    #[arg(long)]
    reset: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("waytrace_tracker=debug".parse()?),
        )
        .init();

    let args = Args::parse();

    let store = init_store(&args.db, 2).await?;

    let path = WalkPath::new(args.lat, args.lng, args.end_lat, args.end_lng, args.speed);
    tracing::info!("Simulating a {:.0} m walk", path.distance_m);
    let walk = SimulatedWalk::new(path, args.period_secs as f64);

    let view = Arc::new(MapView::new());
    let tracker = RouteTracker::new(
        TrackerConfig {
            max_points: args.max_points,
            sample_period: Duration::from_secs(args.period_secs),
            sample_timeout: Duration::from_secs(args.timeout_secs),
        },
        Arc::new(StaticGate::granted()),
        Arc::new(walk),
        Arc::new(store),
        view.clone(),
    );

    if args.reset {
        tracker.reset().await?;
    } else {
        tracker.initialize().await?;
    }

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracker.stop().await;
        }
        _ = wait_until_complete(&tracker) => {}
    }

    println!("Recorded {} waypoints:", tracker.waypoints().await.len());
    for (index, marker) in view.markers().iter().enumerate() {
        let position = marker.position;
        match &marker.label {
            Some(label) => println!(
                "  {:>2}. ({:.5}, {:.5})  [{}]",
                index + 1,
                position.lat(),
                position.lng(),
                label
            ),
            None => println!("  {:>2}. ({:.5}, {:.5})", index + 1, position.lat(), position.lng()),
        }
    }

    Ok(())
}

async fn wait_until_complete(tracker: &RouteTracker) {
    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    loop {
        ticker.tick().await;
        if tracker.state().await == TrackingState::Complete {
            return;
        }
    }
}
