//! The route-tracking state machine.
//!
//! Owns the waypoint sequence, enforces the point cap, schedules periodic
//! sampling, and drives persistence and render notifications.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::interval;

use waytrace_core::{Coordinate, Route, TrackError, TrackingState};

use crate::config::TrackerConfig;
use crate::gate::PermissionGate;
use crate::provider::{sample_with_timeout, LocationProvider};
use crate::sink::RenderSink;
use crate::store::RouteStore;

/// Handle to a tracking session over a single route.
///
/// `initialize`, `stop`, and `reset` serialize on an internal lock; the
/// periodic sampler runs as a spawned task that re-checks a generation
/// counter before applying any result, so a sample racing `stop()` or
/// `reset()` is discarded rather than appended.
#[derive(Clone)]
pub struct RouteTracker {
    inner: Arc<Inner>,
}

struct Inner {
    config: TrackerConfig,
    gate: Arc<dyn PermissionGate>,
    provider: Arc<dyn LocationProvider>,
    store: Arc<dyn RouteStore>,
    sink: Arc<dyn RenderSink>,
    state: Mutex<State>,
}

struct State {
    route: Route,
    tracking: TrackingState,
    /// Bumped on stop/reset; a sampler holding an older generation must
    /// discard its result instead of applying it.
    generation: u64,
    sampler: Option<JoinHandle<()>>,
}

impl RouteTracker {
    pub fn new(
        config: TrackerConfig,
        gate: Arc<dyn PermissionGate>,
        provider: Arc<dyn LocationProvider>,
        store: Arc<dyn RouteStore>,
        sink: Arc<dyn RenderSink>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                config: config.normalized(),
                gate,
                provider,
                store,
                sink,
                state: Mutex::new(State {
                    route: Route::new(),
                    tracking: TrackingState::Idle,
                    generation: 0,
                    sampler: None,
                }),
            }),
        }
    }

    /// Load any persisted route, check permission, and begin sampling.
    ///
    /// A route already at capacity goes straight to [`TrackingState::Complete`]
    /// without touching the permission gate or the location provider. A
    /// denial leaves the tracker in [`TrackingState::AwaitingPermission`];
    /// calling `initialize` again retries the whole sequence.
    pub async fn initialize(&self) -> Result<TrackingState, TrackError> {
        start(&self.inner, true).await
    }

    /// Cancel the sampling schedule. No-op unless sampling is active.
    pub async fn stop(&self) {
        let mut state = self.inner.state.lock().await;
        halt_sampler(&mut state);
        if state.tracking == TrackingState::Sampling {
            state.tracking = TrackingState::Idle;
            tracing::info!("Tracking stopped with {} waypoints", state.route.len());
            self.inner.sink.on_tracking_stopped();
        }
    }

    /// Discard the route, purge storage, and start over.
    ///
    /// The caller is responsible for any user confirmation; this method
    /// assumes it was already given. Restarting goes back through the
    /// permission gate.
    pub async fn reset(&self) -> Result<TrackingState, TrackError> {
        {
            let mut state = self.inner.state.lock().await;
            halt_sampler(&mut state);
            if state.tracking == TrackingState::Sampling {
                self.inner.sink.on_tracking_stopped();
            }
            state.route.clear();
            state.tracking = TrackingState::Idle;
            if let Err(err) = self.inner.store.clear().await {
                let err = TrackError::from(err);
                tracing::warn!("Failed to clear stored route: {}", err);
                self.inner.sink.on_error(&err);
            }
            tracing::info!("Route reset");
        }
        start(&self.inner, false).await
    }

    /// Current lifecycle state.
    pub async fn state(&self) -> TrackingState {
        self.inner.state.lock().await.tracking
    }

    /// Snapshot of the recorded waypoints in arrival order.
    pub async fn waypoints(&self) -> Vec<Coordinate> {
        self.inner.state.lock().await.route.points().to_vec()
    }
}

fn halt_sampler(state: &mut State) {
    state.generation = state.generation.wrapping_add(1);
    if let Some(handle) = state.sampler.take() {
        handle.abort();
    }
}

async fn start(inner: &Arc<Inner>, hydrate: bool) -> Result<TrackingState, TrackError> {
    let generation = {
        let mut state = inner.state.lock().await;
        match state.tracking {
            TrackingState::Idle | TrackingState::AwaitingPermission => {}
            current => {
                tracing::debug!("initialize ignored while {:?}", current);
                return Ok(current);
            }
        }
        // Invalidate any stale sampler or in-flight start.
        halt_sampler(&mut state);
        state.generation
    };

    let hydrated = if hydrate {
        Some(load_route(inner.store.as_ref()).await)
    } else {
        None
    };

    {
        let mut state = inner.state.lock().await;
        if state.generation != generation {
            return Ok(state.tracking);
        }
        if let Some(route) = hydrated {
            state.route = route;
            // Replay so a freshly attached view can redraw the saved line.
            for (index, point) in state.route.points().iter().enumerate() {
                inner.sink.on_waypoint_added(*point, index);
            }
        }
        if state.route.len() >= inner.config.max_points {
            tracing::info!(
                "Stored route already complete with {} waypoints",
                state.route.len()
            );
            inner.finish(&mut state);
            return Ok(TrackingState::Complete);
        }
        state.tracking = TrackingState::AwaitingPermission;
    }

    if let Err(denied) = inner.gate.ensure_authorized().await {
        let err = TrackError::from(denied);
        tracing::warn!("{}", err);
        inner.sink.on_error(&err);
        return Err(err);
    }

    // First fix right away so the view can center before the first tick.
    let first = sample_with_timeout(inner.provider.as_ref(), inner.config.sample_timeout).await;

    let mut state = inner.state.lock().await;
    if state.generation != generation {
        return Ok(state.tracking);
    }
    match first {
        Ok(point) => inner.apply_sample(&mut state, point).await,
        Err(err) => {
            let err = TrackError::from(err);
            tracing::warn!("Initial position fix failed: {}", err);
            inner.sink.on_error(&err);
        }
    }

    if state.route.len() >= inner.config.max_points {
        inner.finish(&mut state);
        return Ok(TrackingState::Complete);
    }

    state.tracking = TrackingState::Sampling;
    tracing::info!(
        "Tracking started: {}/{} waypoints, sampling every {:?}",
        state.route.len(),
        inner.config.max_points,
        inner.config.sample_period
    );
    inner.sink.on_tracking_started();
    state.sampler = Some(tokio::spawn(run_sampler(inner.clone(), generation)));
    Ok(TrackingState::Sampling)
}

async fn load_route(store: &dyn RouteStore) -> Route {
    match store.load().await {
        Ok(Some(records)) => match Route::from_persisted(&records) {
            Ok(route) => route,
            Err(err) => {
                tracing::warn!("Stored route has an invalid coordinate, starting empty: {}", err);
                Route::new()
            }
        },
        Ok(None) => Route::new(),
        Err(err) => {
            tracing::warn!("Failed to read stored route, starting empty: {}", err);
            Route::new()
        }
    }
}

async fn run_sampler(inner: Arc<Inner>, generation: u64) {
    let mut ticker = interval(inner.config.sample_period);
    // An interval yields its first tick immediately; the immediate fix was
    // already taken at start, so consume it.
    ticker.tick().await;

    loop {
        ticker.tick().await;

        {
            let mut state = inner.state.lock().await;
            if state.generation != generation {
                return;
            }
            if state.route.len() >= inner.config.max_points {
                inner.finish(&mut state);
                return;
            }
        }

        let result =
            sample_with_timeout(inner.provider.as_ref(), inner.config.sample_timeout).await;

        let mut state = inner.state.lock().await;
        if state.generation != generation {
            // stop() or reset() raced this sample; discard the fix.
            return;
        }
        match result {
            Ok(point) => {
                inner.apply_sample(&mut state, point).await;
                if state.route.len() >= inner.config.max_points {
                    inner.finish(&mut state);
                    return;
                }
            }
            Err(err) => {
                tracing::warn!("Sample failed, schedule continues: {}", err);
            }
        }
    }
}

impl Inner {
    /// Append one fix, persist the whole route, and notify the sink.
    async fn apply_sample(&self, state: &mut State, point: Coordinate) {
        if state.route.len() >= self.config.max_points {
            return;
        }
        let index = state.route.push(point);
        tracing::debug!(
            "Waypoint {} recorded at ({}, {})",
            index + 1,
            point.lat(),
            point.lng()
        );
        if let Err(err) = self.store.save(&state.route.to_persisted()).await {
            // The in-memory route stays authoritative; the next successful
            // save writes the full sequence.
            let err = TrackError::from(err);
            tracing::warn!("Failed to persist route: {}", err);
            self.sink.on_error(&err);
        }
        self.sink.on_waypoint_added(point, index);
    }

    /// Terminal transition once the route is at capacity.
    fn finish(&self, state: &mut State) {
        if state.tracking == TrackingState::Complete {
            return;
        }
        if state.tracking == TrackingState::Sampling {
            self.sink.on_tracking_stopped();
        }
        state.tracking = TrackingState::Complete;
        if let Some(destination) = state.route.last() {
            tracing::info!(
                "Destination reached at ({}, {})",
                destination.lat(),
                destination.lng()
            );
            self.sink.on_destination_reached(destination);
        }
    }
}
