//! In-memory route storage for tests and ephemeral sessions.

use std::sync::Mutex;

use async_trait::async_trait;
use tracing::warn;

use waytrace_core::{PersistedRoute, StoreError};

use super::RouteStore;

/// Route storage held in process memory as the serialized payload, so it
/// exercises the same encode/decode path as the durable store.
#[derive(Debug, Default)]
pub struct MemoryRouteStore {
    payload: Mutex<Option<String>>,
}

impl MemoryRouteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the stored payload directly, e.g. with a malformed body.
    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            payload: Mutex::new(Some(payload.into())),
        }
    }
}

#[async_trait]
impl RouteStore for MemoryRouteStore {
    async fn load(&self) -> Result<Option<PersistedRoute>, StoreError> {
        let guard = self
            .payload
            .lock()
            .map_err(|_| StoreError::new("payload lock poisoned"))?;

        let Some(payload) = guard.as_ref() else {
            return Ok(None);
        };

        match serde_json::from_str(payload) {
            Ok(route) => Ok(Some(route)),
            Err(err) => {
                warn!("Stored route payload is malformed, treating as absent: {}", err);
                Ok(None)
            }
        }
    }

    async fn save(&self, route: &PersistedRoute) -> Result<(), StoreError> {
        let payload = serde_json::to_string(route).map_err(StoreError::new)?;
        let mut guard = self
            .payload
            .lock()
            .map_err(|_| StoreError::new("payload lock poisoned"))?;
        *guard = Some(payload);
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        let mut guard = self
            .payload
            .lock()
            .map_err(|_| StoreError::new("payload lock poisoned"))?;
        *guard = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waytrace_core::PointRecord;

    #[tokio::test]
    async fn round_trips_and_clears() {
        let store = MemoryRouteStore::new();
        assert_eq!(store.load().await.unwrap(), None);

        let route = vec![PointRecord { lat: 10.0, lng: 20.0 }];
        store.save(&route).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(route));

        store.clear().await.unwrap();
        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn malformed_payload_reads_as_absent() {
        let store = MemoryRouteStore::with_payload("{\"lat\": oops");
        assert_eq!(store.load().await.unwrap(), None);
    }
}
