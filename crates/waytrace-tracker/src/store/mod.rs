//! Durable storage of the current route.

mod memory;
mod sqlite;

pub use memory::MemoryRouteStore;
pub use sqlite::{init_store, SqliteRouteStore, DEFAULT_ROUTE_NAME};

use async_trait::async_trait;

use waytrace_core::{PersistedRoute, StoreError};

/// Whole-route durable storage.
///
/// The stored payload is an ordered list of `{lat, lng}` records written
/// wholesale on every mutation; there is no incremental format.
#[async_trait]
pub trait RouteStore: Send + Sync {
    /// Load the stored route.
    ///
    /// `Ok(None)` when nothing was stored or the payload is malformed;
    /// `Err` only for storage-level failures.
    async fn load(&self) -> Result<Option<PersistedRoute>, StoreError>;

    /// Overwrite the stored route. A concurrent `load` observes either the
    /// previous or the new payload, never a partial write.
    async fn save(&self, route: &PersistedRoute) -> Result<(), StoreError>;

    /// Remove the stored route.
    async fn clear(&self) -> Result<(), StoreError>;
}
