//! SQLite-backed route storage.

use std::path::Path;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tracing::{info, warn};

use waytrace_core::{PersistedRoute, StoreError};

use super::RouteStore;

/// Row name under which the single active route is stored.
pub const DEFAULT_ROUTE_NAME: &str = "current";

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS routes (
    name TEXT PRIMARY KEY,
    points TEXT NOT NULL,
    updated_at TEXT NOT NULL
)";

/// Route storage as one SQLite row per route name, the points column
/// holding the serialized record list.
#[derive(Clone)]
pub struct SqliteRouteStore {
    pool: SqlitePool,
    name: String,
}

/// Open the route database at `db_path`, creating file and schema if
/// needed, and return a store bound to the default route name.
pub async fn init_store(db_path: &str, max_connections: u32) -> Result<SqliteRouteStore, StoreError> {
    // Ensure parent directory exists
    if let Some(parent) = Path::new(db_path).parent() {
        std::fs::create_dir_all(parent).map_err(StoreError::new)?;
    }

    let db_url = format!("sqlite:{}?mode=rwc", db_path);

    info!("Opening route database: {}", db_path);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect(&db_url)
        .await
        .map_err(StoreError::new)?;

    sqlx::query(SCHEMA)
        .execute(&pool)
        .await
        .map_err(StoreError::new)?;

    Ok(SqliteRouteStore::new(pool, DEFAULT_ROUTE_NAME))
}

impl SqliteRouteStore {
    pub fn new(pool: SqlitePool, name: impl Into<String>) -> Self {
        Self {
            pool,
            name: name.into(),
        }
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl RouteStore for SqliteRouteStore {
    async fn load(&self) -> Result<Option<PersistedRoute>, StoreError> {
        let row: Option<(String,)> = sqlx::query_as("SELECT points FROM routes WHERE name = ?1")
            .bind(&self.name)
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::new)?;

        let Some((points,)) = row else {
            return Ok(None);
        };

        match serde_json::from_str(&points) {
            Ok(route) => Ok(Some(route)),
            Err(err) => {
                warn!("Stored route payload is malformed, treating as absent: {}", err);
                Ok(None)
            }
        }
    }

    async fn save(&self, route: &PersistedRoute) -> Result<(), StoreError> {
        let points = serde_json::to_string(route).map_err(StoreError::new)?;

        // Single-statement upsert: a concurrent load sees the old row or
        // the new one, never a partial write.
        sqlx::query(
            r#"
            INSERT INTO routes (name, points, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(name) DO UPDATE SET
                points = ?2, updated_at = ?3
            "#,
        )
        .bind(&self.name)
        .bind(&points)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(StoreError::new)?;

        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM routes WHERE name = ?1")
            .bind(&self.name)
            .execute(&self.pool)
            .await
            .map_err(StoreError::new)?;

        Ok(())
    }
}
