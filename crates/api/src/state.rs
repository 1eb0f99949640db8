use std::sync::Arc;

use campus_db::store::PgStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the pool is reference counted and the config sits
/// behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: campus_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Catalog and user directory over the shared pool, handed to the
    /// `campus-core` operations.
    pub fn store(&self) -> PgStore {
        PgStore::new(self.pool.clone())
    }
}
