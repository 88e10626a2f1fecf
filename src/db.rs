use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::config::CONFIG;
use crate::error::SearchError;

/// Main database wrapper owning the Postgres connection pool.
///
/// Constructed once by the process entry point and handed by clone to every
/// component that needs it; `PgPool` is an `Arc` internally, so clones share
/// the same physical pool. Connections are borrowed per statement and
/// returned when the row stream is dropped, including on cancellation.
#[derive(Debug, Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new Database instance with a custom connection URI.
    /// Useful for testing against a different database.
    pub async fn connect(uri: &str) -> Result<Self, SearchError> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(uri)
            .await
            .map_err(SearchError::Connection)?;

        // Ping the database to verify the store is actually reachable;
        // startup must abort before the server accepts any request.
        sqlx::query("SELECT 1")
            .execute(&pool)
            .await
            .map_err(SearchError::Connection)?;

        log::info!("Connected to Postgres");

        Ok(Self { pool })
    }

    /// Create a Database instance using environment configuration.
    pub async fn from_config() -> Result<Self, SearchError> {
        Self::connect(&CONFIG.database_url).await
    }

    /// Get the underlying pool (for statement execution).
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Close the pool, releasing all held connections. Called once on every
    /// exit path of the process; safe with in-flight borrows (they drain).
    pub async fn close(&self) {
        self.pool.close().await;
        log::info!("Database pool closed");
    }
}
