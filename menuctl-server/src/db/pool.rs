//! Database connection pool management
//!
//! Wraps sqlx `PgPool` with an explicit connection bound. The pool is
//! built lazily: nothing touches the network until the first `acquire()`,
//! which lets the startup gate own the first connection attempt.

use async_trait::async_trait;
use sqlx::pool::PoolConnection;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres};

use super::error::DbError;
use super::gate::ReadinessProbe;
use crate::config::DatabaseConfig;

/// Shared, bounded pool of Postgres connections.
///
/// Cheap to clone; every clone refers to the same underlying pool.
#[derive(Clone, Debug)]
pub struct DbPool {
    pool: PgPool,
}

impl DbPool {
    /// Build the pool without connecting.
    pub fn new(config: &DatabaseConfig) -> Self {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect_lazy_with(config.connect_options());

        tracing::debug!(
            target_db = %config.display_target(),
            max_connections = config.max_connections,
            "database pool configured"
        );

        Self { pool }
    }

    /// Wrap an existing sqlx pool.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Check out a connection, waiting if all `max_connections` are in use.
    ///
    /// The returned guard goes back to the pool when dropped, so release
    /// happens on success, error and unwind alike.
    pub async fn acquire(&self) -> Result<PoolConnection<Postgres>, DbError> {
        self.pool.acquire().await.map_err(DbError::Connection)
    }

    /// Return an explicitly held connection to the pool.
    pub fn release(&self, conn: PoolConnection<Postgres>) {
        drop(conn);
    }

    /// Number of open connections (idle + checked out).
    pub fn size(&self) -> u32 {
        self.pool.size()
    }

    /// Close all connections; pending and future acquires fail.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl ReadinessProbe for DbPool {
    async fn probe(&self) -> Result<(), DbError> {
        let conn = self.acquire().await?;
        self.release(conn);
        Ok(())
    }
}
