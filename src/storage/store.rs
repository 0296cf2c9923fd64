//! `SchemaStore`: the persistence collaborator handed to the server and CLI.

use std::path::Path;

use sqlx::SqlitePool;

use super::insert::{fetch_report, upsert_logo, upsert_report, StoredReport};
use super::pool::init_db_pool_with_path;
use crate::error_handling::DatabaseError;
use crate::schema::SchemaReport;

/// Report store backed by a SQLite pool. Cloning shares the pool.
#[derive(Debug, Clone)]
pub struct SchemaStore {
    pool: SqlitePool,
}

impl SchemaStore {
    /// Opens (creating if needed) the database at `path` and applies migrations.
    pub async fn open(path: &Path) -> Result<Self, DatabaseError> {
        Ok(Self {
            pool: init_db_pool_with_path(path).await?,
        })
    }

    /// Wraps an existing pool. Migrations must already have been run.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// The underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// See [`upsert_report`].
    pub async fn upsert_report(
        &self,
        site_id: &str,
        report: &SchemaReport,
    ) -> Result<(), DatabaseError> {
        upsert_report(&self.pool, site_id, report).await
    }

    /// See [`upsert_logo`].
    pub async fn upsert_logo(&self, site_id: &str, logo: Option<&str>) -> Result<(), DatabaseError> {
        upsert_logo(&self.pool, site_id, logo).await
    }

    /// See [`fetch_report`].
    pub async fn fetch_report(&self, site_id: &str) -> Result<Option<StoredReport>, DatabaseError> {
        fetch_report(&self.pool, site_id).await
    }
}
