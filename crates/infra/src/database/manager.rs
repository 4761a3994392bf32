//! Database connection manager backed by an r2d2 SQLite pool.

use std::path::{Path, PathBuf};

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use settler_domain::{Result, SettlerError};
use tracing::info;

const DEFAULT_POOL_SIZE: u32 = 4;

/// Database manager that wraps a [`Pool`] of SQLite connections.
pub struct DbManager {
    pool: Pool<SqliteConnectionManager>,
    path: PathBuf,
}

impl DbManager {
    /// Open (or create) the database at `db_path` and build the pool.
    ///
    /// # Errors
    /// Returns `SettlerError::Database` when the pool cannot be built,
    /// typically because the path is not writable.
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let path = db_path.as_ref().to_path_buf();
        let manager = SqliteConnectionManager::file(&path);
        let pool = Pool::builder()
            .max_size(DEFAULT_POOL_SIZE)
            .build(manager)
            .map_err(|err| SettlerError::Database(format!("cannot open {}: {err}", path.display())))?;

        info!(db_path = %path.display(), max_connections = DEFAULT_POOL_SIZE, "sqlite pool initialised");

        Ok(Self { pool, path })
    }

    /// Acquire a connection from the pool.
    pub fn get_connection(&self) -> Result<PooledConnection<SqliteConnectionManager>> {
        self.pool
            .get()
            .map_err(|err| SettlerError::Database(format!("connection pool exhausted: {err}")))
    }

    /// Return the configured database path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Verify database connectivity with a trivial query.
    pub fn health_check(&self) -> Result<()> {
        let conn = self.get_connection()?;
        conn.query_row("SELECT 1", [], |row| row.get::<_, i32>(0))
            .map_err(|err| SettlerError::Database(err.to_string()))?;
        Ok(())
    }
}
