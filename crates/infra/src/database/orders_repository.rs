//! SQLite-backed orders repository
//!
//! Applies compensation and sale-price-correction updates to the local
//! orders table. Updates are idempotent: re-running a month rewrites the
//! same values into the same rows. A missing order is a row count of zero,
//! never an error, because invoices routinely reference orders placed
//! through other channels.

use std::sync::Arc;

use async_trait::async_trait;
use rusqlite::params;
use settler_core::ports::OrdersRepository;
use settler_domain::{Result, SettlerError};
use tokio::task;

use super::manager::DbManager;

const COMPENSATION_SQL: &str = "UPDATE orders
     SET compensated = 1, compensated_amount = ?1, compensated_date = ?2
     WHERE orderid = ?3";

const RETURN_CORRECTION_SQL: &str = "UPDATE orders
     SET return_correction = 1, return_correction_amount = ?1, return_correction_date = ?2
     WHERE orderid = ?3";

/// SQLite-based orders repository
pub struct SqliteOrdersRepository {
    db: Arc<DbManager>,
}

impl SqliteOrdersRepository {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }

    async fn run_update(
        &self,
        sql: &'static str,
        order_id: &str,
        amount: f64,
        date: &str,
    ) -> Result<u64> {
        let db = Arc::clone(&self.db);
        let order_id = order_id.to_string();
        let date = date.to_string();

        task::spawn_blocking(move || -> Result<u64> {
            let conn = db.get_connection()?;
            let affected = conn
                .execute(sql, params![amount, date, order_id])
                .map_err(|err| SettlerError::Database(err.to_string()))?;
            Ok(affected as u64)
        })
        .await
        .map_err(|err| SettlerError::Internal(format!("database task panicked: {err}")))?
    }
}

#[async_trait]
impl OrdersRepository for SqliteOrdersRepository {
    async fn apply_compensation(&self, order_id: &str, amount: f64, date: &str) -> Result<u64> {
        self.run_update(COMPENSATION_SQL, order_id, amount, date).await
    }

    async fn apply_return_correction(
        &self,
        order_id: &str,
        amount: f64,
        date: &str,
    ) -> Result<u64> {
        self.run_update(RETURN_CORRECTION_SQL, order_id, amount, date).await
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn repository(temp_dir: &TempDir) -> SqliteOrdersRepository {
        let db = Arc::new(DbManager::new(temp_dir.path().join("orders.db")).expect("db manager"));
        {
            let conn = db.get_connection().expect("connection");
            conn.execute_batch(
                "CREATE TABLE orders (
                     orderid TEXT PRIMARY KEY,
                     compensated INTEGER NOT NULL DEFAULT 0,
                     compensated_amount REAL,
                     compensated_date TEXT,
                     return_correction INTEGER NOT NULL DEFAULT 0,
                     return_correction_amount REAL,
                     return_correction_date TEXT
                 );
                 INSERT INTO orders (orderid) VALUES ('2515054043_ADE'), ('1043946570_TB');",
            )
            .expect("schema created");
        }
        SqliteOrdersRepository::new(db)
    }

    fn order_row(repo: &SqliteOrdersRepository, order_id: &str) -> (i64, Option<f64>, i64) {
        let conn = repo.db.get_connection().expect("connection");
        conn.query_row(
            "SELECT compensated, compensated_amount, return_correction
             FROM orders WHERE orderid = ?1",
            params![order_id],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )
        .expect("order row")
    }

    #[tokio::test]
    async fn compensation_updates_only_the_compensation_fields() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repository(&temp_dir);

        let affected =
            repo.apply_compensation("2515054043_ADE", 12.5, "2023-12-05").await.unwrap();
        assert_eq!(affected, 1);

        let (compensated, amount, return_correction) = order_row(&repo, "2515054043_ADE");
        assert_eq!(compensated, 1);
        assert_eq!(amount, Some(12.5));
        assert_eq!(return_correction, 0);
    }

    #[tokio::test]
    async fn return_correction_does_not_touch_compensation_fields() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repository(&temp_dir);

        let affected =
            repo.apply_return_correction("1043946570_TB", -4.95, "2023-12-10").await.unwrap();
        assert_eq!(affected, 1);

        let (compensated, amount, return_correction) = order_row(&repo, "1043946570_TB");
        assert_eq!(compensated, 0);
        assert_eq!(amount, None);
        assert_eq!(return_correction, 1);
    }

    #[tokio::test]
    async fn unknown_order_affects_zero_rows_without_error() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repository(&temp_dir);

        let affected = repo.apply_compensation("9999999999_XX", 1.0, "2023-12-05").await.unwrap();
        assert_eq!(affected, 0);
    }

    #[tokio::test]
    async fn reapplying_the_same_update_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repository(&temp_dir);

        repo.apply_compensation("2515054043_ADE", 7.25, "2023-12-05").await.unwrap();
        let affected =
            repo.apply_compensation("2515054043_ADE", 7.25, "2023-12-05").await.unwrap();
        assert_eq!(affected, 1);

        let (compensated, amount, _) = order_row(&repo, "2515054043_ADE");
        assert_eq!(compensated, 1);
        assert_eq!(amount, Some(7.25));
    }

    #[tokio::test]
    async fn missing_table_surfaces_as_database_error() {
        let temp_dir = TempDir::new().unwrap();
        let db = Arc::new(DbManager::new(temp_dir.path().join("empty.db")).unwrap());
        let repo = SqliteOrdersRepository::new(db);

        let err = repo.apply_compensation("2515054043_ADE", 1.0, "2023-12-05").await.unwrap_err();
        assert!(matches!(err, SettlerError::Database(_)));
    }
}
