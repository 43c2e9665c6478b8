//! # ff-db
//!
//! libSQL persistence for FieldFix.
//!
//! Holds every record a repair session owns: the session itself,
//! observations, KB snapshots, plans, safety checks, QA results, work orders,
//! and the append-only event log. Uses the `libsql` crate (v0.9.29) in local
//! mode; `":memory:"` gives an isolated store for tests.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;

#[cfg(test)]
mod test_support;

use error::DatabaseError;
use libsql::Builder;
use tokio::sync::{Mutex, MutexGuard};

pub use migrations::REQUIRED_TABLES;
pub use repos::kb_snapshot::NewKbSnapshot;
pub use repos::plan::unique_citations;
pub use repos::qa::NewQaResult;
pub use service::FieldService;

/// Database handle for FieldFix state.
///
/// Every session shares one connection. Callers lock it for the whole unit of
/// work, so a transaction never interleaves with another session's statements.
pub struct FieldDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: Mutex<libsql::Connection>,
}

impl FieldDb {
    /// Open a local database at the given path, running migrations.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let field_db = Self::open_local_unmigrated(path).await?;
        field_db.run_migrations().await?;
        Ok(field_db)
    }

    /// Open a local database without touching its schema.
    ///
    /// Repo calls against a database that was never migrated fail with
    /// `DatabaseError::SchemaMissing`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn open_local_unmigrated(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        Ok(Self {
            db,
            conn: Mutex::new(conn),
        })
    }

    /// Lock the connection. Hold the guard until the last row is read or the
    /// transaction is finished.
    pub async fn conn(&self) -> MutexGuard<'_, libsql::Connection> {
        self.conn.lock().await
    }

    /// Generate a prefixed ID via libSQL. Returns e.g., `"ses-a3f8b2c1"`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        let conn = self.conn().await;
        let mut rows = conn
            .query(
                &format!("SELECT '{prefix}-' || lower(hex(randomblob(4)))"),
                (),
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<String>(0)?)
    }

    /// Check that every FieldFix table exists.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::SchemaMissing` naming the first absent table.
    pub async fn schema_ready(&self) -> Result<(), DatabaseError> {
        let conn = self.conn().await;
        for table in REQUIRED_TABLES {
            let mut rows = conn
                .query(
                    "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
                    [table],
                )
                .await?;
            if rows.next().await?.is_none() {
                return Err(DatabaseError::SchemaMissing {
                    table: table.to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    async fn test_db() -> FieldDb {
        FieldDb::open_local(":memory:").await.unwrap()
    }

    #[tokio::test]
    async fn open_local_creates_schema() {
        let db = test_db().await;
        db.schema_ready().await.unwrap();
    }

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let db = test_db().await;
        db.run_migrations().await.unwrap();
        db.schema_ready().await.unwrap();
    }

    #[tokio::test]
    async fn unmigrated_db_reports_missing_schema() {
        let db = FieldDb::open_local_unmigrated(":memory:").await.unwrap();
        let err = db.schema_ready().await.unwrap_err();
        assert!(
            matches!(err, DatabaseError::SchemaMissing { ref table } if table == "sessions"),
            "unexpected error: {err}"
        );
    }

    #[tokio::test]
    async fn generate_id_correct_format() {
        let db = test_db().await;
        let id = db.generate_id("obs").await.unwrap();
        assert!(id.starts_with("obs-"), "ID should start with 'obs-': {id}");
        assert_eq!(id.len(), 12, "3 prefix + 1 dash + 8 hex: {id}");
        assert!(id[4..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[tokio::test]
    async fn generate_id_uniqueness() {
        let db = test_db().await;
        let mut ids = HashSet::new();
        for _ in 0..100 {
            ids.insert(db.generate_id("evt").await.unwrap());
        }
        assert_eq!(ids.len(), 100);
    }
}
