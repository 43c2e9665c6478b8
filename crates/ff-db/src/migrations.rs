//! Database migration runner.
//!
//! Embeds the SQL migration files at compile time and executes them on
//! database open. All statements use `IF NOT EXISTS` for idempotent re-running.

use crate::FieldDb;
use crate::error::DatabaseError;

/// Initial schema: 8 tables, 8 indexes.
const MIGRATION_001: &str = include_str!("../migrations/001_initial.sql");

/// Tables every repo expects, checked by [`FieldDb::schema_ready`].
pub const REQUIRED_TABLES: [&str; 8] = [
    "sessions",
    "observations",
    "kb_snapshots",
    "plans",
    "safety_checks",
    "qa_results",
    "work_orders",
    "events",
];

impl FieldDb {
    /// Run all embedded migrations in sequence.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Migration` naming the migration that failed.
    pub async fn run_migrations(&self) -> Result<(), DatabaseError> {
        self.conn()
            .await
            .execute_batch(MIGRATION_001)
            .await
            .map_err(|e| DatabaseError::Migration(format!("001_initial: {e}")))?;
        Ok(())
    }
}
