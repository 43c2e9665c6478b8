//! Database error types for ff-db.

use thiserror::Error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// The database has not been initialized with the FieldFix tables.
    #[error("Storage schema missing: table '{table}' does not exist")]
    SchemaMissing { table: String },

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Invalid state encountered (e.g., bad data in DB).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(libsql::Error),
}

impl From<libsql::Error> for DatabaseError {
    /// Missing tables surface as `SchemaMissing` so callers can report a setup
    /// problem rather than a generic failure.
    fn from(error: libsql::Error) -> Self {
        match missing_table(&error.to_string()) {
            Some(table) => Self::SchemaMissing { table },
            None => Self::LibSql(error),
        }
    }
}

/// Extract the table name from an SQLite `no such table: X` message.
fn missing_table(message: &str) -> Option<String> {
    let (_, rest) = message.split_once("no such table:")?;
    let table = rest
        .trim()
        .split(|c: char| c.is_whitespace() || c == ',' || c == ')' || c == '`' || c == '"')
        .find(|s| !s.is_empty())?;
    Some(table.rsplit('.').next().unwrap_or(table).to_string())
}
