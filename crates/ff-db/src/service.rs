//! Service layer hosting every repo method.
//!
//! `FieldService` wraps `FieldDb`. All repo methods are implemented as
//! `impl FieldService` blocks under `repos/`.

use crate::FieldDb;
use crate::error::DatabaseError;

/// Store for FieldFix sessions and everything they own.
pub struct FieldService {
    db: FieldDb,
}

impl FieldService {
    /// Open a local database, migrating it when `auto_migrate` is set.
    ///
    /// # Arguments
    ///
    /// * `db_path` - Path to the libSQL database file, or `":memory:"` for tests.
    /// * `auto_migrate` - Apply embedded migrations on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or migrated.
    pub async fn new_local(db_path: &str, auto_migrate: bool) -> Result<Self, DatabaseError> {
        let db = if auto_migrate {
            FieldDb::open_local(db_path).await?
        } else {
            FieldDb::open_local_unmigrated(db_path).await?
        };
        Ok(Self { db })
    }

    /// Create from an existing `FieldDb`.
    #[must_use]
    pub const fn from_db(db: FieldDb) -> Self {
        Self { db }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &FieldDb {
        &self.db
    }
}
