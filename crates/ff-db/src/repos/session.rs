//! Session repository.
//!
//! Sessions are the ownership root: creation, lookup, status transitions,
//! listing, and scenario-based recall of earlier runs.

use chrono::Utc;

use ff_core::entities::Session;
use ff_core::enums::SessionStatus;
use ff_core::ids::PREFIX_SESSION;

use crate::error::DatabaseError;
use crate::helpers::{parse_datetime, parse_enum};
use crate::service::FieldService;

const SESSION_COLUMNS: &str = "id, scenario, user_description, status, created_at, updated_at";

fn row_to_session(row: &libsql::Row) -> Result<Session, DatabaseError> {
    Ok(Session {
        id: row.get::<String>(0)?,
        scenario: row.get::<String>(1)?,
        user_description: row.get::<String>(2)?,
        status: parse_enum(&row.get::<String>(3)?)?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
        updated_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

impl FieldService {
    /// Create a session in `created` status.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the insert fails.
    pub async fn create_session(
        &self,
        scenario: &str,
        user_description: &str,
    ) -> Result<Session, DatabaseError> {
        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_SESSION).await?;

        self.db()
            .conn()
            .await
            .execute(
                "INSERT INTO sessions (id, scenario, user_description, status, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                libsql::params![
                    id.as_str(),
                    scenario,
                    user_description,
                    SessionStatus::Created.as_str(),
                    now.to_rfc3339(),
                    now.to_rfc3339()
                ],
            )
            .await?;

        Ok(Session {
            id,
            scenario: scenario.to_string(),
            user_description: user_description.to_string(),
            status: SessionStatus::Created,
            created_at: now,
            updated_at: now,
        })
    }

    /// Get a session by ID.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the session does not exist.
    pub async fn get_session(&self, id: &str) -> Result<Session, DatabaseError> {
        let conn = self.db().conn().await;
        let mut rows = conn
            .query(
                &format!("SELECT {SESSION_COLUMNS} FROM sessions WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_session(&row)
    }

    /// Write a new status. Transition rules are checked by the caller.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the session does not exist.
    pub async fn set_session_status(
        &self,
        id: &str,
        status: SessionStatus,
    ) -> Result<Session, DatabaseError> {
        let now = Utc::now();
        let changed = self
            .db()
            .conn()
            .await
            .execute(
                "UPDATE sessions SET status = ?1, updated_at = ?2 WHERE id = ?3",
                libsql::params![status.as_str(), now.to_rfc3339(), id],
            )
            .await?;
        if changed == 0 {
            return Err(DatabaseError::NoResult);
        }
        self.get_session(id).await
    }

    /// Newest sessions first.
    pub async fn list_sessions(&self, limit: u32) -> Result<Vec<Session>, DatabaseError> {
        let conn = self.db().conn().await;
        let mut rows = conn
            .query(
                &format!(
                    "SELECT {SESSION_COLUMNS} FROM sessions ORDER BY created_at DESC, rowid DESC LIMIT ?1"
                ),
                libsql::params![i64::from(limit)],
            )
            .await?;

        let mut sessions = Vec::new();
        while let Some(row) = rows.next().await? {
            sessions.push(row_to_session(&row)?);
        }
        Ok(sessions)
    }

    /// Earlier sessions with the same scenario tag, newest first.
    pub async fn similar_sessions(
        &self,
        session_id: &str,
        scenario: &str,
        limit: u32,
    ) -> Result<Vec<Session>, DatabaseError> {
        let conn = self.db().conn().await;
        let mut rows = conn
            .query(
                &format!(
                    "SELECT {SESSION_COLUMNS} FROM sessions
                     WHERE scenario = ?1 AND id != ?2
                     ORDER BY created_at DESC, rowid DESC LIMIT ?3"
                ),
                libsql::params![scenario, session_id, i64::from(limit)],
            )
            .await?;

        let mut sessions = Vec::new();
        while let Some(row) = rows.next().await? {
            sessions.push(row_to_session(&row)?);
        }
        Ok(sessions)
    }
}
