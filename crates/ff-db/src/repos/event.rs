//! Append-only event log.
//!
//! Events are never updated or deleted on their own; they go away only with
//! their session. Ordering is timestamp first, then insertion sequence, so
//! events written within the same clock tick keep their append order.

use chrono::Utc;

use ff_core::entities::Event;
use ff_core::enums::EventType;
use ff_core::ids::PREFIX_EVENT;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime, parse_enum, parse_optional_json, to_json_text};
use crate::service::FieldService;

fn row_to_event(row: &libsql::Row) -> Result<Event, DatabaseError> {
    Ok(Event {
        id: row.get::<String>(0)?,
        session_id: row.get::<String>(1)?,
        event_type: parse_enum(&row.get::<String>(2)?)?,
        timestamp: parse_datetime(&row.get::<String>(3)?)?,
        metadata: parse_optional_json(get_opt_string(row, 4)?.as_deref())?,
    })
}

impl FieldService {
    /// Append an event to a session's trail.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the insert fails (e.g. unknown session).
    pub async fn append_event(
        &self,
        session_id: &str,
        event_type: EventType,
        metadata: Option<serde_json::Value>,
    ) -> Result<Event, DatabaseError> {
        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_EVENT).await?;
        let metadata_text = metadata.as_ref().map(to_json_text).transpose()?;

        self.db()
            .conn()
            .await
            .execute(
                "INSERT INTO events (id, session_id, event_type, timestamp, metadata)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                libsql::params![
                    id.as_str(),
                    session_id,
                    event_type.as_str(),
                    now.to_rfc3339(),
                    metadata_text
                ],
            )
            .await?;

        tracing::debug!(session_id, event = %event_type, "event appended");

        Ok(Event {
            id,
            session_id: session_id.to_string(),
            event_type,
            timestamp: now,
            metadata,
        })
    }

    /// Events for a session in append order.
    pub async fn list_events(&self, session_id: &str) -> Result<Vec<Event>, DatabaseError> {
        let conn = self.db().conn().await;
        let mut rows = conn
            .query(
                "SELECT id, session_id, event_type, timestamp, metadata FROM events
                 WHERE session_id = ?1 ORDER BY timestamp ASC, seq ASC",
                [session_id],
            )
            .await?;

        let mut events = Vec::new();
        while let Some(row) = rows.next().await? {
            events.push(row_to_event(&row)?);
        }
        Ok(events)
    }
}
