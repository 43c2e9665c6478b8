//! KB snapshot repository.
//!
//! A session's snapshots are replaced wholesale on each search: the old set is
//! deleted and the new hits inserted inside one transaction.

use chrono::Utc;

use ff_core::entities::KbSnapshot;
use ff_core::enums::KbSource;
use ff_core::ids::PREFIX_KB_SNAPSHOT;

use crate::error::DatabaseError;
use crate::helpers::{parse_datetime, parse_enum, parse_json, to_json_text};
use crate::service::FieldService;

/// A KB hit to persist as a snapshot.
#[derive(Debug, Clone)]
pub struct NewKbSnapshot {
    pub source: KbSource,
    pub kb_id: String,
    pub title: String,
    pub snippet: String,
    pub raw: serde_json::Value,
}

fn row_to_snapshot(row: &libsql::Row) -> Result<KbSnapshot, DatabaseError> {
    Ok(KbSnapshot {
        id: row.get::<String>(0)?,
        session_id: row.get::<String>(1)?,
        source: parse_enum(&row.get::<String>(2)?)?,
        kb_id: row.get::<String>(3)?,
        title: row.get::<String>(4)?,
        snippet: row.get::<String>(5)?,
        raw: parse_json(&row.get::<String>(6)?)?,
        created_at: parse_datetime(&row.get::<String>(7)?)?,
    })
}

impl FieldService {
    /// Delete every snapshot of the session, then insert `hits`, atomically.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if any statement fails; the previous set is
    /// left intact in that case.
    pub async fn replace_kb_snapshots(
        &self,
        session_id: &str,
        hits: &[NewKbSnapshot],
    ) -> Result<Vec<KbSnapshot>, DatabaseError> {
        let now = Utc::now();
        let mut ids = Vec::with_capacity(hits.len());
        for _ in hits {
            ids.push(self.db().generate_id(PREFIX_KB_SNAPSHOT).await?);
        }

        let conn = self.db().conn().await;
        let tx = conn.transaction().await?;
        let written = async {
            tx.execute(
                "DELETE FROM kb_snapshots WHERE session_id = ?1",
                [session_id],
            )
            .await?;
            for (id, hit) in ids.iter().zip(hits) {
                tx.execute(
                    "INSERT INTO kb_snapshots (id, session_id, source, kb_id, title, snippet, raw, created_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                    libsql::params![
                        id.as_str(),
                        session_id,
                        hit.source.as_str(),
                        hit.kb_id.as_str(),
                        hit.title.as_str(),
                        hit.snippet.as_str(),
                        to_json_text(&hit.raw)?,
                        now.to_rfc3339()
                    ],
                )
                .await?;
            }
            Ok::<_, DatabaseError>(())
        }
        .await;
        match written {
            Ok(()) => tx.commit().await?,
            Err(error) => {
                tx.rollback().await?;
                return Err(error);
            }
        }
        drop(conn);

        Ok(ids
            .into_iter()
            .zip(hits)
            .map(|(id, hit)| KbSnapshot {
                id,
                session_id: session_id.to_string(),
                source: hit.source,
                kb_id: hit.kb_id.clone(),
                title: hit.title.clone(),
                snippet: hit.snippet.clone(),
                raw: hit.raw.clone(),
                created_at: now,
            })
            .collect())
    }

    /// Snapshots for a session, in retrieval (rank) order.
    pub async fn list_kb_snapshots(&self, session_id: &str) -> Result<Vec<KbSnapshot>, DatabaseError> {
        let conn = self.db().conn().await;
        let mut rows = conn
            .query(
                "SELECT id, session_id, source, kb_id, title, snippet, raw, created_at
                 FROM kb_snapshots WHERE session_id = ?1 ORDER BY rowid ASC",
                [session_id],
            )
            .await?;

        let mut snapshots = Vec::new();
        while let Some(row) = rows.next().await? {
            snapshots.push(row_to_snapshot(&row)?);
        }
        Ok(snapshots)
    }
}
