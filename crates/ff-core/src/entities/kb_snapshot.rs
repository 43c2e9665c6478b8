use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::KbSource;

/// Point-in-time copy of a KB hit, scoped to a session.
///
/// The snapshot set of a session is the citation allow-list for its plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KbSnapshot {
    pub id: String,
    pub session_id: String,
    pub source: KbSource,
    pub kb_id: String,
    pub title: String,
    pub snippet: String,
    /// The full corpus record at retrieval time.
    pub raw: serde_json::Value,
    pub created_at: DateTime<Utc>,
}
