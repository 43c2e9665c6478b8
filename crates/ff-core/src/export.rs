//! Session export envelope.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{
    Event, KbSnapshot, Observation, Plan, QaResult, SafetyCheck, Session, WorkOrder,
};

/// Format version written into every export.
pub const EXPORT_VERSION: &str = "1.0";

/// A session and every record it owns. Events are in timeline order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub session: Session,
    pub observations: Vec<Observation>,
    pub kb_snapshots: Vec<KbSnapshot>,
    pub plans: Vec<Plan>,
    pub safety_checks: Vec<SafetyCheck>,
    pub qa_results: Vec<QaResult>,
    pub work_orders: Vec<WorkOrder>,
    pub events: Vec<Event>,
}

impl SessionRecord {
    /// Most recent QA result, if the gate has run.
    #[must_use]
    pub fn latest_qa(&self) -> Option<&QaResult> {
        self.qa_results.iter().max_by_key(|qa| qa.created_at)
    }
}

/// Self-describing JSON document for a full session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionExport {
    pub exported_at: DateTime<Utc>,
    pub version: String,
    pub session_id: String,
    pub data: SessionRecord,
}

impl SessionExport {
    #[must_use]
    pub fn new(data: SessionRecord, exported_at: DateTime<Utc>) -> Self {
        Self {
            exported_at,
            version: EXPORT_VERSION.to_string(),
            session_id: data.session.id.clone(),
            data,
        }
    }

    /// Attachment file name, `fieldfix_<session id>.json`.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("fieldfix_{}.json", self.session_id)
    }
}
