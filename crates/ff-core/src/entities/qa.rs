use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::{QaIssueKind, QaSource};

/// A single problem found by the QA gate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QaIssue {
    #[serde(rename = "type")]
    pub kind: QaIssueKind,
    pub detail: String,
    /// Step number the issue refers to, `None` for plan-level issues.
    pub step_n: Option<u32>,
}

impl QaIssue {
    #[must_use]
    pub fn new(kind: QaIssueKind, detail: impl Into<String>, step_n: Option<u32>) -> Self {
        Self {
            kind,
            detail: detail.into(),
            step_n,
        }
    }
}

/// Outcome of the QA gate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QaResult {
    pub id: String,
    pub session_id: String,
    pub plan_id: String,
    pub pass: bool,
    pub issues: Vec<QaIssue>,
    pub recommendations: Vec<String>,
    pub score: Option<f64>,
    pub source: QaSource,
    pub created_at: DateTime<Utc>,
}
