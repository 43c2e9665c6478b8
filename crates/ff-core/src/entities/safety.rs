use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Deterministic safety assessment of a plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SafetyCheck {
    pub id: String,
    pub session_id: String,
    pub plan_id: String,
    pub pass: bool,
    pub ppe_required: Vec<String>,
    pub hazards: Vec<String>,
    pub required_presteps: Vec<String>,
    pub created_at: DateTime<Utc>,
}
