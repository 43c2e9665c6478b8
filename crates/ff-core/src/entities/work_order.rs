use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Terminal artifact of a repair session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrder {
    pub id: String,
    pub session_id: String,
    pub plan_id: String,
    /// `WO-` followed by six digits.
    pub work_order_number: String,
    pub summary: String,
    pub parts: Vec<String>,
    /// Sum of step durations, in minutes.
    pub estimated_time: f64,
    pub created_at: DateTime<Utc>,
}
