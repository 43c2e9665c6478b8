use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Structured result of image analysis. Immutable once stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    pub id: String,
    pub session_id: String,
    pub equipment_type: String,
    pub problem_summary: String,
    pub risk_flags: Vec<String>,
    pub environmental_notes: Option<String>,
    /// Image path as given to the Analyze stage.
    pub image_path: Option<String>,
    /// True when the scenario's canned observation stood in for the model.
    pub used_mock: bool,
    pub created_at: DateTime<Utc>,
}
