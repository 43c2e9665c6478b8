use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::SessionStatus;

/// One end-to-end repair workflow run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    /// Scenario tag, e.g. `scenario3`. Keys mock observations and fallback plans.
    pub scenario: String,
    pub user_description: String,
    pub status: SessionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
