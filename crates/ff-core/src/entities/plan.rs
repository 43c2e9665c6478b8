use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::contracts::PlanStep;

/// Ordered repair plan for a session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: String,
    pub session_id: String,
    pub observation_id: String,
    pub steps: Vec<PlanStep>,
    /// Unique citation ids across all steps, in first-seen order.
    pub kb_ids_used: Vec<String>,
    /// True when the static scenario plan replaced generation.
    pub used_fallback: bool,
    pub created_at: DateTime<Utc>,
}

impl Plan {
    /// All step actions joined by a space, the text the rule engines scan.
    #[must_use]
    pub fn action_text(&self) -> String {
        self.steps
            .iter()
            .map(|s| s.action.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// `steps` wrapped as `{"steps": [...]}`, the canonical plan document.
    #[must_use]
    pub fn steps_document(&self) -> serde_json::Value {
        serde_json::json!({ "steps": self.steps })
    }
}
