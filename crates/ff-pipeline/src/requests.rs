//! Stage request shapes. Field names are camelCase on the wire.

use ff_core::responses::KbSearchResult;
use serde::Deserialize;

use crate::error::StageError;

/// Reject a missing or blank field.
pub(crate) fn required<'a>(value: &'a str, field: &str) -> Result<&'a str, StageError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(StageError::invalid(format!("{field} is required")));
    }
    Ok(trimmed)
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    #[serde(default)]
    pub scenario: String,
    #[serde(default)]
    pub user_description: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub session_id: String,
    /// Relative to the media root.
    #[serde(default)]
    pub image_path: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KbSearchRequest {
    #[serde(default)]
    pub query: String,
    pub max_results: Option<usize>,
    /// When set, the hits replace the session's snapshots.
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRequest {
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub observation_id: String,
    #[serde(default)]
    pub kb_results: Vec<KbSearchResult>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetyRequest {
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub plan_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QaRequest {
    #[serde(default)]
    pub session_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrderRequest {
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub plan_id: String,
    /// Proceed even though the latest safety check failed.
    #[serde(default)]
    pub acknowledge_safety: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordEventRequest {
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub event_type: String,
    pub metadata: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn blank_is_rejected_and_value_is_trimmed() {
        assert!(matches!(required("  ", "sessionId"), Err(StageError::InvalidInput(m)) if m == "sessionId is required"));
        assert_eq!(required(" ses-1 ", "sessionId").unwrap(), "ses-1");
    }

    #[test]
    fn missing_fields_deserialize_to_blank() {
        let req: WorkOrderRequest = serde_json::from_value(json!({ "sessionId": "ses-1" })).unwrap();
        assert_eq!(req.plan_id, "");
        assert!(!req.acknowledge_safety);
    }

    #[test]
    fn kb_search_request_is_camel_case() {
        let req: KbSearchRequest =
            serde_json::from_value(json!({ "query": "pump leak", "maxResults": 3, "sessionId": "ses-1" }))
                .unwrap();
        assert_eq!(req.max_results, Some(3));
        assert_eq!(req.session_id.as_deref(), Some("ses-1"));
    }
}
