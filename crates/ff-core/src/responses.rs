//! Stage response types.
//!
//! These structs define the JSON returned by each pipeline stage and printed
//! by the `fieldfix` commands. Field names are camelCase.

use serde::{Deserialize, Serialize};

use crate::contracts::PlanStep;
use crate::entities::{QaIssue, Session};
use crate::enums::{KbSource, QaSource};

/// A single ranked KB hit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KbSearchResult {
    pub id: String,
    pub title: String,
    pub snippet: String,
    pub source: KbSource,
    pub score: u32,
}

/// Response from the KB search stage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KbSearchResponse {
    pub results: Vec<KbSearchResult>,
}

/// Response from session creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionCreateResponse {
    pub session: Session,
}

/// Response from the Analyze stage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub observation_id: String,
    pub equipment_type: String,
    pub problem_summary: String,
    pub risk_flags: Vec<String>,
    pub environmental_notes: Option<String>,
    pub used_mock: bool,
}

/// Response from the Plan stage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlanResponse {
    pub plan_id: String,
    pub steps: Vec<PlanStep>,
    pub used_fallback: bool,
}

/// Response from the Safety stage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SafetyResponse {
    pub safety_check_id: String,
    pub pass: bool,
    pub ppe_required: Vec<String>,
    pub hazards: Vec<String>,
    pub required_presteps: Vec<String>,
}

/// QA verdict as surfaced to callers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QaVerdict {
    pub pass: bool,
    pub issues: Vec<QaIssue>,
    pub source: QaSource,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommendations: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

/// Response from the QA stage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QaResponse {
    pub qa_result_id: String,
    pub qa: QaVerdict,
}

/// Response from the WorkOrder stage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrderResponse {
    pub work_order_id: String,
    pub work_order_number: String,
    pub summary: String,
    pub parts: Vec<String>,
    pub estimated_time: f64,
}

/// Timing summary derived from a session's event log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionMetrics {
    pub session_id: String,
    pub analyze_latency_secs: Option<i64>,
    pub plan_latency_secs: Option<i64>,
    pub end_to_end_secs: Option<i64>,
    pub total_events: usize,
    /// Manual diagnosis + planning baseline the run is compared against.
    pub baseline_minutes: f64,
    pub time_saved_minutes: Option<f64>,
    pub efficiency_gain_pct: Option<f64>,
}
