//! Stage-output contracts.
//!
//! These are the shapes parsed generator output (or deterministic fallback
//! data) must satisfy before a stage trusts it. Wire names are camelCase to
//! match the JSON the prompts ask for. The schemars attributes carry the
//! structural constraints; `ff-schema` turns them into validators.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Structured output of image analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ObservationPayload {
    #[schemars(length(min = 1))]
    pub equipment_type: String,
    #[schemars(length(min = 1))]
    pub problem_summary: String,
    /// Risk tags such as `water_near_power`. May be empty.
    pub risk_flags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environmental_notes: Option<String>,
}

/// One repair step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlanStep {
    /// 1-based position in the plan.
    pub step_number: u32,
    #[schemars(length(min = 1))]
    pub action: String,
    /// Minutes.
    pub duration: f64,
    /// KB ids backing this step. Whether they resolve is checked by the QA gate.
    #[schemars(length(min = 1))]
    pub citations: Vec<String>,
}

/// A generated repair plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PlanPayload {
    #[schemars(length(min = 3))]
    pub steps: Vec<PlanStep>,
}

/// Model-based QA assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct QaPayload {
    pub pass: bool,
    pub issues: Vec<String>,
    pub recommendations: Vec<String>,
    #[schemars(range(min = 0, max = 100))]
    pub score: f64,
}

/// Safety rule engine output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SafetyPayload {
    pub pass: bool,
    pub ppe_required: Vec<String>,
    pub hazards: Vec<String>,
    pub required_presteps: Vec<String>,
}
