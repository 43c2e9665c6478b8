//! Stage prompt templates.
//!
//! Each template asks for a single JSON object shaped like the matching
//! contract in `ff_core::contracts`, and closes with the same instruction so
//! the extractor in [`crate::json`] has one object to find.

use ff_core::entities::Observation;

const JSON_ONLY: &str = "Return ONLY valid JSON, no additional text.";

/// Image analysis prompt. Sent with the image attached.
pub const VISION_PROMPT: &str = r#"You are an expert field service equipment analyzer. Analyze this equipment image and describe what you observe.

Return a JSON object with:
{
  "equipmentType": "string (e.g. Air Conditioner, Generator, Pump)",
  "problemSummary": "string (detailed summary of visible issues)",
  "riskFlags": ["array", "of", "risks"] (e.g. "water_near_power", "exposed_wires", "heavy_equipment"),
  "environmentalNotes": "string (optional, notes about surroundings and conditions)"
}

Focus on:
- Visible damage, wear, or malfunctions
- Safety hazards
- Environmental conditions that might affect the repair
- Indicators of equipment age and condition

Return ONLY valid JSON, no additional text."#;

/// Observation rendered for the plan prompt.
#[must_use]
pub fn observation_text(observation: &Observation) -> String {
    format!(
        "Equipment: {}\nProblem: {}\nRisk Flags: {}\nEnvironment: {}",
        observation.equipment_type,
        observation.problem_summary,
        observation.risk_flags.join(", "),
        observation.environmental_notes.as_deref().unwrap_or("None"),
    )
}

/// Repair plan prompt. `kb_results` is the block from `ff_kb::format_for_prompt`.
#[must_use]
pub fn plan_prompt(observation: &str, kb_results: &str) -> String {
    format!(
        r#"You are an expert field service technician creating a repair plan.

OBSERVATION:
{observation}

KNOWLEDGE BASE RESULTS:
{kb_results}

Create a step-by-step repair plan. Each step MUST include at least one citation from the KB results above.

Return a JSON object with:
{{
  "steps": [
    {{
      "stepNumber": 1,
      "action": "string (detailed action)",
      "duration": number (minutes),
      "citations": ["KB1", "KB3"] (must reference KB IDs from the results above)
    }}
  ]
}}

Requirements:
- Minimum 3 steps
- Each step must have at least 1 citation
- Duration must be realistic (5-60 minutes per step)
- Include safety checks, diagnostics, repairs, and verification

{JSON_ONLY}"#
    )
}

/// Plan review prompt. `plan` is the plan's JSON.
#[must_use]
pub fn qa_prompt(plan: &str) -> String {
    format!(
        r#"You are a quality assurance expert reviewing a field service plan.

PLAN TO REVIEW:
{plan}

Assess this plan for:
- Completeness
- Safety considerations
- Logical sequence
- Time estimates
- Missing steps

Return a JSON object with:
{{
  "pass": boolean,
  "issues": ["array of issues found"],
  "recommendations": ["array of improvements"],
  "score": number (0-100)
}}

{JSON_ONLY}"#
    )
}

/// One-shot repair prompt after output failed to parse.
#[must_use]
pub fn fix_json_prompt(invalid: &str, prompt: &str) -> String {
    format!(
        "You previously generated invalid JSON. Fix it now.

YOUR PREVIOUS INVALID OUTPUT:
{invalid}

ORIGINAL PROMPT:
{prompt}

Return ONLY valid JSON: no explanations, no markdown, just the corrected JSON object."
    )
}
