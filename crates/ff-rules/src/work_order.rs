//! Work-order heuristics: parts from plan wording, time from step durations.

use ff_core::contracts::PlanStep;

const DEFAULT_PART: &str = "Standard repair kit";
const SUMMARY_PROBLEM_CHARS: usize = 100;

/// Keyword groups checked against the lowercased action text, in order.
const PARTS_TABLE: [(&[&str], &str); 6] = [
    (&["filter"], "Replacement filter"),
    (&["belt"], "Drive belt"),
    (&["fuse"], "Fuse kit"),
    (&["capacitor"], "Capacitor"),
    (&["wire", "wiring"], "Electrical wire connectors"),
    (&["seal", "gasket"], "Gasket/seal kit"),
];

/// Parts implied by the plan's actions. Never empty.
#[must_use]
pub fn parts_for(steps: &[PlanStep]) -> Vec<String> {
    let text = steps
        .iter()
        .map(|s| s.action.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ");
    let mut parts: Vec<String> = PARTS_TABLE
        .iter()
        .filter(|(words, _)| words.iter().any(|w| text.contains(w)))
        .map(|(_, part)| (*part).to_string())
        .collect();
    if parts.is_empty() {
        parts.push(DEFAULT_PART.to_string());
    }
    parts
}

/// Sum of step durations in minutes.
#[must_use]
pub fn estimated_time(steps: &[PlanStep]) -> f64 {
    steps.iter().map(|s| s.duration).sum()
}

/// `WO-` followed by the last six digits of `epoch_millis`.
#[must_use]
pub fn work_order_number(epoch_millis: i64) -> String {
    let digits = epoch_millis.unsigned_abs().to_string();
    let tail = &digits[digits.len().saturating_sub(6)..];
    format!("WO-{tail}")
}

/// `<equipment> - <first 100 chars of problem>`.
#[must_use]
pub fn work_order_summary(equipment_type: &str, problem_summary: &str) -> String {
    let problem: String = problem_summary.chars().take(SUMMARY_PROBLEM_CHARS).collect();
    format!("{equipment_type} - {problem}")
}
