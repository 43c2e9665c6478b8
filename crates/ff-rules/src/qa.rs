//! Citation integrity gate.
//!
//! Runs before any model review. A plan is accepted in any of the shapes the
//! pipeline has produced over time (`steps`, `stepsRequired`, `plan.steps`),
//! normalized through [`PlanShape`] into [`CanonicalStep`]s.

use std::collections::HashSet;

use ff_core::entities::{KbSnapshot, QaIssue};
use ff_core::enums::QaIssueKind;
use serde::Serialize;
use serde_json::Value;

/// Where the steps of a plan-like document were found.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanShape<'a> {
    /// `{"steps": [...]}`
    Steps(&'a [Value]),
    /// `{"stepsRequired": [...]}`
    StepsRequired(&'a [Value]),
    /// `{"plan": {"steps": [...]}}`
    Nested(&'a [Value]),
    /// None of the above, or not an object.
    Empty,
}

/// The two facts the gate needs from a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CanonicalStep {
    pub number: u32,
    pub citations: Vec<String>,
}

impl<'a> PlanShape<'a> {
    #[must_use]
    pub fn detect(plan: &'a Value) -> Self {
        let array = |v: Option<&'a Value>| v.and_then(Value::as_array).map(Vec::as_slice);

        if let Some(steps) = array(plan.get("steps")) {
            Self::Steps(steps)
        } else if let Some(steps) = array(plan.get("stepsRequired")) {
            Self::StepsRequired(steps)
        } else if let Some(steps) = array(plan.get("plan").and_then(|p| p.get("steps"))) {
            Self::Nested(steps)
        } else {
            Self::Empty
        }
    }

    #[must_use]
    pub const fn raw_steps(&self) -> &'a [Value] {
        match self {
            Self::Steps(s) | Self::StepsRequired(s) | Self::Nested(s) => s,
            Self::Empty => &[],
        }
    }

    /// Normalize each raw step.
    ///
    /// The number is `n`, else `stepNumber`, else the 1-based position.
    /// Non-string citations are dropped.
    #[must_use]
    pub fn canonical_steps(&self) -> Vec<CanonicalStep> {
        self.raw_steps()
            .iter()
            .enumerate()
            .map(|(index, step)| {
                let declared = step
                    .get("n")
                    .and_then(Value::as_u64)
                    .or_else(|| step.get("stepNumber").and_then(Value::as_u64))
                    .and_then(|n| u32::try_from(n).ok());
                let number =
                    declared.unwrap_or_else(|| u32::try_from(index + 1).unwrap_or(u32::MAX));
                let citations = step
                    .get("citations")
                    .and_then(Value::as_array)
                    .map(|items| {
                        items
                            .iter()
                            .filter_map(Value::as_str)
                            .map(str::to_string)
                            .collect()
                    })
                    .unwrap_or_default();
                CanonicalStep { number, citations }
            })
            .collect()
    }
}

/// Result of the gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HardRuleReport {
    pub pass: bool,
    pub issues: Vec<QaIssue>,
}

/// Citation allow-list: each snapshot's KB id, or its own id when the KB id
/// is blank.
fn allow_list(snapshots: &[KbSnapshot]) -> HashSet<&str> {
    snapshots
        .iter()
        .map(|s| if s.kb_id.is_empty() { s.id.as_str() } else { s.kb_id.as_str() })
        .collect()
}

/// Check that every step cites at least one id and every cited id is in the
/// session's snapshot set.
#[must_use]
pub fn validate_citations(plan: &Value, snapshots: &[KbSnapshot]) -> HardRuleReport {
    let steps = PlanShape::detect(plan).canonical_steps();
    if steps.is_empty() {
        return HardRuleReport {
            pass: false,
            issues: vec![QaIssue::new(
                QaIssueKind::MissingCitations,
                "Plan has no steps to validate.",
                None,
            )],
        };
    }

    let allowed = allow_list(snapshots);
    let mut issues = Vec::new();
    for step in &steps {
        if step.citations.is_empty() {
            issues.push(QaIssue::new(
                QaIssueKind::MissingCitations,
                "Step has no citations.",
                Some(step.number),
            ));
            continue;
        }
        for citation in &step.citations {
            if !allowed.contains(citation.as_str()) {
                issues.push(QaIssue::new(
                    QaIssueKind::UnknownCitation,
                    format!("Unknown citation: {citation}."),
                    Some(step.number),
                ));
            }
        }
    }

    HardRuleReport {
        pass: issues.is_empty(),
        issues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ff_core::enums::KbSource;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn snapshot(id: &str, kb_id: &str) -> KbSnapshot {
        KbSnapshot {
            id: id.into(),
            session_id: "ses-1".into(),
            source: KbSource::Runbook,
            kb_id: kb_id.into(),
            title: "t".into(),
            snippet: "s".into(),
            raw: Value::Null,
            created_at: chrono::DateTime::UNIX_EPOCH,
        }
    }

    fn snapshots() -> Vec<KbSnapshot> {
        vec![snapshot("kbs-1", "RB-ELEC-001"), snapshot("kbs-2", "MAN-PUMP-001")]
    }

    #[test]
    fn shapes_are_detected() {
        let steps = json!({ "steps": [{}] });
        let required = json!({ "stepsRequired": [{}] });
        let nested = json!({ "plan": { "steps": [{}] } });
        assert!(matches!(PlanShape::detect(&steps), PlanShape::Steps(_)));
        assert!(matches!(PlanShape::detect(&required), PlanShape::StepsRequired(_)));
        assert!(matches!(PlanShape::detect(&nested), PlanShape::Nested(_)));
        assert_eq!(PlanShape::detect(&json!([1, 2])), PlanShape::Empty);
        assert_eq!(PlanShape::detect(&json!({ "steps": "no" })), PlanShape::Empty);
    }

    #[test]
    fn step_number_prefers_n_then_step_number_then_position() {
        let plan = json!({ "steps": [
            { "n": 7, "stepNumber": 1, "citations": ["A"] },
            { "stepNumber": 4, "citations": ["B"] },
            { "citations": ["C", 3] }
        ]});
        let steps = PlanShape::detect(&plan).canonical_steps();
        assert_eq!(
            steps,
            vec![
                CanonicalStep { number: 7, citations: vec!["A".into()] },
                CanonicalStep { number: 4, citations: vec!["B".into()] },
                CanonicalStep { number: 3, citations: vec!["C".into()] },
            ]
        );
    }

    #[test]
    fn no_steps_fails_with_single_plan_level_issue() {
        for plan in [json!({}), json!({ "steps": [] }), json!(null)] {
            let report = validate_citations(&plan, &snapshots());
            assert!(!report.pass);
            assert_eq!(
                report.issues,
                vec![QaIssue::new(
                    QaIssueKind::MissingCitations,
                    "Plan has no steps to validate.",
                    None
                )]
            );
        }
    }

    #[test]
    fn empty_citations_skip_resolution() {
        let plan = json!({ "steps": [{ "stepNumber": 1, "citations": [] }] });
        let report = validate_citations(&plan, &[]);
        assert_eq!(
            report.issues,
            vec![QaIssue::new(QaIssueKind::MissingCitations, "Step has no citations.", Some(1))]
        );
    }

    #[test]
    fn unknown_citations_are_named_per_step() {
        let plan = json!({ "stepsRequired": [
            { "stepNumber": 1, "citations": ["RB-ELEC-001"] },
            { "stepNumber": 2, "citations": ["MAN-PUMP-001", "INC-404", "INC-405"] }
        ]});
        let report = validate_citations(&plan, &snapshots());
        assert!(!report.pass);
        assert_eq!(
            report.issues,
            vec![
                QaIssue::new(QaIssueKind::UnknownCitation, "Unknown citation: INC-404.", Some(2)),
                QaIssue::new(QaIssueKind::UnknownCitation, "Unknown citation: INC-405.", Some(2)),
            ]
        );
    }

    #[test]
    fn every_citation_known_passes() {
        let plan = json!({ "plan": { "steps": [
            { "citations": ["RB-ELEC-001"] },
            { "citations": ["MAN-PUMP-001", "RB-ELEC-001"] }
        ]}});
        let report = validate_citations(&plan, &snapshots());
        assert!(report.pass);
        assert!(report.issues.is_empty());
    }

    #[test]
    fn blank_kb_id_falls_back_to_snapshot_id() {
        let plan = json!({ "steps": [{ "citations": ["kbs-9"] }] });
        let report = validate_citations(&plan, &[snapshot("kbs-9", "")]);
        assert!(report.pass);
    }

    #[test]
    fn no_snapshots_means_every_citation_is_unknown() {
        let plan = json!({ "steps": [{ "citations": ["RB-ELEC-001"] }] });
        let report = validate_citations(&plan, &[]);
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].kind, QaIssueKind::UnknownCitation);
    }
}
