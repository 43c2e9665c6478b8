//! Status enums, entity types, and event tags for FieldFix.
//!
//! Storage-facing enums use `snake_case` serialization. Status enums with state
//! machines provide `allowed_next_states()` to enforce valid transitions at the
//! application layer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// SessionStatus
// ---------------------------------------------------------------------------

/// Status of a repair session.
///
/// ```text
/// created → analyzing → complete
///         ↘           ↘
///           error       error
/// ```
///
/// `complete` and `error` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Created,
    Analyzing,
    Complete,
    Error,
}

impl SessionStatus {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Created => &[Self::Analyzing, Self::Error],
            Self::Analyzing => &[Self::Complete, Self::Error],
            Self::Complete | Self::Error => &[],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    /// Resolve a requested move to `next` for session `id`.
    ///
    /// Returns `Ok(false)` when the session is already in `next` (re-entry is
    /// a no-op), `Ok(true)` when the transition must be applied.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidTransition` if the move is not allowed.
    pub fn check_transition(self, id: &str, next: Self) -> Result<bool, CoreError> {
        if self == next {
            return Ok(false);
        }
        if self.can_transition_to(next) {
            return Ok(true);
        }
        Err(CoreError::InvalidTransition {
            entity_type: EntityType::Session.as_str().to_string(),
            id: id.to_string(),
            from: self.as_str().to_string(),
            to: next.as_str().to_string(),
        })
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Analyzing => "analyzing",
            Self::Complete => "complete",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// KbSource
// ---------------------------------------------------------------------------

/// Which static corpus a KB entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KbSource {
    Manual,
    Runbook,
    Incident,
}

impl KbSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Runbook => "runbook",
            Self::Incident => "incident",
        }
    }
}

impl fmt::Display for KbSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// QaSource / QaIssueKind
// ---------------------------------------------------------------------------

/// Which checks produced a QA result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QaSource {
    /// Deterministic citation rules only (the gate failed, or no model ran).
    #[serde(rename = "hard_rules")]
    HardRules,
    /// Deterministic gate passed, then the model assessment was layered on top.
    #[serde(rename = "hard+gemini")]
    HardPlusModel,
}

impl QaSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HardRules => "hard_rules",
            Self::HardPlusModel => "hard+gemini",
        }
    }
}

impl fmt::Display for QaSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind tag on a QA issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QaIssueKind {
    MissingCitations,
    UnknownCitation,
    ModelFinding,
}

impl QaIssueKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingCitations => "MISSING_CITATIONS",
            Self::UnknownCitation => "UNKNOWN_CITATION",
            Self::ModelFinding => "MODEL_FINDING",
        }
    }
}

impl fmt::Display for QaIssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EntityType
// ---------------------------------------------------------------------------

/// Entity types owned by a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Session,
    Observation,
    KbSnapshot,
    Plan,
    SafetyCheck,
    QaResult,
    WorkOrder,
    Event,
}

impl EntityType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Session => "session",
            Self::Observation => "observation",
            Self::KbSnapshot => "kb_snapshot",
            Self::Plan => "plan",
            Self::SafetyCheck => "safety_check",
            Self::QaResult => "qa_result",
            Self::WorkOrder => "work_order",
            Self::Event => "event",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EventType
// ---------------------------------------------------------------------------

/// Tag on an audit event.
///
/// Pipeline stages emit the named variants. Events recorded by external
/// collaborators may carry any other non-blank tag, kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum EventType {
    SessionCreated,
    AnalyzeStart,
    AnalyzeDone,
    KbSearchDone,
    PlanStart,
    PlanReady,
    PlanFallbackUsed,
    SafetyStart,
    SafetyDone,
    QaStart,
    QaDone,
    WoStart,
    WoCreated,
    Other(String),
}

impl EventType {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::SessionCreated => "SESSION_CREATED",
            Self::AnalyzeStart => "ANALYZE_START",
            Self::AnalyzeDone => "ANALYZE_DONE",
            Self::KbSearchDone => "KB_SEARCH_DONE",
            Self::PlanStart => "PLAN_START",
            Self::PlanReady => "PLAN_READY",
            Self::PlanFallbackUsed => "PLAN_FALLBACK_USED",
            Self::SafetyStart => "SAFETY_START",
            Self::SafetyDone => "SAFETY_DONE",
            Self::QaStart => "QA_START",
            Self::QaDone => "QA_DONE",
            Self::WoStart => "WO_START",
            Self::WoCreated => "WO_CREATED",
            Self::Other(tag) => tag,
        }
    }
}

impl FromStr for EventType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        Ok(match tag {
            "" => return Err(CoreError::Validation("event type must not be blank".into())),
            "SESSION_CREATED" => Self::SessionCreated,
            "ANALYZE_START" => Self::AnalyzeStart,
            "ANALYZE_DONE" => Self::AnalyzeDone,
            "KB_SEARCH_DONE" => Self::KbSearchDone,
            "PLAN_START" => Self::PlanStart,
            "PLAN_READY" => Self::PlanReady,
            "PLAN_FALLBACK_USED" => Self::PlanFallbackUsed,
            "SAFETY_START" => Self::SafetyStart,
            "SAFETY_DONE" => Self::SafetyDone,
            "QA_START" => Self::QaStart,
            "QA_DONE" => Self::QaDone,
            "WO_START" => Self::WoStart,
            "WO_CREATED" => Self::WoCreated,
            other => Self::Other(other.to_string()),
        })
    }
}

impl TryFrom<String> for EventType {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EventType> for String {
    fn from(value: EventType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
