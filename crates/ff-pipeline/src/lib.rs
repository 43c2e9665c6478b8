//! # ff-pipeline
//!
//! The FieldFix repair pipeline. A [`PipelineContext`] holds the store,
//! schema registry, KB, and model router; each stage is an async method on
//! it that validates its request, records start/done events, and persists
//! its output.
//!
//! ```text
//! create_session → analyze → kb_search → plan → safety → qa → work_order
//! ```
//!
//! [`PipelineContext::run`] drives all of them for one session.

pub mod context;
pub mod driver;
pub mod error;
pub mod generation;
pub mod record;
pub mod requests;
pub mod scenario;
mod stages;

pub use context::PipelineContext;
pub use driver::{RunFailure, RunReport, RunRequest};
pub use error::{FailureStatus, StageError};
pub use generation::{JsonGeneration, generate_json};
pub use record::{BASELINE_MINUTES, compute_metrics};
pub use requests::{
    AnalyzeRequest, CreateSessionRequest, KbSearchRequest, PlanRequest, QaRequest,
    RecordEventRequest, SafetyRequest, WorkOrderRequest,
};
pub use scenario::{DEFAULT_SCENARIO, mock_observation, resolve_scenario, scenario_key};
