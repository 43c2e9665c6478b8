//! Stage orchestrators, one `impl PipelineContext` block per stage.
//!
//! Every stage validates its request and loads its precondition records
//! before writing anything, so rejected calls leave no events behind. On
//! entry it appends a `*_START` event; on success a `*_DONE`/`*_READY`/
//! `*_CREATED` event carrying latency and model telemetry. Failures after
//! the start event return `Err` without touching the session status.

mod analyze;
mod kb_search;
mod plan;
mod qa;
mod safety;
mod session;
mod work_order;

use std::time::Instant;

use ff_core::entities::{Observation, Plan, Session};

use crate::context::PipelineContext;
use crate::error::{OrNotFound, StageError};

/// Milliseconds since `started`.
pub(crate) fn latency_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

impl PipelineContext {
    pub(crate) async fn require_session(&self, id: &str) -> Result<Session, StageError> {
        self.service.get_session(id).await.or_not_found("session", id)
    }

    /// A plan that exists and belongs to `session_id`.
    pub(crate) async fn require_plan(
        &self,
        session_id: &str,
        plan_id: &str,
    ) -> Result<Plan, StageError> {
        let plan = self.service.get_plan(plan_id).await.or_not_found("plan", plan_id)?;
        if plan.session_id != session_id {
            return Err(StageError::not_found("plan", plan_id));
        }
        Ok(plan)
    }

    pub(crate) async fn require_latest_observation(
        &self,
        session_id: &str,
    ) -> Result<Observation, StageError> {
        self.service
            .latest_observation(session_id)
            .await?
            .ok_or_else(|| StageError::not_found("observation for session", session_id))
    }
}
