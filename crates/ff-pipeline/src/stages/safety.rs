use std::time::Instant;

use ff_core::enums::EventType;
use ff_core::responses::SafetyResponse;
use ff_rules::{SafetyInput, evaluate_safety};
use ff_schema::SAFETY_CHECK;
use serde_json::json;

use super::latency_ms;
use crate::context::PipelineContext;
use crate::error::StageError;
use crate::requests::{SafetyRequest, required};

impl PipelineContext {
    /// Run the deterministic safety rules over a plan and the session's
    /// latest observation.
    ///
    /// # Errors
    ///
    /// `NotFound` for a missing plan or observation.
    pub async fn safety(&self, req: &SafetyRequest) -> Result<SafetyResponse, StageError> {
        let session_id = required(&req.session_id, "sessionId")?;
        let plan_id = required(&req.plan_id, "planId")?;
        let plan = self.require_plan(session_id, plan_id).await?;
        let observation = self.require_latest_observation(session_id).await?;

        let started = Instant::now();
        self.service
            .append_event(session_id, EventType::SafetyStart, None)
            .await?;

        let payload = evaluate_safety(SafetyInput {
            risk_flags: &observation.risk_flags,
            steps: &plan.steps,
        });
        self.schemas.validate(SAFETY_CHECK, &json!(payload))?;
        let check = self
            .service
            .create_safety_check(session_id, plan_id, &payload)
            .await?;

        self.service
            .append_event(
                session_id,
                EventType::SafetyDone,
                Some(json!({
                    "pass": check.pass,
                    "hazards": check.hazards,
                    "latency_ms": latency_ms(started),
                })),
            )
            .await?;

        if !check.pass {
            tracing::warn!(session = session_id, check = %check.id, "safety check failed");
        }
        Ok(SafetyResponse {
            safety_check_id: check.id,
            pass: check.pass,
            ppe_required: check.ppe_required,
            hazards: check.hazards,
            required_presteps: check.required_presteps,
        })
    }
}
