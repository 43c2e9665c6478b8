use std::time::Instant;

use chrono::Utc;
use ff_core::enums::{EventType, SessionStatus};
use ff_core::responses::WorkOrderResponse;
use ff_rules::{estimated_time, parts_for, work_order_number, work_order_summary};
use serde_json::json;

use super::latency_ms;
use crate::context::PipelineContext;
use crate::error::StageError;
use crate::requests::{WorkOrderRequest, required};

impl PipelineContext {
    /// Turn a plan into a work order and complete the session.
    ///
    /// A failed safety check blocks this unless `acknowledgeSafety` is set.
    ///
    /// # Errors
    ///
    /// `NotFound` for a missing plan, observation or safety check,
    /// `SafetyNotCleared` for an unacknowledged failed check, and
    /// `InvalidTransition` when the session cannot complete.
    pub async fn work_order(&self, req: &WorkOrderRequest) -> Result<WorkOrderResponse, StageError> {
        let session_id = required(&req.session_id, "sessionId")?;
        let plan_id = required(&req.plan_id, "planId")?;
        let session = self.require_session(session_id).await?;
        let plan = self.require_plan(session_id, plan_id).await?;
        let observation = self.require_latest_observation(session_id).await?;
        let check = self
            .service
            .latest_safety_check_for_plan(plan_id)
            .await?
            .ok_or_else(|| StageError::not_found("safety check for plan", plan_id))?;
        if !check.pass && !req.acknowledge_safety {
            return Err(StageError::SafetyNotCleared {
                safety_check_id: check.id,
            });
        }
        session
            .status
            .check_transition(session_id, SessionStatus::Complete)?;

        let started = Instant::now();
        self.service
            .append_event(session_id, EventType::WoStart, None)
            .await?;

        let parts = parts_for(&plan.steps);
        let minutes = estimated_time(&plan.steps);
        let number = work_order_number(Utc::now().timestamp_millis());
        let summary = work_order_summary(&observation.equipment_type, &observation.problem_summary);
        let order = self
            .service
            .create_work_order(session_id, plan_id, &number, &summary, &parts, minutes)
            .await?;
        self.advance(&session, SessionStatus::Complete).await?;

        self.service
            .append_event(
                session_id,
                EventType::WoCreated,
                Some(json!({
                    "work_order_number": order.work_order_number,
                    "parts": order.parts,
                    "estimated_time": order.estimated_time,
                    "safety_acknowledged": !check.pass,
                    "latency_ms": latency_ms(started),
                })),
            )
            .await?;

        tracing::info!(session = session_id, number = %order.work_order_number, "work order created");
        Ok(WorkOrderResponse {
            work_order_id: order.id,
            work_order_number: order.work_order_number,
            summary: order.summary,
            parts: order.parts,
            estimated_time: order.estimated_time,
        })
    }
}
