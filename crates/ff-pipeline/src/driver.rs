//! Run every stage in order for one session.

use ff_core::responses::{
    AnalyzeResponse, KbSearchResponse, PlanResponse, QaResponse, SafetyResponse,
    WorkOrderResponse,
};
use serde::Serialize;
use thiserror::Error;

use crate::context::PipelineContext;
use crate::error::{FailureStatus, StageError};
use crate::requests::{
    AnalyzeRequest, CreateSessionRequest, KbSearchRequest, PlanRequest, QaRequest,
    SafetyRequest, WorkOrderRequest,
};

/// Inputs for a full pipeline run.
#[derive(Debug, Clone, Default)]
pub struct RunRequest {
    pub scenario: String,
    pub user_description: String,
    pub image_path: String,
    pub acknowledge_safety: bool,
}

/// Output of every stage that ran.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub session_id: String,
    pub observation: AnalyzeResponse,
    pub kb: KbSearchResponse,
    pub plan: PlanResponse,
    pub safety: SafetyResponse,
    pub qa: QaResponse,
    /// Absent when QA rejected the plan.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_order: Option<WorkOrderResponse>,
}

/// A stage failed; the session, if one was created, is now `error`.
#[derive(Debug, Error)]
#[error("{stage} failed: {source}")]
pub struct RunFailure {
    pub session_id: Option<String>,
    pub stage: &'static str,
    #[source]
    pub source: StageError,
}

impl RunFailure {
    #[must_use]
    pub const fn status(&self) -> FailureStatus {
        self.source.status()
    }
}

impl PipelineContext {
    /// CreateSession, Analyze, KbSearch, Plan, Safety, QA, WorkOrder.
    ///
    /// The KB query is the observed equipment type plus problem summary.
    /// A QA rejection ends the run successfully, without a work order.
    ///
    /// # Errors
    ///
    /// The first [`RunFailure`], after the session is marked `error`.
    pub async fn run(&self, req: &RunRequest) -> Result<RunReport, RunFailure> {
        let created = self
            .create_session(&CreateSessionRequest {
                scenario: req.scenario.clone(),
                user_description: req.user_description.clone(),
            })
            .await
            .map_err(|source| RunFailure {
                session_id: None,
                stage: "create_session",
                source,
            })?;
        let session_id = created.session.id;

        match self.run_stages(&session_id, req).await {
            Ok(report) => Ok(report),
            Err((stage, source)) => {
                tracing::error!(session = %session_id, stage, error = %source, "pipeline run failed");
                if let Err(error) = self.mark_session_error(&session_id).await {
                    tracing::warn!(session = %session_id, %error, "could not mark session as error");
                }
                Err(RunFailure {
                    session_id: Some(session_id),
                    stage,
                    source,
                })
            }
        }
    }

    async fn run_stages(
        &self,
        session_id: &str,
        req: &RunRequest,
    ) -> Result<RunReport, (&'static str, StageError)> {
        let observation = self
            .analyze(&AnalyzeRequest {
                session_id: session_id.to_string(),
                image_path: req.image_path.clone(),
            })
            .await
            .map_err(|e| ("analyze", e))?;

        let kb = self
            .kb_search(&KbSearchRequest {
                query: format!("{} {}", observation.equipment_type, observation.problem_summary),
                max_results: None,
                session_id: Some(session_id.to_string()),
            })
            .await
            .map_err(|e| ("kb_search", e))?;

        let plan = self
            .plan(&PlanRequest {
                session_id: session_id.to_string(),
                observation_id: observation.observation_id.clone(),
                kb_results: kb.results.clone(),
            })
            .await
            .map_err(|e| ("plan", e))?;

        let safety = self
            .safety(&SafetyRequest {
                session_id: session_id.to_string(),
                plan_id: plan.plan_id.clone(),
            })
            .await
            .map_err(|e| ("safety", e))?;

        let qa = self
            .qa(&QaRequest {
                session_id: session_id.to_string(),
            })
            .await
            .map_err(|e| ("qa", e))?;

        let work_order = if qa.qa.pass {
            Some(
                self.work_order(&WorkOrderRequest {
                    session_id: session_id.to_string(),
                    plan_id: plan.plan_id.clone(),
                    acknowledge_safety: req.acknowledge_safety,
                })
                .await
                .map_err(|e| ("work_order", e))?,
            )
        } else {
            tracing::info!(session = session_id, "QA rejected the plan; no work order");
            None
        };

        Ok(RunReport {
            session_id: session_id.to_string(),
            observation,
            kb,
            plan,
            safety,
            qa,
            work_order,
        })
    }
}
