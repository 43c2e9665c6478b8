use std::path::Path;
use std::time::Instant;

use ff_core::contracts::PlanPayload;
use ff_core::enums::EventType;
use ff_core::responses::PlanResponse;
use ff_gen::is_quota;
use ff_gen::prompts::{observation_text, plan_prompt};
use ff_kb::format_for_prompt;
use ff_schema::{PLAN, check_plan_steps};
use serde_json::{Value, json};

use super::latency_ms;
use crate::context::PipelineContext;
use crate::error::{OrNotFound, StageError};
use crate::generation::generate_json;
use crate::requests::{PlanRequest, required};
use crate::scenario::{DEFAULT_SCENARIO, scenario_key};

/// Where a plan document came from.
struct Drafted {
    document: Value,
    model: String,
    retries: u32,
    fallback: bool,
}

impl PipelineContext {
    /// Draft a repair plan for an observation, backed by KB results.
    ///
    /// When the generator reports a quota failure the scenario's static plan
    /// is used instead.
    ///
    /// # Errors
    ///
    /// `NotFound` for a missing session or an observation of another session,
    /// `FallbackUnavailable` when quota is exhausted and no static plan
    /// exists, and `Parse`/`Schema`/`Generator` for unusable model output.
    pub async fn plan(&self, req: &PlanRequest) -> Result<PlanResponse, StageError> {
        let session_id = required(&req.session_id, "sessionId")?;
        let observation_id = required(&req.observation_id, "observationId")?;
        let session = self.require_session(session_id).await?;
        let observation = self
            .service
            .get_observation(observation_id)
            .await
            .or_not_found("observation", observation_id)?;
        if observation.session_id != session_id {
            return Err(StageError::not_found("observation", observation_id));
        }

        let started = Instant::now();
        self.service
            .append_event(session_id, EventType::PlanStart, None)
            .await?;

        let prompt = plan_prompt(
            &observation_text(&observation),
            &format_for_prompt(&req.kb_results),
        );
        let drafted = match generate_json(&self.router, &prompt, None).await {
            Ok(generation) => Drafted {
                retries: generation.retries(),
                document: generation.value,
                model: generation.model,
                fallback: false,
            },
            Err(StageError::Generator(error)) if is_quota(&error) => {
                let scenario =
                    scenario_key(&session.scenario).unwrap_or_else(|| DEFAULT_SCENARIO.to_string());
                tracing::warn!(session = session_id, %scenario, %error, "generator quota exhausted; using static plan");
                Drafted {
                    document: load_fallback_plan(&self.fallback_dir, &scenario).await?,
                    model: self.router.primary_model().to_string(),
                    retries: 0,
                    fallback: true,
                }
            }
            Err(other) => return Err(other),
        };

        let payload = self.schemas.parse::<PlanPayload>(PLAN, &drafted.document)?;
        check_plan_steps(&payload)?;
        let plan = self
            .service
            .create_plan(session_id, observation_id, &payload.steps, drafted.fallback)
            .await?;

        let mut metadata = json!({
            "model": drafted.model,
            "latency_ms": latency_ms(started),
            "validation_pass": true,
            "retries": drafted.retries,
            "fallback": drafted.fallback,
        });
        let event = if drafted.fallback {
            metadata["reason"] = json!("QUOTA_429");
            EventType::PlanFallbackUsed
        } else {
            EventType::PlanReady
        };
        self.service
            .append_event(session_id, event, Some(metadata))
            .await?;

        tracing::info!(session = session_id, plan = %plan.id, steps = plan.steps.len(), fallback = drafted.fallback, "plan stored");
        Ok(PlanResponse {
            plan_id: plan.id,
            steps: plan.steps,
            used_fallback: plan.used_fallback,
        })
    }
}

/// `<dir>/plans/<scenario>.plan.json` as JSON.
async fn load_fallback_plan(dir: &Path, scenario: &str) -> Result<Value, StageError> {
    let path = dir.join("plans").join(format!("{scenario}.plan.json"));
    let text = tokio::fs::read_to_string(&path).await.map_err(|error| {
        tracing::error!(path = %path.display(), %error, "fallback plan unreadable");
        StageError::FallbackUnavailable {
            scenario: scenario.to_string(),
        }
    })?;
    serde_json::from_str(&text).map_err(|_| StageError::Parse { raw: text })
}
