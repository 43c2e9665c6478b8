use std::time::Instant;

use ff_core::contracts::ObservationPayload;
use ff_core::enums::{EventType, SessionStatus};
use ff_core::responses::AnalyzeResponse;
use ff_gen::InlineImage;
use ff_gen::prompts::VISION_PROMPT;
use ff_schema::OBSERVATION;
use serde_json::json;

use super::latency_ms;
use crate::context::PipelineContext;
use crate::error::StageError;
use crate::generation::generate_json;
use crate::requests::{AnalyzeRequest, required};
use crate::scenario::{mock_observation, resolve_scenario};

/// Model-side result of looking at the image.
struct Seen {
    payload: ObservationPayload,
    model: String,
    retries: u32,
}

impl PipelineContext {
    /// Turn an equipment photo into a stored observation.
    ///
    /// A missing image, or any generator, parse, or contract failure, falls
    /// back to the scenario's canned observation instead of failing.
    ///
    /// # Errors
    ///
    /// `InvalidInput`, `NotFound` for the session, `InvalidTransition` when
    /// the session is already finished, or a storage error.
    pub async fn analyze(&self, req: &AnalyzeRequest) -> Result<AnalyzeResponse, StageError> {
        let session_id = required(&req.session_id, "sessionId")?;
        let image_path = required(&req.image_path, "imagePath")?;
        let session = self.require_session(session_id).await?;
        session
            .status
            .check_transition(session_id, SessionStatus::Analyzing)?;

        let started = Instant::now();
        self.service
            .append_event(session_id, EventType::AnalyzeStart, None)
            .await?;
        self.advance(&session, SessionStatus::Analyzing).await?;

        let (payload, used_mock, model, retries) = match self.look_at(image_path).await {
            Ok(seen) => (seen.payload, false, seen.model, seen.retries),
            Err(error) => {
                let scenario = resolve_scenario(image_path, &session.scenario);
                tracing::warn!(
                    session = session_id,
                    %scenario,
                    %error,
                    "image analysis unavailable; using canned observation"
                );
                (mock_observation(&scenario), true, "mock".to_string(), 0)
            }
        };

        let observation = self
            .service
            .create_observation(session_id, &payload, Some(image_path), used_mock)
            .await?;

        self.service
            .append_event(
                session_id,
                EventType::AnalyzeDone,
                Some(json!({
                    "model": model,
                    "latency_ms": latency_ms(started),
                    "validation_pass": true,
                    "retries": retries,
                    "used_mock": used_mock,
                    "image_path": image_path,
                })),
            )
            .await?;

        Ok(AnalyzeResponse {
            observation_id: observation.id,
            equipment_type: observation.equipment_type,
            problem_summary: observation.problem_summary,
            risk_flags: observation.risk_flags,
            environmental_notes: observation.environmental_notes,
            used_mock,
        })
    }

    async fn look_at(&self, image_path: &str) -> Result<Seen, StageError> {
        let full_path = self.media_root.join(image_path.trim_start_matches('/'));
        if !full_path.is_file() {
            return Err(StageError::not_found("image", &full_path.display().to_string()));
        }
        let image = InlineImage::from_file(&full_path).map_err(|error| {
            StageError::invalid(format!("cannot read {}: {error}", full_path.display()))
        })?;

        let generation = generate_json(&self.router, VISION_PROMPT, Some(&image)).await?;
        let payload = self
            .schemas
            .parse::<ObservationPayload>(OBSERVATION, &generation.value)?;
        Ok(Seen {
            payload,
            retries: generation.retries(),
            model: generation.model,
        })
    }
}
