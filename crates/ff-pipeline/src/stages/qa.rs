use std::time::Instant;

use ff_core::contracts::QaPayload;
use ff_core::entities::QaIssue;
use ff_core::enums::{EventType, QaIssueKind, QaSource};
use ff_core::responses::{QaResponse, QaVerdict};
use ff_db::NewQaResult;
use ff_gen::prompts::qa_prompt;
use ff_rules::validate_citations;
use ff_schema::QA;
use serde_json::json;

use super::latency_ms;
use crate::context::PipelineContext;
use crate::error::StageError;
use crate::generation::generate_json;
use crate::requests::{QaRequest, required};

impl PipelineContext {
    /// Gate the session's latest plan on its citations, then, if the gate
    /// passes, layer the model's review on top.
    ///
    /// # Errors
    ///
    /// `NotFound` when the session has no plan. Generator, parse and
    /// contract failures of the model review propagate.
    pub async fn qa(&self, req: &QaRequest) -> Result<QaResponse, StageError> {
        let session_id = required(&req.session_id, "sessionId")?;
        self.require_session(session_id).await?;
        let plan = self
            .service
            .latest_plan(session_id)
            .await?
            .ok_or_else(|| StageError::not_found("plan", session_id))?;
        let snapshots = self.service.list_kb_snapshots(session_id).await?;

        let started = Instant::now();
        self.service
            .append_event(session_id, EventType::QaStart, None)
            .await?;

        let document = plan.steps_document();
        let gate = validate_citations(&document, &snapshots);

        let (result, model) = if gate.pass {
            let generation = generate_json(&self.router, &qa_prompt(&document.to_string()), None).await?;
            let review = self.schemas.parse::<QaPayload>(QA, &generation.value)?;
            let mut issues = gate.issues;
            issues.extend(
                review
                    .issues
                    .into_iter()
                    .map(|detail| QaIssue::new(QaIssueKind::ModelFinding, detail, None)),
            );
            let result = NewQaResult {
                pass: review.pass,
                issues,
                recommendations: review.recommendations,
                score: Some(review.score),
                source: QaSource::HardPlusModel,
            };
            let retries = generation.retries();
            (result, Some((generation.model, retries)))
        } else {
            tracing::info!(session = session_id, issues = gate.issues.len(), "plan failed citation gate");
            let result = NewQaResult {
                pass: false,
                issues: gate.issues,
                recommendations: Vec::new(),
                score: None,
                source: QaSource::HardRules,
            };
            (result, None)
        };

        let stored = self
            .service
            .create_qa_result(session_id, &plan.id, &result)
            .await?;

        let mut metadata = json!({
            "pass": stored.pass,
            "issues": stored.issues,
            "source": stored.source,
            "latency_ms": latency_ms(started),
        });
        if let Some((model, retries)) = model {
            metadata["model"] = json!(model);
            metadata["retries"] = json!(retries);
        }
        self.service
            .append_event(session_id, EventType::QaDone, Some(metadata))
            .await?;

        Ok(QaResponse {
            qa_result_id: stored.id,
            qa: QaVerdict {
                pass: stored.pass,
                issues: stored.issues,
                source: stored.source,
                recommendations: stored.recommendations,
                score: stored.score,
            },
        })
    }
}
