use ff_core::enums::EventType;
use ff_core::responses::KbSearchResponse;
use ff_db::NewKbSnapshot;
use serde_json::json;

use crate::context::PipelineContext;
use crate::error::StageError;
use crate::requests::{KbSearchRequest, required};

impl PipelineContext {
    /// Rank the KB for `query`. With a session id, the hits also become that
    /// session's snapshot set, which is the citation allow-list for QA.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a blank query, `NotFound` for an unknown session.
    pub async fn kb_search(&self, req: &KbSearchRequest) -> Result<KbSearchResponse, StageError> {
        let query = required(&req.query, "query")?;
        let max_results = req.max_results.unwrap_or(self.default_max_results);
        let session_id = req
            .session_id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());
        if let Some(id) = session_id {
            self.require_session(id).await?;
        }

        let hits = self.kb.search(query, max_results);

        if let Some(id) = session_id {
            let snapshots: Vec<NewKbSnapshot> = hits
                .iter()
                .map(|hit| NewKbSnapshot {
                    source: hit.result.source,
                    kb_id: hit.result.id.clone(),
                    title: hit.result.title.clone(),
                    snippet: hit.result.snippet.clone(),
                    raw: hit.raw.clone(),
                })
                .collect();
            self.service.replace_kb_snapshots(id, &snapshots).await?;
            self.service
                .append_event(
                    id,
                    EventType::KbSearchDone,
                    Some(json!({ "hits": hits.len(), "query": query })),
                )
                .await?;
        }

        tracing::debug!(query, hits = hits.len(), "kb search");
        Ok(KbSearchResponse {
            results: hits.into_iter().map(|hit| hit.result).collect(),
        })
    }
}
