use ff_core::entities::KbSnapshot;
use ff_core::responses::KbSearchResult;
use ff_pipeline::PlanRequest;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::PlanArgs;
use crate::commands::shared::parse::read_json_file;
use crate::commands::shared::stage::stage_failed;
use crate::context::AppContext;
use crate::output::output;

/// Handle `fieldfix plan`.
pub async fn handle(args: &PlanArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let service = &ctx.pipeline.service;
    let observation_id = match &args.observation {
        Some(id) => id.clone(),
        None => service
            .latest_observation(&args.session)
            .await?
            .map(|observation| observation.id)
            .ok_or_else(|| anyhow::anyhow!("session {} has no observation; run analyze first", args.session))?,
    };
    let kb_results = match &args.kb_results {
        Some(path) => read_json_file::<Vec<KbSearchResult>>(path)?,
        None => service
            .list_kb_snapshots(&args.session)
            .await?
            .into_iter()
            .map(snapshot_result)
            .collect(),
    };

    let response = ctx
        .pipeline
        .plan(&PlanRequest {
            session_id: args.session.clone(),
            observation_id,
            kb_results,
        })
        .await
        .map_err(stage_failed)?;
    output(&response, flags.format)
}

/// A stored snapshot as prompt context. Scores are not persisted.
fn snapshot_result(snapshot: KbSnapshot) -> KbSearchResult {
    KbSearchResult {
        id: snapshot.kb_id,
        title: snapshot.title,
        snippet: snapshot.snippet,
        source: snapshot.source,
        score: 0,
    }
}
