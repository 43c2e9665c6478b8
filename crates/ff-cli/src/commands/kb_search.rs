use ff_pipeline::KbSearchRequest;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::KbSearchArgs;
use crate::commands::shared::stage::stage_failed;
use crate::context::AppContext;
use crate::output::output;

/// Handle `fieldfix kb-search`.
pub async fn handle(args: &KbSearchArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let max_results = flags
        .limit
        .map(|limit| usize::try_from(limit).unwrap_or(usize::MAX));
    let response = ctx
        .pipeline
        .kb_search(&KbSearchRequest {
            query: args.query.clone(),
            max_results,
            session_id: args.session.clone(),
        })
        .await
        .map_err(stage_failed)?;
    output(&response, flags.format)
}
