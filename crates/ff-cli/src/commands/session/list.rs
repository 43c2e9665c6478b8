use crate::cli::GlobalFlags;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::stage::stage_failed;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(limit: Option<u32>, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let limit = effective_limit(limit, flags.limit, 20);
    let sessions = ctx.pipeline.list_sessions(limit).await.map_err(stage_failed)?;
    output(&sessions, flags.format)
}
