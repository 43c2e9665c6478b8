use crate::cli::GlobalFlags;
use crate::cli::root_commands::SimilarArgs;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::stage::stage_failed;
use crate::context::AppContext;
use crate::output::output;

/// Handle `fieldfix similar`.
pub async fn handle(args: &SimilarArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let limit = effective_limit(args.limit, flags.limit, 5);
    let sessions = ctx
        .pipeline
        .similar_sessions(&args.session, limit)
        .await
        .map_err(stage_failed)?;
    output(&sessions, flags.format)
}
