use crate::cli::GlobalFlags;
use crate::cli::root_commands::SessionArg;
use crate::commands::shared::stage::stage_failed;
use crate::context::AppContext;
use crate::output::output;

/// Handle `fieldfix metrics`.
pub async fn handle(args: &SessionArg, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let metrics = ctx
        .pipeline
        .session_metrics(&args.session)
        .await
        .map_err(stage_failed)?;
    output(&metrics, flags.format)
}
