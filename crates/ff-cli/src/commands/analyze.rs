use ff_pipeline::AnalyzeRequest;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::AnalyzeArgs;
use crate::commands::shared::stage::stage_failed;
use crate::context::AppContext;
use crate::output::output;

/// Handle `fieldfix analyze`.
pub async fn handle(args: &AnalyzeArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let response = ctx
        .pipeline
        .analyze(&AnalyzeRequest {
            session_id: args.session.clone(),
            image_path: args.image.clone(),
        })
        .await
        .map_err(stage_failed)?;
    output(&response, flags.format)
}
