use ff_pipeline::QaRequest;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::QaArgs;
use crate::commands::shared::stage::stage_failed;
use crate::context::AppContext;
use crate::output::output;

/// Handle `fieldfix qa`.
pub async fn handle(args: &QaArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let response = ctx
        .pipeline
        .qa(&QaRequest {
            session_id: args.session.clone(),
        })
        .await
        .map_err(stage_failed)?;
    output(&response, flags.format)
}
