use ff_pipeline::SafetyRequest;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SafetyArgs;
use crate::commands::shared::stage::stage_failed;
use crate::context::AppContext;
use crate::output::output;

/// Handle `fieldfix safety`.
pub async fn handle(args: &SafetyArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let response = ctx
        .pipeline
        .safety(&SafetyRequest {
            session_id: args.session.clone(),
            plan_id: args.plan.clone(),
        })
        .await
        .map_err(stage_failed)?;
    output(&response, flags.format)
}
