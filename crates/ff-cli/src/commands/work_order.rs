use ff_pipeline::WorkOrderRequest;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::WorkOrderArgs;
use crate::commands::shared::stage::stage_failed;
use crate::context::AppContext;
use crate::output::output;

/// Handle `fieldfix work-order`.
pub async fn handle(
    args: &WorkOrderArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let response = ctx
        .pipeline
        .work_order(&WorkOrderRequest {
            session_id: args.session.clone(),
            plan_id: args.plan.clone(),
            acknowledge_safety: args.acknowledge_safety,
        })
        .await
        .map_err(stage_failed)?;
    output(&response, flags.format)
}
