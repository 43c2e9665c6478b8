use ff_pipeline::RecordEventRequest;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::EventArgs;
use crate::commands::shared::parse::parse_metadata;
use crate::commands::shared::stage::stage_failed;
use crate::context::AppContext;
use crate::output::output;

/// Handle `fieldfix event`.
pub async fn handle(args: &EventArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let metadata = args.metadata.as_deref().map(parse_metadata).transpose()?;
    let event = ctx
        .pipeline
        .record_event(&RecordEventRequest {
            session_id: args.session.clone(),
            event_type: args.event_type.clone(),
            metadata,
        })
        .await
        .map_err(stage_failed)?;
    output(&event, flags.format)
}
