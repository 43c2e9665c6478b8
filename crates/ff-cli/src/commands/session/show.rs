use crate::cli::GlobalFlags;
use crate::commands::shared::stage::stage_failed;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let record = ctx.pipeline.session_record(id).await.map_err(stage_failed)?;
    output(&record, flags.format)
}
