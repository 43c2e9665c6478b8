mod create;
mod list;
mod show;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::SessionCommands;
use crate::commands::shared::stage::stage_failed;
use crate::context::AppContext;
use crate::output::output;

/// Handle `fieldfix session`.
pub async fn handle(
    action: &SessionCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        SessionCommands::Create {
            scenario,
            description,
        } => create::run(scenario, description, ctx, flags).await,
        SessionCommands::List { limit } => list::run(*limit, ctx, flags).await,
        SessionCommands::Show { id } => show::run(id, ctx, flags).await,
        SessionCommands::Fail { id } => {
            let session = ctx.pipeline.mark_session_error(id).await.map_err(stage_failed)?;
            output(&session, flags.format)
        }
    }
}
