use ff_pipeline::CreateSessionRequest;

use crate::cli::GlobalFlags;
use crate::commands::shared::stage::stage_failed;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    scenario: &str,
    description: &str,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let response = ctx
        .pipeline
        .create_session(&CreateSessionRequest {
            scenario: scenario.to_string(),
            user_description: description.to_string(),
        })
        .await
        .map_err(stage_failed)?;
    output(&response, flags.format)
}
