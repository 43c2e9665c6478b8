use anyhow::Context;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ExportArgs;
use crate::commands::shared::stage::stage_failed;
use crate::context::AppContext;
use crate::output::output;

/// Handle `fieldfix export`.
pub async fn handle(args: &ExportArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let export = ctx
        .pipeline
        .export_session(&args.session)
        .await
        .map_err(stage_failed)?;

    let dir = args
        .out
        .clone()
        .unwrap_or_else(|| ctx.config.paths.export_dir.clone());
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create export directory {}", dir.display()))?;
    let path = dir.join(export.file_name());
    let body = serde_json::to_string_pretty(&export)?;
    std::fs::write(&path, body).with_context(|| format!("failed to write {}", path.display()))?;

    tracing::info!(path = %path.display(), "session exported");
    output(
        &json!({ "sessionId": export.session_id, "path": path.display().to_string() }),
        flags.format,
    )
}
