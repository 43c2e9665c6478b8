use ff_pipeline::{FailureStatus, RunFailure, RunRequest};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::RunArgs;
use crate::context::AppContext;
use crate::output::output;

/// Printed when a run stops at a stage.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FailureReport<'a> {
    session_id: Option<&'a str>,
    stage: &'static str,
    status: FailureStatus,
    error: String,
}

impl<'a> From<&'a RunFailure> for FailureReport<'a> {
    fn from(failure: &'a RunFailure) -> Self {
        Self {
            session_id: failure.session_id.as_deref(),
            stage: failure.stage,
            status: failure.status(),
            error: failure.source.to_string(),
        }
    }
}

/// Handle `fieldfix run`.
pub async fn handle(args: &RunArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let request = RunRequest {
        scenario: args.scenario.clone(),
        user_description: args.description.clone(),
        image_path: args.image.clone(),
        acknowledge_safety: args.acknowledge_safety,
    };
    match ctx.pipeline.run(&request).await {
        Ok(report) => output(&report, flags.format),
        Err(failure) => {
            output(&FailureReport::from(&failure), flags.format)?;
            Err(anyhow::Error::new(failure))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ff_pipeline::StageError;
    use serde_json::json;

    #[test]
    fn failure_report_shape() {
        let failure = RunFailure {
            session_id: Some("ses-1".into()),
            stage: "work_order",
            source: StageError::SafetyNotCleared {
                safety_check_id: "sfc-1".into(),
            },
        };
        let value = serde_json::to_value(FailureReport::from(&failure)).unwrap();
        assert_eq!(value["sessionId"], json!("ses-1"));
        assert_eq!(value["stage"], json!("work_order"));
        assert_eq!(value["status"], json!("precondition_failed"));
    }
}
