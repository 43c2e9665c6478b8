use ff_pipeline::StageError;

/// Wrap a stage failure so the printed error leads with its status.
pub fn stage_failed(error: StageError) -> anyhow::Error {
    let status = error.status();
    anyhow::Error::new(error).context(format!("stage failed ({status})"))
}
