//! Generate-then-parse with a single repair round.

use ff_gen::json::safe_json_parse;
use ff_gen::prompts::fix_json_prompt;
use ff_gen::{InlineImage, ModelRouter};
use serde_json::Value;

use crate::error::StageError;

/// A parsed JSON object and how it was obtained.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonGeneration {
    pub value: Value,
    /// Model that produced the accepted text.
    pub model: String,
    /// Generator attempts across the first call and the repair call.
    pub attempts: u32,
    pub repaired: bool,
}

impl JsonGeneration {
    /// Attempts beyond the first.
    #[must_use]
    pub const fn retries(&self) -> u32 {
        self.attempts.saturating_sub(1)
    }
}

/// Run `prompt`; if no JSON object can be parsed from the answer, ask once
/// for a corrected version.
///
/// # Errors
///
/// Generator failures propagate unchanged so callers can inspect the kind.
/// Two unparseable answers give `StageError::Parse` with the last raw text.
pub async fn generate_json(
    router: &ModelRouter,
    prompt: &str,
    image: Option<&InlineImage>,
) -> Result<JsonGeneration, StageError> {
    let first = router.generate(prompt, image).await?;
    if let Some(value) = safe_json_parse(&first.text) {
        return Ok(JsonGeneration {
            value,
            model: first.model,
            attempts: first.attempts,
            repaired: false,
        });
    }

    tracing::warn!(model = %first.model, "generator output was not JSON; requesting repair");
    let repair = router
        .generate(&fix_json_prompt(&first.text, prompt), image)
        .await?;
    let attempts = first.attempts + repair.attempts;
    match safe_json_parse(&repair.text) {
        Some(value) => Ok(JsonGeneration {
            value,
            model: repair.model,
            attempts,
            repaired: true,
        }),
        None => Err(StageError::Parse { raw: repair.text }),
    }
}
