//! Primary/fallback model routing.
//!
//! A call gets a full retry budget on the primary model. If that budget ends
//! on a retryable error and a distinct fallback model is configured, the call
//! is repeated once on the fallback with a fresh budget.

use std::sync::Arc;

use ff_config::{GeminiConfig, RetrySettings};

use crate::error::GeneratorError;
use crate::generator::{Generator, InlineImage};
use crate::retry::{RetryPolicy, with_retry};

/// Text produced by a routed call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    pub text: String,
    /// Model that produced `text`.
    pub model: String,
    /// Attempts across primary and fallback.
    pub attempts: u32,
}

#[derive(Clone)]
pub struct ModelRouter {
    generator: Arc<dyn Generator>,
    primary: String,
    fallback: Option<String>,
    policy: RetryPolicy,
}

impl ModelRouter {
    /// A blank fallback, or one equal to the primary, disables fallback.
    #[must_use]
    pub fn new(
        generator: Arc<dyn Generator>,
        primary: impl Into<String>,
        fallback: Option<String>,
        policy: RetryPolicy,
    ) -> Self {
        let primary = primary.into();
        let fallback = fallback
            .map(|f| f.trim().to_string())
            .filter(|f| !f.is_empty() && *f != primary);
        Self {
            generator,
            primary,
            fallback,
            policy,
        }
    }

    #[must_use]
    pub fn from_config(
        generator: Arc<dyn Generator>,
        gemini: &GeminiConfig,
        retry: &RetrySettings,
    ) -> Self {
        Self::new(
            generator,
            gemini.model.clone(),
            Some(gemini.fallback_model.clone()),
            RetryPolicy::from_settings(retry),
        )
    }

    #[must_use]
    pub fn primary_model(&self) -> &str {
        &self.primary
    }

    #[must_use]
    pub fn fallback_model(&self) -> Option<&str> {
        self.fallback.as_deref()
    }

    /// Generate through the primary model, then the fallback if warranted.
    ///
    /// # Errors
    ///
    /// Returns the primary's error if it was fatal or no fallback applies,
    /// otherwise the fallback's final error.
    pub async fn generate(
        &self,
        prompt: &str,
        image: Option<&InlineImage>,
    ) -> Result<Generation, GeneratorError> {
        let error = match self.generate_with(&self.primary, prompt, image).await {
            Ok(generation) => return Ok(generation),
            Err(error) => error,
        };

        let Some(fallback) = self.fallback.as_deref() else {
            return Err(error);
        };
        if !error.is_retryable() {
            return Err(error);
        }

        tracing::warn!(
            primary = %self.primary,
            fallback,
            kind = %error.kind,
            "primary model exhausted its retry budget; switching to fallback"
        );
        let mut generation = self.generate_with(fallback, prompt, image).await?;
        generation.attempts += self.policy.max_attempts.max(1);
        Ok(generation)
    }

    async fn generate_with(
        &self,
        model: &str,
        prompt: &str,
        image: Option<&InlineImage>,
    ) -> Result<Generation, GeneratorError> {
        let retried = with_retry(&self.policy, || self.generator.generate(model, prompt, image)).await?;
        Ok(Generation {
            text: retried.value,
            model: model.to_string(),
            attempts: retried.attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::scripted::ScriptedGenerator;
    use pretty_assertions::assert_eq;

    fn router(script: &Arc<ScriptedGenerator>, fallback: Option<&str>) -> ModelRouter {
        ModelRouter::new(
            Arc::clone(script) as Arc<dyn Generator>,
            "flash",
            fallback.map(String::from),
            RetryPolicy::immediate(3),
        )
    }

    fn unavailable() -> GeneratorError {
        GeneratorError::classified(Some(503), "overloaded")
    }

    #[tokio::test]
    async fn primary_success_reports_primary_model() {
        let script = Arc::new(ScriptedGenerator::new());
        script.push_err(unavailable());
        script.push_ok("{}");

        let generation = router(&script, Some("pro")).generate("p", None).await.unwrap();
        assert_eq!(generation.model, "flash");
        assert_eq!(generation.attempts, 2);
    }

    #[tokio::test]
    async fn exhausted_primary_falls_back_with_fresh_budget() {
        let script = Arc::new(ScriptedGenerator::new());
        for _ in 0..3 {
            script.push_err(unavailable());
        }
        script.push_err(unavailable());
        script.push_ok(r#"{"ok":true}"#);

        let generation = router(&script, Some("pro")).generate("p", None).await.unwrap();
        assert_eq!(generation.model, "pro");
        assert_eq!(generation.attempts, 5);

        let models: Vec<String> = script.calls().into_iter().map(|c| c.model).collect();
        assert_eq!(models, vec!["flash", "flash", "flash", "pro", "pro"]);
    }

    #[tokio::test]
    async fn fatal_primary_error_skips_fallback() {
        let script = Arc::new(ScriptedGenerator::new());
        script.push_err(GeneratorError::unknown("bad request"));

        let err = router(&script, Some("pro")).generate("p", None).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unknown);
        assert_eq!(script.calls().len(), 1);
    }

    #[tokio::test]
    async fn same_name_fallback_is_disabled() {
        let script = Arc::new(ScriptedGenerator::new());
        for _ in 0..3 {
            script.push_err(GeneratorError::classified(Some(429), "slow down"));
        }

        let r = router(&script, Some("flash"));
        assert!(r.fallback_model().is_none());
        let err = r.generate("p", None).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::RateLimited);
        assert_eq!(script.calls().len(), 3);
    }
}
