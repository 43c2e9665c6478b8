//! Queue-driven generator for tests and offline runs.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::error::GeneratorError;
use crate::generator::{Generator, InlineImage};

/// One recorded call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptedCall {
    pub model: String,
    pub prompt: String,
    pub with_image: bool,
}

/// Answers calls from a FIFO of scripted results and records every call.
/// An empty queue answers with a non-retryable error.
#[derive(Debug, Default)]
pub struct ScriptedGenerator {
    script: Mutex<VecDeque<Result<String, GeneratorError>>>,
    calls: Mutex<Vec<ScriptedCall>>,
}

impl ScriptedGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_ok(&self, text: impl Into<String>) {
        self.lock_script().push_back(Ok(text.into()));
    }

    pub fn push_err(&self, error: GeneratorError) {
        self.lock_script().push_back(Err(error));
    }

    /// Calls received so far, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<ScriptedCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Scripted results not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.lock_script().len()
    }

    fn lock_script(&self) -> std::sync::MutexGuard<'_, VecDeque<Result<String, GeneratorError>>> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl Generator for ScriptedGenerator {
    async fn generate(
        &self,
        model: &str,
        prompt: &str,
        image: Option<&InlineImage>,
    ) -> Result<String, GeneratorError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(ScriptedCall {
                model: model.to_string(),
                prompt: prompt.to_string(),
                with_image: image.is_some(),
            });
        self.lock_script()
            .pop_front()
            .unwrap_or_else(|| Err(GeneratorError::unknown("scripted generator exhausted")))
    }
}
