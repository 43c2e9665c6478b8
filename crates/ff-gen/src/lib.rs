//! # ff-gen
//!
//! Everything between a stage and the generative model.
//!
//! - [`Generator`]: the black-box `generate(model, prompt, image) -> text` seam
//! - [`classify`]: the single place raw failures become an [`ErrorKind`]
//! - [`with_retry`]: bounded exponential backoff with jitter
//! - [`ModelRouter`]: primary model first, one fresh budget on the fallback
//! - [`json`]: fence stripping, balanced-object extraction, tolerant parsing
//! - [`prompts`]: stage prompt templates
//! - [`GeminiClient`]: REST implementation of [`Generator`]
//! - [`ScriptedGenerator`]: queued responses for tests and offline runs

pub mod error;
pub mod gemini;
pub mod generator;
pub mod json;
pub mod prompts;
pub mod retry;
pub mod router;
pub mod scripted;

pub use error::{ErrorKind, GeneratorError, classify, is_quota};
pub use gemini::GeminiClient;
pub use generator::{Generator, InlineImage, UnconfiguredGenerator};
pub use retry::{Retried, RetryPolicy, with_retry};
pub use router::{Generation, ModelRouter};
pub use scripted::ScriptedGenerator;
