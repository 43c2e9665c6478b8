//! Cross-cutting error types for FieldFix.
//!
//! Domain-specific errors (e.g., `DatabaseError`, `GeneratorError`) are defined
//! in their respective crates. Stage-level failures converge in `ff-pipeline`
//! as `StageError`, and the binary unifies everything through `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any FieldFix crate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A state machine transition was attempted that is not allowed.
    #[error("Invalid state transition: {entity_type} {id} from {from} to {to}")]
    InvalidTransition {
        entity_type: String,
        id: String,
        from: String,
        to: String,
    },

    /// Data failed validation (format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),
}
