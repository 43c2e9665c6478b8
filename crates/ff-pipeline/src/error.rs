//! Stage failure taxonomy.

use std::fmt;

use ff_core::errors::CoreError;
use ff_db::error::DatabaseError;
use ff_gen::GeneratorError;
use ff_schema::SchemaError;
use serde::Serialize;
use thiserror::Error;

/// Why a stage gave up.
#[derive(Debug, Error)]
pub enum StageError {
    /// A required request field is missing or blank.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A referenced record does not exist (or belongs to another session).
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// The session's status does not allow this stage.
    #[error(transparent)]
    InvalidTransition(CoreError),

    /// The generator failed after retries and fallback.
    #[error(transparent)]
    Generator(#[from] GeneratorError),

    /// Model output held no parseable JSON object, even after one repair.
    #[error("Generator output is not valid JSON")]
    Parse { raw: String },

    /// Parsed output broke its stage contract.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Quota fallback was needed but no static plan exists for the scenario.
    #[error("Generator quota exceeded and no fallback plan exists for {scenario}")]
    FallbackUnavailable { scenario: String },

    /// The latest safety check failed and was not acknowledged.
    #[error("Safety check {safety_check_id} failed; acknowledge it to create a work order")]
    SafetyNotCleared { safety_check_id: String },

    /// The store exists but its tables do not.
    #[error("Storage not ready: {0}")]
    StorageNotReady(String),

    #[error(transparent)]
    Database(DatabaseError),
}

/// What callers see of a [`StageError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureStatus {
    InvalidInput,
    NotFound,
    GeneratorUnavailable,
    UnparseableOutput,
    SchemaViolation,
    PreconditionFailed,
    StorageNotReady,
    Internal,
}

impl FailureStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidInput => "invalid_input",
            Self::NotFound => "not_found",
            Self::GeneratorUnavailable => "generator_unavailable",
            Self::UnparseableOutput => "unparseable_output",
            Self::SchemaViolation => "schema_violation",
            Self::PreconditionFailed => "precondition_failed",
            Self::StorageNotReady => "storage_not_ready",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for FailureStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl StageError {
    #[must_use]
    pub const fn status(&self) -> FailureStatus {
        match self {
            Self::InvalidInput(_) => FailureStatus::InvalidInput,
            Self::NotFound { .. } => FailureStatus::NotFound,
            Self::Generator(_) | Self::FallbackUnavailable { .. } => {
                FailureStatus::GeneratorUnavailable
            }
            Self::Parse { .. } => FailureStatus::UnparseableOutput,
            Self::Schema(_) => FailureStatus::SchemaViolation,
            Self::InvalidTransition(_) | Self::SafetyNotCleared { .. } => {
                FailureStatus::PreconditionFailed
            }
            Self::StorageNotReady(_) => FailureStatus::StorageNotReady,
            Self::Database(_) => FailureStatus::Internal,
        }
    }

    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub(crate) fn not_found(entity: &'static str, id: &str) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

impl From<DatabaseError> for StageError {
    fn from(error: DatabaseError) -> Self {
        match error {
            DatabaseError::SchemaMissing { .. } => Self::StorageNotReady(error.to_string()),
            other => Self::Database(other),
        }
    }
}

impl From<CoreError> for StageError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Validation(message) => Self::InvalidInput(message),
            transition @ CoreError::InvalidTransition { .. } => Self::InvalidTransition(transition),
        }
    }
}

/// Look up a record, turning `NoResult` into [`StageError::NotFound`].
pub(crate) trait OrNotFound<T> {
    fn or_not_found(self, entity: &'static str, id: &str) -> Result<T, StageError>;
}

impl<T> OrNotFound<T> for Result<T, DatabaseError> {
    fn or_not_found(self, entity: &'static str, id: &str) -> Result<T, StageError> {
        match self {
            Ok(value) => Ok(value),
            Err(DatabaseError::NoResult) => Err(StageError::not_found(entity, id)),
            Err(other) => Err(other.into()),
        }
    }
}
