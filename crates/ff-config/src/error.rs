//! FieldFix configuration errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A TOML file or `FIELDFIX_*` variable could not be merged or extracted.
    #[error("Failed to load FieldFix configuration: {0}")]
    Load(#[from] figment::Error),

    /// A credential the caller needs is absent. `env` names the variable that
    /// would supply it.
    #[error("'{section}' is not configured; set {env}")]
    MissingCredential {
        section: &'static str,
        env: &'static str,
    },

    /// A loaded value no stage can run with.
    #[error("Invalid value for '{field}': {reason}")]
    OutOfRange {
        field: &'static str,
        reason: &'static str,
    },
}
