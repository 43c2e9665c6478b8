//! KB error types.

use std::path::PathBuf;

/// Errors reading a corpus file.
#[derive(Debug, thiserror::Error)]
pub enum KbError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid corpus file {path}: {message}")]
    Parse { path: PathBuf, message: String },
}
