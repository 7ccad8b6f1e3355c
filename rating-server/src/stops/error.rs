//! Stop catalogue error types.

use std::path::PathBuf;

use crate::domain::StopKind;

/// Errors that can occur when loading the stop catalogue.
#[derive(Debug, thiserror::Error)]
pub enum StopError {
    /// Catalogue file could not be read
    #[error("failed to read stop catalogue {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to parse catalogue JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// A stop has coordinates outside the valid range
    #[error("invalid {kind} stop {id:?}: {message}")]
    InvalidStop {
        kind: StopKind,
        id: String,
        message: String,
    },
}
