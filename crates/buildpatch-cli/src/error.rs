//! Error types for buildpatch-cli

use std::path::PathBuf;

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from the patching core
    #[error(transparent)]
    Content(#[from] buildpatch_content::Error),

    /// A patch failed against a specific file
    #[error("{}: {source}", .path.display())]
    Patch {
        path: PathBuf,
        #[source]
        source: buildpatch_content::Error,
    },

    /// Error from buildpatch-fs
    #[error(transparent)]
    Fs(#[from] buildpatch_fs::Error),

    /// JSON report serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Attach the file a patch was running against
    pub fn patch(path: impl Into<PathBuf>, source: buildpatch_content::Error) -> Self {
        Self::Patch {
            path: path.into(),
            source,
        }
    }

    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
