//! Error types for buildpatch-content

/// Result type for buildpatch-content operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while patching text
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Marker not found: {}", format_candidates(.candidates))]
    MarkerNotFound { candidates: Vec<String> },

    #[error("Invalid marker: {message}")]
    InvalidMarker { message: String },

    #[error("Invalid line pattern {pattern:?}: {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("Unresolved template placeholder: __{name}__")]
    UnresolvedPlaceholder { name: String },

    #[error("Unknown built-in template: {0}")]
    UnknownTemplate(String),
}

impl Error {
    pub fn marker_not_found<S: AsRef<str>>(candidates: &[S]) -> Self {
        Self::MarkerNotFound {
            candidates: candidates.iter().map(|c| c.as_ref().to_string()).collect(),
        }
    }

    pub fn invalid_marker(message: impl Into<String>) -> Self {
        Self::InvalidMarker {
            message: message.into(),
        }
    }
}

fn format_candidates(candidates: &[String]) -> String {
    candidates
        .iter()
        .map(|c| format!("{c:?}"))
        .collect::<Vec<_>>()
        .join(" | ")
}
