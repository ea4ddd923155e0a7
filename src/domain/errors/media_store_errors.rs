/// Errors reported by a remote media store for a single upload or deletion
#[derive(Debug, Clone)]
pub enum MediaStoreError {
    /// The store could not be reached or the connection dropped
    Transport { message: String },

    /// The call did not finish in time
    Timeout { operation: String },

    /// Storage quota exceeded on the remote account
    QuotaExceeded { message: String },

    /// The store refused the payload (bad format, too large, ...)
    Rejected { file_name: String, reason: String },

    /// Any other failure reported by the backend
    Backend {
        message: String,
        source: Option<String>, // Store error as string to allow Clone
    },
}

impl std::fmt::Display for MediaStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaStoreError::Transport { message } => {
                write!(f, "Media store transport error: {}", message)
            }
            MediaStoreError::Timeout { operation } => {
                write!(f, "Media store operation '{}' timed out", operation)
            }
            MediaStoreError::QuotaExceeded { message } => {
                write!(f, "Media store quota exceeded: {}", message)
            }
            MediaStoreError::Rejected { file_name, reason } => {
                write!(f, "Media store rejected '{}': {}", file_name, reason)
            }
            MediaStoreError::Backend { message, .. } => {
                write!(f, "Media store backend error: {}", message)
            }
        }
    }
}

impl std::error::Error for MediaStoreError {}

/// Result type for media store operations
pub type MediaStoreResult<T> = Result<T, MediaStoreError>;
