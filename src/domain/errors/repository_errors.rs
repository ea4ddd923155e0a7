use crate::domain::value_objects::{PropertyId, ViewingRequestId};

/// Errors raised by the property record store
#[derive(Debug, Clone)]
pub enum RepositoryError {
    /// No property with this id
    PropertyNotFound { id: PropertyId },

    /// Property id already taken
    DuplicateProperty { id: PropertyId },

    /// No viewing request with this id
    ViewingRequestNotFound { id: ViewingRequestId },

    /// Viewing request id already taken
    DuplicateViewingRequest { id: ViewingRequestId },

    /// Infrastructure error with external source
    Infrastructure {
        message: String,
        source: Option<String>,
    },
}

impl std::fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepositoryError::PropertyNotFound { id } => write!(f, "Property not found: {}", id),
            RepositoryError::DuplicateProperty { id } => {
                write!(f, "Property already exists: {}", id)
            }
            RepositoryError::ViewingRequestNotFound { id } => {
                write!(f, "Viewing request not found: {}", id)
            }
            RepositoryError::DuplicateViewingRequest { id } => {
                write!(f, "Viewing request already exists: {}", id)
            }
            RepositoryError::Infrastructure { message, .. } => {
                write!(f, "Repository error: {}", message)
            }
        }
    }
}

impl std::error::Error for RepositoryError {}

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;
