use crate::domain::{
    errors::{RepositoryError, ValidationError},
    models::ViewingStatus,
    value_objects::{AgentId, PropertyId, ViewingRequestId},
};

/// Errors surfaced to callers of the listing operations
///
/// Media store failures never appear here: the batch drivers absorb them and the
/// manager only learns whether any upload survived.
#[derive(Debug, Clone)]
pub enum ListingError {
    /// The request was rejected before any remote or persistence call
    Validation(ValidationError),

    /// Every upload in the batch failed
    UploadExhausted { attempted: usize },

    /// Property not found
    PropertyNotFound { id: PropertyId },

    /// The property belongs to another agent
    NotOwner {
        property_id: PropertyId,
        agent_id: AgentId,
    },

    /// Viewing request not found, or not addressed to the calling agent
    ViewingRequestNotFound { id: ViewingRequestId },

    /// The viewing request cannot move from its current status to the requested one
    InvalidStatusTransition {
        from: ViewingStatus,
        to: ViewingStatus,
    },

    /// The record store failed
    Repository { message: String },
}

impl std::fmt::Display for ListingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListingError::Validation(err) => write!(f, "Validation failed: {}", err),
            ListingError::UploadExhausted { attempted } => {
                write!(
                    f,
                    "Failed to upload any images ({} attempted); please try again",
                    attempted
                )
            }
            ListingError::PropertyNotFound { id } => write!(f, "Property not found: {}", id),
            ListingError::NotOwner {
                property_id,
                agent_id,
            } => {
                write!(
                    f,
                    "Agent {} does not own property {}",
                    agent_id, property_id
                )
            }
            ListingError::ViewingRequestNotFound { id } => {
                write!(f, "Viewing request not found: {}", id)
            }
            ListingError::InvalidStatusTransition { from, to } => {
                write!(f, "Cannot change viewing status from {} to {}", from, to)
            }
            ListingError::Repository { message } => write!(f, "Repository error: {}", message),
        }
    }
}

impl std::error::Error for ListingError {}

impl From<ValidationError> for ListingError {
    fn from(err: ValidationError) -> Self {
        ListingError::Validation(err)
    }
}

impl From<RepositoryError> for ListingError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::PropertyNotFound { id } => ListingError::PropertyNotFound { id },
            RepositoryError::ViewingRequestNotFound { id } => {
                ListingError::ViewingRequestNotFound { id }
            }
            other => ListingError::Repository {
                message: other.to_string(),
            },
        }
    }
}

/// Result type for listing operations
pub type ListingResult<T> = Result<T, ListingError>;
