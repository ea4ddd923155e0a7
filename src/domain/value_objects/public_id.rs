use crate::domain::errors::ValidationError;

const MAX_PUBLIC_ID_LEN: usize = 1024;

/// Opaque handle returned by the media store for an uploaded object
///
/// Required to delete the remote object later. Values read back from storage go
/// through [`PublicId::from_stored`], which accepts blank legacy values so that they
/// can be skipped during reclamation instead of failing the read.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PublicId(String);

impl PublicId {
    /// Create a new PublicId with validation
    pub fn new(value: String) -> Result<Self, ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::EmptyPublicId);
        }

        if value.len() > MAX_PUBLIC_ID_LEN {
            return Err(ValidationError::PublicIdTooLong {
                actual: value.len(),
                max: MAX_PUBLIC_ID_LEN,
            });
        }

        if let Some(c) = value.chars().find(|c| c.is_control()) {
            return Err(ValidationError::InvalidPublicIdCharacter(c));
        }

        Ok(Self(value))
    }

    /// Wrap a value loaded from the record store without validation
    pub fn from_stored(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Blank ids come from degenerate records and have no remote object
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl std::fmt::Display for PublicId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
