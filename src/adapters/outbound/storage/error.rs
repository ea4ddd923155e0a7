use crate::domain::errors::MediaStoreError;
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum StoreError {
    #[error("Object store error: {0}")]
    ObjectStore(#[from] object_store::Error),

    #[error("Invalid media store configuration: {0}")]
    InvalidConfig(String),
}

/// Convert object_store errors to media store errors
impl From<object_store::Error> for MediaStoreError {
    fn from(err: object_store::Error) -> Self {
        match err {
            object_store::Error::Generic { store, source } => MediaStoreError::Transport {
                message: format!("{} request failed: {}", store, source),
            },
            object_store::Error::NotSupported { .. } => MediaStoreError::Backend {
                message: "Operation not supported by the configured store".to_string(),
                source: Some(err.to_string()),
            },
            _ => MediaStoreError::Backend {
                message: format!("Object store operation failed: {}", err),
                source: Some(err.to_string()),
            },
        }
    }
}
