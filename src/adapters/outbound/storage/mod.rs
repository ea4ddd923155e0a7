// Infrastructure error types
pub mod error;

// Media store implementations
pub mod object_store_media_adapter;

// Provider-specific configuration
pub mod s3;

// Re-export key types
pub use error::StoreError;
pub use object_store_media_adapter::ObjectStoreMediaAdapter;
pub use s3::{S3Config, create_s3_store};
