//! S3-compatible backend for the media adapter
//!
//! Works against AWS S3 as well as MinIO and other S3 lookalikes through
//! `endpoint`.

use object_store::{ObjectStore as ObjectStoreBackend, aws::AmazonS3Builder};
use std::sync::Arc;

use super::error::StoreError;

/// Configuration for S3 storage backend
#[derive(Debug, Clone)]
pub struct S3Config {
    pub bucket: String,
    pub region: String,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub endpoint: Option<String>,
}

/// Create an S3 store from configuration
pub fn create_s3_store(config: &S3Config) -> Result<Arc<dyn ObjectStoreBackend>, StoreError> {
    if config.bucket.trim().is_empty() {
        return Err(StoreError::InvalidConfig("S3 bucket name is empty".to_string()));
    }

    let mut builder = AmazonS3Builder::new()
        .with_bucket_name(&config.bucket)
        .with_region(&config.region);

    if let Some(access_key) = &config.access_key {
        builder = builder.with_access_key_id(access_key);
    }

    if let Some(secret_key) = &config.secret_key {
        builder = builder.with_secret_access_key(secret_key);
    }

    if let Some(endpoint) = &config.endpoint {
        // Plain-http endpoints are the norm for local MinIO
        builder = builder
            .with_endpoint(endpoint)
            .with_allow_http(endpoint.starts_with("http://"));
    }

    let store = builder.build()?;

    Ok(Arc::new(store))
}
