use crate::domain::{
    errors::MediaStoreResult, models::ImageUpload, value_objects::PublicId,
};
use async_trait::async_trait;

/// Port for the remote media store holding listing images
/// This abstracts the actual hosting backend (S3, MinIO, a CDN service, ...)
///
/// Implementations must be safe for concurrent independent calls. Each upload is
/// all-or-nothing: a failed upload leaves no remote object behind.
#[async_trait]
pub trait MediaStore: Send + Sync + 'static {
    /// Upload one image and return where it can be fetched from
    async fn upload(&self, image: &ImageUpload) -> MediaStoreResult<StoredMedia>;

    /// Delete one uploaded image
    async fn delete(&self, public_id: &PublicId) -> MediaStoreResult<DeleteOutcome>;
}

/// Location of an uploaded image
#[derive(Debug, Clone, PartialEq)]
pub struct StoredMedia {
    pub url: String,
    pub public_id: PublicId,
}

/// Outcome of a delete call; both variants count as success
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
}
