use bytes::Bytes;
use chrono::{DateTime, Utc};

use crate::domain::{
    errors::ValidationError,
    value_objects::{ImageId, PropertyId, PublicId},
};

/// Maximum number of images a single property may carry
pub const MAX_IMAGES_PER_PROPERTY: usize = 5;

/// Minimum number of images a property must carry once it exists
pub const MIN_IMAGES_PER_PROPERTY: usize = 1;

/// A binary image payload received from a caller
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            data: data.into(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Lowercased file extension, if the file name has one
    pub fn extension(&self) -> Option<String> {
        let (stem, ext) = self.file_name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }
}

/// A new image set supplied with a create or update
///
/// `orders` runs parallel to `images`; missing entries fall back to the
/// image's one-based position and surplus entries are ignored.
#[derive(Debug, Clone)]
pub struct ImageSetRequest {
    pub images: Vec<ImageUpload>,
    pub orders: Vec<i32>,
    pub primary_index: usize,
}

impl ImageSetRequest {
    pub fn new(images: Vec<ImageUpload>) -> Self {
        Self {
            images,
            orders: Vec::new(),
            primary_index: 0,
        }
    }

    pub fn with_orders(mut self, orders: Vec<i32>) -> Self {
        self.orders = orders;
        self
    }

    pub fn with_primary_index(mut self, primary_index: usize) -> Self {
        self.primary_index = primary_index;
        self
    }

    /// Check count bounds and the primary index
    pub fn validate(&self) -> Result<(), ValidationError> {
        let count = self.images.len();

        if count < MIN_IMAGES_PER_PROPERTY {
            return Err(ValidationError::NoImages);
        }

        if count > MAX_IMAGES_PER_PROPERTY {
            return Err(ValidationError::TooManyImages {
                actual: count,
                max: MAX_IMAGES_PER_PROPERTY,
            });
        }

        if self.primary_index >= count {
            return Err(ValidationError::PrimaryIndexOutOfRange {
                index: self.primary_index,
                count,
            });
        }

        Ok(())
    }

    /// Display order for the image at `position`
    pub fn order_for(&self, position: usize) -> i32 {
        self.orders
            .get(position)
            .copied()
            .unwrap_or(position as i32 + 1)
    }
}

/// Result of a single successful upload inside a batch
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedImage {
    /// Zero-based index of the source payload in the request
    pub position: usize,
    pub url: String,
    pub public_id: PublicId,
}

/// A persisted image belonging to a property
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyImage {
    pub id: ImageId,
    pub property_id: PropertyId,
    pub url: String,
    pub public_id: PublicId,
    pub display_order: i32,
    pub is_primary: bool,
    pub created_at: DateTime<Utc>,
}
