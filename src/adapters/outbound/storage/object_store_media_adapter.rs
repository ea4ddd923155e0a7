use async_trait::async_trait;
use object_store::{
    Attribute, Attributes, ObjectStore as ApacheObjectStore, PutOptions, PutPayload,
    path::Path as ObjectPath,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::{
        errors::{MediaStoreError, MediaStoreResult},
        models::ImageUpload,
        value_objects::PublicId,
    },
    ports::storage::{DeleteOutcome, MediaStore, StoredMedia},
};

/// Adapter that implements our MediaStore trait using Apache object_store
///
/// Objects land under `<prefix>/<uuid>.<ext>`. The object key doubles as the
/// public id, and the public URL is the key appended to `public_base_url`.
pub struct ObjectStoreMediaAdapter {
    inner: Arc<dyn ApacheObjectStore>,
    public_base_url: String,
    prefix: String,
}

impl ObjectStoreMediaAdapter {
    pub fn new(
        store: Arc<dyn ApacheObjectStore>,
        public_base_url: impl Into<String>,
        prefix: impl Into<String>,
    ) -> Self {
        Self {
            inner: store,
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
            prefix: prefix.into().trim_matches('/').to_string(),
        }
    }

    fn object_key(&self, image: &ImageUpload) -> String {
        let name = match image.extension() {
            Some(ext) => format!("{}.{}", Uuid::new_v4(), ext),
            None => Uuid::new_v4().to_string(),
        };

        if self.prefix.is_empty() {
            name
        } else {
            format!("{}/{}", self.prefix, name)
        }
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base_url, key)
    }
}

#[async_trait]
impl MediaStore for ObjectStoreMediaAdapter {
    async fn upload(&self, image: &ImageUpload) -> MediaStoreResult<StoredMedia> {
        let mut attributes = Attributes::new();
        if let Some(content_type) = &image.content_type {
            if !content_type.starts_with("image/") {
                return Err(MediaStoreError::Rejected {
                    file_name: image.file_name.clone(),
                    reason: format!("unsupported content type '{}'", content_type),
                });
            }
            attributes.insert(Attribute::ContentType, content_type.clone().into());
        }

        let key = self.object_key(image);
        let path = ObjectPath::from(key.as_str());
        let payload = PutPayload::from(image.data.clone());
        let options = PutOptions {
            attributes,
            ..Default::default()
        };

        self.inner.put_opts(&path, payload, options).await?;

        let public_id = PublicId::new(path.to_string()).map_err(|e| MediaStoreError::Backend {
            message: format!("Store produced an unusable key: {}", e),
            source: None,
        })?;

        Ok(StoredMedia {
            url: self.public_url(public_id.as_str()),
            public_id,
        })
    }

    async fn delete(&self, public_id: &PublicId) -> MediaStoreResult<DeleteOutcome> {
        let path = ObjectPath::from(public_id.as_str());

        // Most backends report success for absent keys, so check with head first
        match self.inner.head(&path).await {
            Ok(_) => {}
            Err(object_store::Error::NotFound { .. }) => return Ok(DeleteOutcome::NotFound),
            Err(e) => return Err(e.into()),
        }

        match self.inner.delete(&path).await {
            Ok(()) => Ok(DeleteOutcome::Deleted),
            Err(object_store::Error::NotFound { .. }) => Ok(DeleteOutcome::NotFound),
            Err(e) => Err(e.into()),
        }
    }
}
