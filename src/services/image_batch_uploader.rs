use futures::future::join_all;
use std::sync::Arc;

use crate::{
    domain::models::{ImageUpload, MAX_IMAGES_PER_PROPERTY, UploadedImage},
    ports::{
        storage::MediaStore,
        telemetry::{MediaEvent, MediaEventSink},
    },
};

/// Fans a batch of image payloads out to the media store
///
/// Per-item failures are reported to the event sink and swallowed, so one bad
/// image never blocks the others. Deciding whether an empty result is fatal is
/// left to the caller.
#[derive(Clone)]
pub struct ImageBatchUploader {
    store: Arc<dyn MediaStore>,
    events: Arc<dyn MediaEventSink>,
}

impl ImageBatchUploader {
    pub fn new(store: Arc<dyn MediaStore>, events: Arc<dyn MediaEventSink>) -> Self {
        Self { store, events }
    }

    /// Upload every non-empty payload among the first five
    ///
    /// Uploads run concurrently; the returned list keeps input order and each
    /// entry carries the position of its source payload.
    pub async fn upload_all(&self, images: &[ImageUpload]) -> Vec<UploadedImage> {
        let mut attempts = Vec::with_capacity(images.len().min(MAX_IMAGES_PER_PROPERTY));

        for (position, image) in images.iter().take(MAX_IMAGES_PER_PROPERTY).enumerate() {
            if image.is_empty() {
                self.events.record(MediaEvent::UploadSkipped {
                    position,
                    file_name: image.file_name.clone(),
                });
                continue;
            }
            attempts.push(self.upload_one(position, image));
        }

        let attempted = attempts.len();
        let uploaded: Vec<UploadedImage> = join_all(attempts).await.into_iter().flatten().collect();

        if !uploaded.is_empty() && uploaded.len() < attempted {
            self.events.record(MediaEvent::UploadDegraded {
                attempted,
                succeeded: uploaded.len(),
            });
        }

        uploaded
    }

    async fn upload_one(&self, position: usize, image: &ImageUpload) -> Option<UploadedImage> {
        match self.store.upload(image).await {
            Ok(stored) => {
                self.events.record(MediaEvent::UploadSucceeded {
                    position,
                    public_id: stored.public_id.clone(),
                });
                Some(UploadedImage {
                    position,
                    url: stored.url,
                    public_id: stored.public_id,
                })
            }
            Err(error) => {
                self.events.record(MediaEvent::UploadFailed {
                    position,
                    file_name: image.file_name.clone(),
                    error,
                });
                None
            }
        }
    }
}
