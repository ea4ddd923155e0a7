//! Scripted collaborators shared by the service unit tests

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use crate::{
    domain::{
        errors::{MediaStoreError, MediaStoreResult},
        models::ImageUpload,
        value_objects::PublicId,
    },
    ports::{
        storage::{DeleteOutcome, MediaStore, StoredMedia},
        telemetry::{MediaEvent, MediaEventSink},
    },
};

/// Media store whose failures are scripted per file name or public id
#[derive(Default)]
pub struct ScriptedMediaStore {
    state: Mutex<ScriptedState>,
}

#[derive(Default)]
struct ScriptedState {
    failing_uploads: HashSet<String>,
    failing_deletes: HashSet<String>,
    fail_all_deletes: bool,
    next_id: usize,
    objects: HashMap<String, String>,
    uploads: Vec<String>,
    deletes: Vec<String>,
}

impl ScriptedMediaStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_upload_of(self, file_name: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .failing_uploads
            .insert(file_name.to_string());
        self
    }

    pub fn fail_delete_of(self, public_id: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .failing_deletes
            .insert(public_id.to_string());
        self
    }

    pub fn fail_all_deletes(self) -> Self {
        self.state.lock().unwrap().fail_all_deletes = true;
        self
    }

    /// Pretend an object already lives in the store
    pub fn seed(&self, public_id: &str) {
        self.state
            .lock()
            .unwrap()
            .objects
            .insert(public_id.to_string(), "seeded".to_string());
    }

    pub fn upload_calls(&self) -> Vec<String> {
        self.state.lock().unwrap().uploads.clone()
    }

    pub fn delete_calls(&self) -> Vec<String> {
        self.state.lock().unwrap().deletes.clone()
    }

    pub fn contains(&self, public_id: &str) -> bool {
        self.state.lock().unwrap().objects.contains_key(public_id)
    }

    pub fn object_count(&self) -> usize {
        self.state.lock().unwrap().objects.len()
    }
}

#[async_trait]
impl MediaStore for ScriptedMediaStore {
    async fn upload(&self, image: &ImageUpload) -> MediaStoreResult<StoredMedia> {
        let mut state = self.state.lock().unwrap();
        state.uploads.push(image.file_name.clone());

        if state.failing_uploads.contains(&image.file_name) {
            return Err(MediaStoreError::Transport {
                message: format!("connection reset while sending {}", image.file_name),
            });
        }

        state.next_id += 1;
        let public_id = format!("media/{}-{}", state.next_id, image.file_name);
        state
            .objects
            .insert(public_id.clone(), image.file_name.clone());

        Ok(StoredMedia {
            url: format!("https://cdn.test/{}", public_id),
            public_id: PublicId::new(public_id).unwrap(),
        })
    }

    async fn delete(&self, public_id: &PublicId) -> MediaStoreResult<DeleteOutcome> {
        let mut state = self.state.lock().unwrap();
        state.deletes.push(public_id.as_str().to_string());

        if state.fail_all_deletes || state.failing_deletes.contains(public_id.as_str()) {
            return Err(MediaStoreError::Backend {
                message: format!("cannot delete {}", public_id),
                source: None,
            });
        }

        match state.objects.remove(public_id.as_str()) {
            Some(_) => Ok(DeleteOutcome::Deleted),
            None => Ok(DeleteOutcome::NotFound),
        }
    }
}

/// Event sink keeping every event for later assertions
#[derive(Default)]
pub struct RecordingEventSink {
    events: Mutex<Vec<MediaEvent>>,
}

impl RecordingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<MediaEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl MediaEventSink for RecordingEventSink {
    fn record(&self, event: MediaEvent) {
        self.events.lock().unwrap().push(event);
    }
}

pub fn image(file_name: &str) -> ImageUpload {
    ImageUpload::new(file_name, file_name.as_bytes().to_vec()).with_content_type("image/jpeg")
}

pub fn empty_image(file_name: &str) -> ImageUpload {
    ImageUpload::new(file_name, Vec::<u8>::new())
}
