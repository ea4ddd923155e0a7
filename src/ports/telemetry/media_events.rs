use crate::domain::{
    errors::MediaStoreError,
    value_objects::{PropertyId, PublicId},
};

/// Observable events emitted while moving images in and out of the media store
#[derive(Debug, Clone)]
pub enum MediaEvent {
    /// A zero-length payload was skipped
    UploadSkipped { position: usize, file_name: String },

    UploadSucceeded {
        position: usize,
        public_id: PublicId,
    },

    UploadFailed {
        position: usize,
        file_name: String,
        error: MediaStoreError,
    },

    /// Some uploads of a batch failed but at least one survived
    UploadDegraded { attempted: usize, succeeded: usize },

    /// The requested primary image did not survive the upload
    PrimaryReassigned {
        requested: usize,
        assigned: usize,
    },

    /// A blank identifier from a degenerate record was skipped
    RemovalSkipped { index: usize },

    RemovalSucceeded { public_id: PublicId },

    /// The store no longer had the object; counted as success
    RemovalMissing { public_id: PublicId },

    RemovalFailed {
        public_id: PublicId,
        error: MediaStoreError,
    },

    /// Freshly uploaded images were orphaned by a failed commit
    CommitFailed {
        property_id: PropertyId,
        orphaned: usize,
        message: String,
    },

    PropertyCreated {
        property_id: PropertyId,
        images: usize,
    },

    ImageSetReplaced {
        property_id: PropertyId,
        images: usize,
        displaced: usize,
    },

    PropertyDeleted {
        property_id: PropertyId,
        images: usize,
    },
}

/// Sink receiving media events
///
/// Injected into the batch drivers and the property service; there is no global
/// logger behind these components.
pub trait MediaEventSink: Send + Sync + 'static {
    fn record(&self, event: MediaEvent);
}
