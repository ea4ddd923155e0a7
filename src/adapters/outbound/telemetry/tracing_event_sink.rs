use tracing::{debug, info, warn};

use crate::ports::telemetry::{MediaEvent, MediaEventSink};

/// Forwards media events to `tracing` as structured records
///
/// Per-image successes log at debug; anything that leaks or degrades a batch
/// logs at warn.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

impl TracingEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl MediaEventSink for TracingEventSink {
    fn record(&self, event: MediaEvent) {
        match event {
            MediaEvent::UploadSkipped { position, file_name } => {
                debug!(position, %file_name, "Skipping empty image payload");
            }
            MediaEvent::UploadSucceeded {
                position,
                public_id,
            } => {
                debug!(position, %public_id, "Image uploaded");
            }
            MediaEvent::UploadFailed {
                position,
                file_name,
                error,
            } => {
                warn!(position, %file_name, %error, "Image upload failed");
            }
            MediaEvent::UploadDegraded {
                attempted,
                succeeded,
            } => {
                warn!(attempted, succeeded, "Image batch partially uploaded");
            }
            MediaEvent::PrimaryReassigned {
                requested,
                assigned,
            } => {
                info!(requested, assigned, "Requested primary image was not uploaded, reassigned");
            }
            MediaEvent::RemovalSkipped { index } => {
                debug!(index, "Skipping blank public id");
            }
            MediaEvent::RemovalSucceeded { public_id } => {
                debug!(%public_id, "Image removed from media store");
            }
            MediaEvent::RemovalMissing { public_id } => {
                debug!(%public_id, "Image already absent from media store");
            }
            MediaEvent::RemovalFailed { public_id, error } => {
                warn!(%public_id, %error, "Image removal failed, remote object leaked");
            }
            MediaEvent::CommitFailed {
                property_id,
                orphaned,
                message,
            } => {
                warn!(%property_id, orphaned, %message, "Commit failed, reclaiming fresh uploads");
            }
            MediaEvent::PropertyCreated {
                property_id,
                images,
            } => {
                info!(%property_id, images, "Property created");
            }
            MediaEvent::ImageSetReplaced {
                property_id,
                images,
                displaced,
            } => {
                info!(%property_id, images, displaced, "Property image set replaced");
            }
            MediaEvent::PropertyDeleted {
                property_id,
                images,
            } => {
                info!(%property_id, images, "Property deleted");
            }
        }
    }
}
