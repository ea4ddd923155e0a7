use futures::future::join_all;
use std::sync::Arc;

use crate::{
    domain::value_objects::PublicId,
    ports::{
        storage::{DeleteOutcome, MediaStore},
        telemetry::{MediaEvent, MediaEventSink},
    },
};

/// Tally of a reclamation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RemovalReport {
    pub attempted: usize,
    pub removed: usize,
    pub missing: usize,
    pub failed: usize,
    pub skipped: usize,
}

/// Best-effort reclamation of remote images
///
/// Every non-blank id gets exactly one delete attempt; a failure is reported and
/// the pass carries on. Leaked remote objects are preferred over blocking the
/// caller.
#[derive(Clone)]
pub struct ImageBatchRemover {
    store: Arc<dyn MediaStore>,
    events: Arc<dyn MediaEventSink>,
}

enum Removal {
    Removed,
    Missing,
    Failed,
}

impl ImageBatchRemover {
    pub fn new(store: Arc<dyn MediaStore>, events: Arc<dyn MediaEventSink>) -> Self {
        Self { store, events }
    }

    pub async fn remove_all(&self, public_ids: &[PublicId]) -> RemovalReport {
        let mut report = RemovalReport::default();
        let mut attempts = Vec::with_capacity(public_ids.len());

        for (index, public_id) in public_ids.iter().enumerate() {
            if public_id.is_blank() {
                self.events.record(MediaEvent::RemovalSkipped { index });
                report.skipped += 1;
                continue;
            }
            attempts.push(self.remove_one(public_id));
        }

        report.attempted = attempts.len();
        for outcome in join_all(attempts).await {
            match outcome {
                Removal::Removed => report.removed += 1,
                Removal::Missing => report.missing += 1,
                Removal::Failed => report.failed += 1,
            }
        }

        report
    }

    async fn remove_one(&self, public_id: &PublicId) -> Removal {
        match self.store.delete(public_id).await {
            Ok(DeleteOutcome::Deleted) => {
                self.events.record(MediaEvent::RemovalSucceeded {
                    public_id: public_id.clone(),
                });
                Removal::Removed
            }
            Ok(DeleteOutcome::NotFound) => {
                self.events.record(MediaEvent::RemovalMissing {
                    public_id: public_id.clone(),
                });
                Removal::Missing
            }
            Err(error) => {
                self.events.record(MediaEvent::RemovalFailed {
                    public_id: public_id.clone(),
                    error,
                });
                Removal::Failed
            }
        }
    }
}
