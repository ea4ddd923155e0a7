pub mod repositories;
pub mod services;
pub mod storage;
pub mod telemetry;

// Re-export all port traits for convenience
pub use repositories::{PropertyRepository, ViewingRequestRepository};
pub use services::{PropertyService, ViewingRequestService};
pub use storage::{DeleteOutcome, MediaStore, StoredMedia};
pub use telemetry::{MediaEvent, MediaEventSink};
