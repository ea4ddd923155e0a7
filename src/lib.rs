pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

// Re-export key types for convenience

// Domain types - core business entities and value objects
pub use domain::{
    // Value objects
    AgentId,
    AgentViewingRequest,
    // Models
    CreatePropertyRequest,
    CreateViewingRequest,
    DeletePropertyRequest,
    GuestContact,
    GuestViewingRequest,
    ImageId,
    ImageSetRequest,
    ImageUpload,
    // Errors
    ListingError,
    ListingResult,
    MAX_IMAGES_PER_PROPERTY,
    MediaStoreError,
    Property,
    PropertyDetails,
    PropertyId,
    PropertyImage,
    PublicId,
    RepositoryError,
    Requester,
    UpdatePropertyRequest,
    UpdateViewingStatusRequest,
    ValidationError,
    ViewingRequest,
    ViewingRequestId,
    ViewingStatus,
};

// Port types - interfaces for external systems
pub use ports::{
    DeleteOutcome,
    MediaEvent,
    // Telemetry ports
    MediaEventSink,
    // Storage ports
    MediaStore,
    // Repository ports
    PropertyRepository,
    // Service ports
    PropertyService,
    StoredMedia,
    ViewingRequestRepository,
    ViewingRequestService,
};

// Service implementations - business logic
pub use services::{
    ImageBatchRemover, ImageBatchUploader, PropertyServiceBuilder, PropertyServiceImpl,
    RemovalReport, ViewingRequestServiceImpl,
};

// Application factory and configuration
pub use app::{
    AppBuilder, AppConfig, AppDependencies, AppError, AppServices, MediaConfig,
    RepositoryBackend, StorageBackend, create_app_from_env, create_in_memory_app,
};

// Adapter types - infrastructure implementations
pub use adapters::outbound::{
    persistence::{
        InMemoryPropertyRepository, InMemoryViewingRequestRepository, SqlPropertyRepository,
        SqlViewingRequestRepository,
    },
    storage::ObjectStoreMediaAdapter,
    telemetry::TracingEventSink,
};

// Public facade for easy construction
pub mod prelude {
    pub use crate::{
        AgentId, AppBuilder, AppServices, CreatePropertyRequest, ImageSetRequest, ImageUpload,
        InMemoryPropertyRepository, ObjectStoreMediaAdapter, PropertyDetails, PropertyId,
        PropertyService, PropertyServiceImpl, create_in_memory_app,
    };
}
