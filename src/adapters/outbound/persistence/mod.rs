pub mod in_memory_property_repository;
pub mod in_memory_viewing_request_repository;
pub mod sql_property_repository;
pub mod sql_viewing_request_repository;

pub use in_memory_property_repository::InMemoryPropertyRepository;
pub use in_memory_viewing_request_repository::InMemoryViewingRequestRepository;
pub use sql_property_repository::SqlPropertyRepository;
pub use sql_viewing_request_repository::SqlViewingRequestRepository;
