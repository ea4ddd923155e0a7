mod property_repository;
mod viewing_request_repository;

pub use property_repository::PropertyRepository;
pub use viewing_request_repository::ViewingRequestRepository;
