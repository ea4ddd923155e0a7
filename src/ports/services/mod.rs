mod property_service;
mod viewing_request_service;

pub use property_service::PropertyService;
pub use viewing_request_service::ViewingRequestService;
