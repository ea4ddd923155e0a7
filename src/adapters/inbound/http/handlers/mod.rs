pub mod property_handlers;
pub mod viewing_request_handlers;

pub use property_handlers::*;
pub use viewing_request_handlers::*;
