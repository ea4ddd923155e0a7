mod listing_errors;
mod media_store_errors;
mod repository_errors;
mod validation_errors;

pub use listing_errors::*;
pub use media_store_errors::*;
pub use repository_errors::*;
pub use validation_errors::*;
