pub mod image;
pub mod property;
pub mod viewing_request;

pub use image::*;
pub use property::*;
pub use viewing_request::*;
