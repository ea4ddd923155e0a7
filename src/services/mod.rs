mod image_batch_remover;
mod image_batch_uploader;
mod property_service_impl;
mod viewing_request_service_impl;

#[cfg(test)]
pub(crate) mod test_support;

pub use image_batch_remover::{ImageBatchRemover, RemovalReport};
pub use image_batch_uploader::ImageBatchUploader;
pub use property_service_impl::{PropertyServiceBuilder, PropertyServiceImpl};
pub use viewing_request_service_impl::ViewingRequestServiceImpl;
