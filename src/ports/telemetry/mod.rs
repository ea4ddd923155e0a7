mod media_events;

pub use media_events::{MediaEvent, MediaEventSink};
