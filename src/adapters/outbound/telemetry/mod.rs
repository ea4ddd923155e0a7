pub mod tracing_event_sink;

pub use tracing_event_sink::TracingEventSink;
