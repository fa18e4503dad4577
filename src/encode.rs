pub mod sink;

pub use sink::{FrameSink, InMemorySink, PngSequenceSink, SinkConfig, write_png};
