//! Telemetry persistence

mod storage_sink;

pub use storage_sink::StorageResultSink;
