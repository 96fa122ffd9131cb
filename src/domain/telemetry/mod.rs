//! Telemetry domain - persisted interaction, evaluation and feedback records

mod record;
mod sink;

pub use record::{EvaluationRecord, FeedbackRecord, TelemetryRecord};
pub use sink::ResultSink;

#[cfg(test)]
pub use sink::MockResultSink;
