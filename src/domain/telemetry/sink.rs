//! Result sink trait

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::domain::DomainError;

use super::{EvaluationRecord, TelemetryRecord};

/// Destination for telemetry and evaluation results
///
/// Callers log and swallow failures; a failed write never affects the answer.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ResultSink: Send + Sync {
    async fn record_telemetry(&self, record: TelemetryRecord) -> Result<(), DomainError>;

    async fn record_evaluation(&self, record: EvaluationRecord) -> Result<(), DomainError>;
}
