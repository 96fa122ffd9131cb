//! Result sink backed by keyed record stores

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::storage::Storage;
use crate::domain::telemetry::{EvaluationRecord, FeedbackRecord, ResultSink, TelemetryRecord};
use crate::domain::DomainError;

/// Persists telemetry, evaluations and feedback, and serves lookups by transaction id
#[derive(Debug, Clone)]
pub struct StorageResultSink {
    telemetry: Arc<dyn Storage<TelemetryRecord>>,
    evaluations: Arc<dyn Storage<EvaluationRecord>>,
    feedback: Arc<dyn Storage<FeedbackRecord>>,
}

impl StorageResultSink {
    pub fn new(
        telemetry: Arc<dyn Storage<TelemetryRecord>>,
        evaluations: Arc<dyn Storage<EvaluationRecord>>,
        feedback: Arc<dyn Storage<FeedbackRecord>>,
    ) -> Self {
        Self {
            telemetry,
            evaluations,
            feedback,
        }
    }

    pub async fn telemetry(&self, transaction_id: &str) -> Result<Option<TelemetryRecord>, DomainError> {
        self.telemetry.get(transaction_id).await
    }

    pub async fn evaluation(
        &self,
        transaction_id: &str,
    ) -> Result<Option<EvaluationRecord>, DomainError> {
        self.evaluations.get(transaction_id).await
    }

    /// Stores feedback for a known transaction
    pub async fn record_feedback(
        &self,
        transaction_id: &str,
        feedback: &str,
        feedback_text: Option<String>,
    ) -> Result<FeedbackRecord, DomainError> {
        let telemetry = self.telemetry(transaction_id).await?.ok_or_else(|| {
            DomainError::not_found(format!("Transaction '{}' not found", transaction_id))
        })?;

        let record = FeedbackRecord::for_interaction(&telemetry, feedback, feedback_text);
        let record = self.feedback.create(record).await?;

        info!(transaction_id = %transaction_id, feedback = %feedback, "Feedback recorded");

        Ok(record)
    }

    /// Verifies the backing stores respond
    pub async fn health_check(&self) -> Result<(), DomainError> {
        self.telemetry.count().await?;
        self.evaluations.count().await?;
        self.feedback.count().await?;
        Ok(())
    }
}

#[async_trait]
impl ResultSink for StorageResultSink {
    async fn record_telemetry(&self, record: TelemetryRecord) -> Result<(), DomainError> {
        debug!(transaction_id = %record.transaction_id, "Recording telemetry");
        self.telemetry.save(record).await?;
        Ok(())
    }

    async fn record_evaluation(&self, record: EvaluationRecord) -> Result<(), DomainError> {
        debug!(transaction_id = %record.transaction_id, "Recording evaluation");
        self.evaluations.save(record).await?;
        Ok(())
    }
}
