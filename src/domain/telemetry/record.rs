//! Persisted records keyed by transaction or feedback id

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::evaluation::EvaluationResult;
use crate::domain::retrieval::RetrievedDocument;
use crate::domain::storage::StorageEntity;

/// Everything the engine saw and produced for one query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryRecord {
    pub transaction_id: String,
    pub session_id: String,
    pub query: String,
    pub retrieved_documents: Vec<RetrievedDocument>,
    pub assembled_context: String,
    pub complete_prompt: String,
    pub response: String,
    pub created_at: DateTime<Utc>,
}

impl StorageEntity for TelemetryRecord {
    const COLLECTION: &'static str = "telemetry_logs";

    fn key(&self) -> &str {
        &self.transaction_id
    }
}

/// Scores for one transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub transaction_id: String,
    pub scores: EvaluationResult,
    pub evaluated_at: DateTime<Utc>,
}

impl EvaluationRecord {
    pub fn new(transaction_id: impl Into<String>, scores: EvaluationResult) -> Self {
        Self {
            transaction_id: transaction_id.into(),
            scores,
            evaluated_at: Utc::now(),
        }
    }
}

impl StorageEntity for EvaluationRecord {
    const COLLECTION: &'static str = "evaluation_metrics";

    fn key(&self) -> &str {
        &self.transaction_id
    }
}

/// User feedback on an answer, with the query and response copied from telemetry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub id: String,
    pub transaction_id: String,
    pub feedback: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback_text: Option<String>,
    pub query: String,
    pub response: String,
    pub created_at: DateTime<Utc>,
}

impl FeedbackRecord {
    pub fn for_interaction(
        telemetry: &TelemetryRecord,
        feedback: impl Into<String>,
        feedback_text: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            transaction_id: telemetry.transaction_id.clone(),
            feedback: feedback.into(),
            feedback_text,
            query: telemetry.query.clone(),
            response: telemetry.response.clone(),
            created_at: Utc::now(),
        }
    }
}

impl StorageEntity for FeedbackRecord {
    const COLLECTION: &'static str = "feedback_logs";

    fn key(&self) -> &str {
        &self.id
    }
}
