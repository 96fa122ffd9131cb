//! Domain layer - Core business logic and entities

pub mod embedding;
pub mod error;
pub mod evaluation;
pub mod llm;
pub mod retrieval;
pub mod session;
pub mod storage;
pub mod telemetry;
pub mod workflow;

pub use embedding::EmbeddingProvider;
pub use error::DomainError;
pub use evaluation::{
    BatchEvaluationResult, EvaluationError, EvaluationInput, EvaluationResult, Metric,
    MetricError, MetricScorer,
};
pub use llm::{LlmProvider, LlmRequest, LlmResponse, Message, MessageRole};
pub use retrieval::{DocumentStore, NewDocument, RetrievedDocument, Retriever};
pub use session::{ChatSession, HistoryEntry, SessionSummary};
pub use storage::{Storage, StorageEntity};
pub use telemetry::{EvaluationRecord, FeedbackRecord, ResultSink, TelemetryRecord};
pub use workflow::{
    InteractionOutcome, InteractionState, RouteDecision, WorkflowEngine, WorkflowError,
};
