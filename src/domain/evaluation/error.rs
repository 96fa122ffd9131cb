//! Evaluation error types

use thiserror::Error;

/// Outcome of a single scorer that did not produce a value
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MetricError {
    #[error("Judge call failed: {0}")]
    Judge(String),

    #[error("Invalid judgement: {0}")]
    InvalidJudgement(String),

    #[error("Reference answer required")]
    MissingReference,

    #[error("Retrieval context required")]
    MissingContext,
}

impl MetricError {
    pub fn judge(message: impl Into<String>) -> Self {
        Self::Judge(message.into())
    }

    pub fn invalid_judgement(message: impl Into<String>) -> Self {
        Self::InvalidJudgement(message.into())
    }
}

/// Rejected evaluation requests
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EvaluationError {
    #[error("Evaluation batch is empty")]
    EmptyBatch,

    #[error("Case {index} has an empty query")]
    EmptyQuery { index: usize },

    #[error("Case {index} has an empty response")]
    EmptyResponse { index: usize },
}
