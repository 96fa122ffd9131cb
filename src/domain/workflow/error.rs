//! Workflow error types

use thiserror::Error;

/// Failures inside a workflow node
///
/// These never leave the engine: each node has a fallback and the error is logged.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum WorkflowError {
    #[error("Routing failed: {0}")]
    Routing(String),

    #[error("Retrieval failed: {0}")]
    Retrieval(String),

    #[error("Generation failed: {0}")]
    Generation(String),

    #[error("Interaction incomplete: {0}")]
    Incomplete(String),
}

impl WorkflowError {
    pub fn routing(message: impl Into<String>) -> Self {
        Self::Routing(message.into())
    }

    pub fn retrieval(message: impl Into<String>) -> Self {
        Self::Retrieval(message.into())
    }

    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation(message.into())
    }

    pub fn incomplete(message: impl Into<String>) -> Self {
        Self::Incomplete(message.into())
    }
}
