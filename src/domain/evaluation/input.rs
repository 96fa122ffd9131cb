//! Evaluation input

use serde::{Deserialize, Serialize};

/// One completed interaction to be graded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationInput {
    pub query: String,
    pub response: String,
    /// Retrieved passage texts in retriever order
    #[serde(default)]
    pub contexts: Vec<String>,
    /// Reference answer, enables the lexical scores
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_output: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
}

impl EvaluationInput {
    pub fn new(query: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            response: response.into(),
            contexts: Vec::new(),
            expected_output: None,
            transaction_id: None,
        }
    }

    pub fn with_contexts(mut self, contexts: Vec<String>) -> Self {
        self.contexts = contexts;
        self
    }

    pub fn with_expected_output(mut self, expected: impl Into<String>) -> Self {
        self.expected_output = Some(expected.into());
        self
    }

    pub fn with_transaction_id(mut self, transaction_id: impl Into<String>) -> Self {
        self.transaction_id = Some(transaction_id.into());
        self
    }

    pub fn has_context(&self) -> bool {
        !self.contexts.is_empty()
    }

    /// Reference used by recall-style judgements, the response itself when absent
    pub fn reference_or_response(&self) -> &str {
        self.expected_output.as_deref().unwrap_or(&self.response)
    }
}
