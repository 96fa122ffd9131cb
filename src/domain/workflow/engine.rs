//! Workflow engine trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::InteractionOutcome;

/// Runs one query through the routing workflow
///
/// Always produces an outcome; node failures are absorbed by fallbacks.
#[async_trait]
pub trait WorkflowEngine: Send + Sync + Debug {
    async fn process(&self, query: &str, session_id: Option<String>) -> InteractionOutcome;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use crate::domain::retrieval::RetrievedDocument;
    use crate::domain::workflow::RouteDecision;
    use uuid::Uuid;

    /// Engine returning a canned answer
    #[derive(Debug)]
    pub struct MockWorkflowEngine {
        response: String,
        route: RouteDecision,
        documents: Vec<RetrievedDocument>,
    }

    impl MockWorkflowEngine {
        pub fn new(response: impl Into<String>) -> Self {
            Self {
                response: response.into(),
                route: RouteDecision::Direct,
                documents: Vec::new(),
            }
        }

        pub fn with_documents(mut self, documents: Vec<RetrievedDocument>) -> Self {
            self.route = RouteDecision::Retrieval;
            self.documents = documents;
            self
        }
    }

    #[async_trait]
    impl WorkflowEngine for MockWorkflowEngine {
        async fn process(&self, _query: &str, session_id: Option<String>) -> InteractionOutcome {
            InteractionOutcome {
                response: self.response.clone(),
                transaction_id: Uuid::new_v4().to_string(),
                session_id: session_id.unwrap_or_else(|| Uuid::new_v4().to_string()),
                retrieved_documents: self.documents.clone(),
                route: self.route,
            }
        }
    }
}
