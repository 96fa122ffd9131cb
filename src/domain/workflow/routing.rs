//! Routing classifier trait

use async_trait::async_trait;
use std::fmt::Debug;
use tracing::warn;

use super::{RouteDecision, WorkflowError};

/// Produces the raw routing judgement for a query
#[async_trait]
pub trait RoutingClassifier: Send + Sync + Debug {
    /// Raw judgement text, expected to be "retrieval" or "direct"
    async fn classify(&self, query: &str) -> Result<String, WorkflowError>;

    /// Classifies the query and applies the routing rule
    ///
    /// Classifier failures route directly.
    async fn route(&self, query: &str) -> RouteDecision {
        match self.classify(query).await {
            Ok(judgement) => RouteDecision::from_judgement(Some(&judgement)),
            Err(e) => {
                warn!(error = %e, "Routing classifier failed, answering directly");
                RouteDecision::from_judgement(None)
            }
        }
    }
}
