//! Interaction state and the node transition table

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::retrieval::RetrievedDocument;

use super::WorkflowError;

/// Path chosen by the router
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteDecision {
    Retrieval,
    Direct,
}

impl RouteDecision {
    /// Maps a classifier judgement to a route
    ///
    /// Retrieval iff the text contains "retrieval" in any casing. Anything else,
    /// including a missing judgement, routes directly.
    pub fn from_judgement(judgement: Option<&str>) -> Self {
        match judgement {
            Some(text) if text.to_lowercase().contains("retrieval") => Self::Retrieval,
            _ => Self::Direct,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Retrieval => "retrieval",
            Self::Direct => "direct",
        }
    }
}

impl fmt::Display for RouteDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Nodes of the interaction state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowNode {
    Router,
    Retrieval,
    Generation,
    DirectResponse,
    End,
}

impl WorkflowNode {
    /// Successor of this node given the current route
    ///
    /// The router without a decision falls through to a direct response.
    pub fn next(self, route: Option<RouteDecision>) -> Self {
        match self {
            Self::Router => match route {
                Some(RouteDecision::Retrieval) => Self::Retrieval,
                _ => Self::DirectResponse,
            },
            Self::Retrieval => Self::Generation,
            Self::Generation | Self::DirectResponse | Self::End => Self::End,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Router => "router",
            Self::Retrieval => "retrieval",
            Self::Generation => "generation",
            Self::DirectResponse => "direct_response",
            Self::End => "end",
        }
    }
}

/// Mutable per-query state, owned by a single engine invocation
#[derive(Debug, Clone)]
pub struct InteractionState {
    query: String,
    pub session_id: String,
    pub transaction_id: String,
    pub route: Option<RouteDecision>,
    pub retrieved_documents: Vec<RetrievedDocument>,
    pub context: String,
    pub response: Option<String>,
}

impl InteractionState {
    /// Starts a new interaction with a fresh transaction id
    ///
    /// A session id is generated when none is supplied.
    pub fn new(query: impl Into<String>, session_id: Option<String>) -> Self {
        Self {
            query: query.into(),
            session_id: session_id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            transaction_id: Uuid::new_v4().to_string(),
            route: None,
            retrieved_documents: Vec::new(),
            context: String::new(),
            response: None,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Converts the finished state into the caller-facing outcome
    pub fn into_outcome(self) -> Result<InteractionOutcome, WorkflowError> {
        let route = self
            .route
            .ok_or_else(|| WorkflowError::incomplete("route was never decided"))?;
        let response = self
            .response
            .ok_or_else(|| WorkflowError::incomplete("no response was produced"))?;

        Ok(InteractionOutcome {
            response,
            transaction_id: self.transaction_id,
            session_id: self.session_id,
            retrieved_documents: self.retrieved_documents,
            route,
        })
    }
}

/// Result of processing one query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionOutcome {
    pub response: String,
    pub transaction_id: String,
    pub session_id: String,
    pub retrieved_documents: Vec<RetrievedDocument>,
    pub route: RouteDecision,
}

impl InteractionOutcome {
    /// Retrieved passage texts in retriever order
    pub fn contexts(&self) -> Vec<String> {
        self.retrieved_documents
            .iter()
            .map(|d| d.content.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_judgement_retrieval() {
        assert_eq!(
            RouteDecision::from_judgement(Some("retrieval")),
            RouteDecision::Retrieval
        );
        assert_eq!(
            RouteDecision::from_judgement(Some("  RETRIEVAL\n")),
            RouteDecision::Retrieval
        );
        assert_eq!(
            RouteDecision::from_judgement(Some("This needs retrieval.")),
            RouteDecision::Retrieval
        );
    }

    #[test]
    fn test_from_judgement_falls_back_to_direct() {
        assert_eq!(
            RouteDecision::from_judgement(Some("direct")),
            RouteDecision::Direct
        );
        assert_eq!(
            RouteDecision::from_judgement(Some("I think you should look it up")),
            RouteDecision::Direct
        );
        assert_eq!(RouteDecision::from_judgement(Some("")), RouteDecision::Direct);
        assert_eq!(RouteDecision::from_judgement(None), RouteDecision::Direct);
    }

    #[test]
    fn test_route_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&RouteDecision::Retrieval).unwrap(),
            "\"retrieval\""
        );
        assert_eq!(RouteDecision::Direct.to_string(), "direct");
    }

    #[test]
    fn test_node_transitions() {
        assert_eq!(
            WorkflowNode::Router.next(Some(RouteDecision::Retrieval)),
            WorkflowNode::Retrieval
        );
        assert_eq!(
            WorkflowNode::Router.next(Some(RouteDecision::Direct)),
            WorkflowNode::DirectResponse
        );
        assert_eq!(WorkflowNode::Router.next(None), WorkflowNode::DirectResponse);
        assert_eq!(
            WorkflowNode::Retrieval.next(Some(RouteDecision::Retrieval)),
            WorkflowNode::Generation
        );
        assert_eq!(
            WorkflowNode::Generation.next(Some(RouteDecision::Retrieval)),
            WorkflowNode::End
        );
        assert_eq!(
            WorkflowNode::DirectResponse.next(Some(RouteDecision::Direct)),
            WorkflowNode::End
        );
    }

    #[test]
    fn test_new_state_assigns_ids() {
        let a = InteractionState::new("hello", None);
        let b = InteractionState::new("hello", Some("session-1".to_string()));

        assert!(Uuid::parse_str(&a.transaction_id).is_ok());
        assert!(Uuid::parse_str(&a.session_id).is_ok());
        assert_ne!(a.transaction_id, b.transaction_id);
        assert_eq!(b.session_id, "session-1");
        assert!(a.route.is_none());
    }

    #[test]
    fn test_into_outcome_requires_route_and_response() {
        let mut state = InteractionState::new("hello", None);
        assert!(state.clone().into_outcome().is_err());

        state.route = Some(RouteDecision::Direct);
        assert!(state.clone().into_outcome().is_err());

        state.response = Some("hi".to_string());
        let outcome = state.into_outcome().unwrap();

        assert_eq!(outcome.route, RouteDecision::Direct);
        assert_eq!(outcome.response, "hi");
        assert!(outcome.retrieved_documents.is_empty());
    }
}
