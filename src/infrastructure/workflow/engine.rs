//! Routing RAG workflow engine

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, error, info, warn};

use crate::domain::retrieval::Retriever;
use crate::domain::telemetry::{ResultSink, TelemetryRecord};
use crate::domain::workflow::{
    assemble_context, complete_prompt, grounded_instruction, Generator, InteractionOutcome,
    InteractionState, RouteDecision, RoutingClassifier, WorkflowEngine, WorkflowError,
    WorkflowNode, APOLOGY_RESPONSE, DIRECT_INSTRUCTION,
};

/// Drives one query through router, retrieval and generation nodes
pub struct RagWorkflowEngine {
    classifier: Arc<dyn RoutingClassifier>,
    retriever: Arc<dyn Retriever>,
    generator: Arc<dyn Generator>,
    sink: Arc<dyn ResultSink>,
    top_k: usize,
}

impl fmt::Debug for RagWorkflowEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RagWorkflowEngine")
            .field("classifier", &self.classifier)
            .field("generator", &self.generator)
            .field("top_k", &self.top_k)
            .finish_non_exhaustive()
    }
}

impl RagWorkflowEngine {
    pub fn new(
        classifier: Arc<dyn RoutingClassifier>,
        retriever: Arc<dyn Retriever>,
        generator: Arc<dyn Generator>,
        sink: Arc<dyn ResultSink>,
    ) -> Self {
        Self {
            classifier,
            retriever,
            generator,
            sink,
            top_k: 5,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    async fn run_node(&self, node: WorkflowNode, state: &mut InteractionState) {
        match node {
            WorkflowNode::Router => {
                state.route = Some(self.classifier.route(state.query()).await);
            }
            WorkflowNode::Retrieval => self.retrieve(state).await,
            WorkflowNode::Generation => {
                let instruction = grounded_instruction(&state.context);
                self.generate(state, &instruction).await;
            }
            WorkflowNode::DirectResponse => self.generate(state, DIRECT_INSTRUCTION).await,
            WorkflowNode::End => {}
        }
    }

    async fn retrieve(&self, state: &mut InteractionState) {
        match self.retriever.search(state.query(), self.top_k).await {
            Ok(documents) => {
                state.context = assemble_context(&documents);
                state.retrieved_documents = documents;
            }
            Err(e) => {
                let e = WorkflowError::retrieval(e.to_string());
                warn!(
                    transaction_id = %state.transaction_id,
                    error = %e,
                    "Continuing with empty context"
                );
            }
        }
    }

    async fn generate(&self, state: &mut InteractionState, instruction: &str) {
        let response = match self.generator.complete(instruction, state.query()).await {
            Ok(text) => text,
            Err(e) => {
                warn!(
                    transaction_id = %state.transaction_id,
                    error = %e,
                    "Answering with apology"
                );
                APOLOGY_RESPONSE.to_string()
            }
        };

        state.response = Some(response);
    }

    async fn emit_telemetry(&self, state: &InteractionState) {
        let record = TelemetryRecord {
            transaction_id: state.transaction_id.clone(),
            session_id: state.session_id.clone(),
            query: state.query().to_string(),
            retrieved_documents: state.retrieved_documents.clone(),
            assembled_context: state.context.clone(),
            complete_prompt: complete_prompt(state.query(), &state.context),
            response: state.response.clone().unwrap_or_default(),
            created_at: Utc::now(),
        };

        if let Err(e) = self.sink.record_telemetry(record).await {
            warn!(
                transaction_id = %state.transaction_id,
                error = %e,
                "Failed to record telemetry"
            );
        }
    }
}

#[async_trait]
impl WorkflowEngine for RagWorkflowEngine {
    async fn process(&self, query: &str, session_id: Option<String>) -> InteractionOutcome {
        let mut state = InteractionState::new(query, session_id);
        let mut node = WorkflowNode::Router;

        while node != WorkflowNode::End {
            debug!(transaction_id = %state.transaction_id, node = node.name(), "Entering node");
            self.run_node(node, &mut state).await;
            node = node.next(state.route);
        }

        self.emit_telemetry(&state).await;

        let transaction_id = state.transaction_id.clone();
        let session_id = state.session_id.clone();

        match state.into_outcome() {
            Ok(outcome) => {
                info!(
                    transaction_id = %outcome.transaction_id,
                    session_id = %outcome.session_id,
                    route = %outcome.route,
                    documents = outcome.retrieved_documents.len(),
                    "Query processed"
                );
                outcome
            }
            Err(e) => {
                error!(transaction_id = %transaction_id, error = %e, "Workflow ended early");
                InteractionOutcome {
                    response: APOLOGY_RESPONSE.to_string(),
                    transaction_id,
                    session_id,
                    retrieved_documents: Vec::new(),
                    route: RouteDecision::Direct,
                }
            }
        }
    }
}
