//! Application state for shared services

use std::sync::Arc;

use crate::domain::retrieval::DocumentStore;
use crate::domain::workflow::WorkflowEngine;
use crate::infrastructure::evaluation::{EvaluationPipeline, EvaluationQueue};
use crate::infrastructure::session::SessionService;
use crate::infrastructure::telemetry::StorageResultSink;

/// Services shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<dyn WorkflowEngine>,
    pub documents: Arc<dyn DocumentStore>,
    pub sessions: SessionService,
    pub results: StorageResultSink,
    pub pipeline: Arc<EvaluationPipeline>,
    /// Absent when background evaluation is disabled
    pub evaluation_queue: Option<EvaluationQueue>,
}

impl AppState {
    pub fn new(
        engine: Arc<dyn WorkflowEngine>,
        documents: Arc<dyn DocumentStore>,
        sessions: SessionService,
        results: StorageResultSink,
        pipeline: Arc<EvaluationPipeline>,
    ) -> Self {
        Self {
            engine,
            documents,
            sessions,
            results,
            pipeline,
            evaluation_queue: None,
        }
    }

    pub fn with_evaluation_queue(mut self, queue: EvaluationQueue) -> Self {
        self.evaluation_queue = Some(queue);
        self
    }
}
