//! Background evaluation queue
//!
//! Submission never blocks and never reports completion. Each accepted job runs at
//! most once; jobs arriving while the queue is full or closed are dropped.

use std::sync::Arc;

use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::domain::evaluation::EvaluationInput;

use super::pipeline::EvaluationPipeline;

/// Sending half handed to request handlers
#[derive(Debug, Clone)]
pub struct EvaluationQueue {
    sender: mpsc::Sender<EvaluationInput>,
}

impl EvaluationQueue {
    /// Creates a bounded queue and its receiving half
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<EvaluationInput>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (Self { sender }, receiver)
    }

    /// Creates a queue with a running worker
    pub fn start(
        pipeline: Arc<EvaluationPipeline>,
        capacity: usize,
        max_concurrent: usize,
    ) -> (Self, JoinHandle<()>) {
        let (queue, receiver) = Self::new(capacity);
        let handle = EvaluationWorker::new(receiver, pipeline, max_concurrent).spawn();
        (queue, handle)
    }

    /// Hands a job to the worker, returns whether it was accepted
    pub fn submit(&self, input: EvaluationInput) -> bool {
        let transaction_id = input.transaction_id.clone().unwrap_or_default();

        match self.sender.try_send(input) {
            Ok(()) => {
                debug!(transaction_id = %transaction_id, "Evaluation queued");
                true
            }
            Err(TrySendError::Full(_)) => {
                warn!(transaction_id = %transaction_id, "Evaluation queue full, dropping job");
                false
            }
            Err(TrySendError::Closed(_)) => {
                warn!(transaction_id = %transaction_id, "Evaluation queue closed, dropping job");
                false
            }
        }
    }
}

/// Drains the queue, running jobs under a concurrency limit
#[derive(Debug)]
pub struct EvaluationWorker {
    receiver: mpsc::Receiver<EvaluationInput>,
    pipeline: Arc<EvaluationPipeline>,
    permits: Arc<Semaphore>,
}

impl EvaluationWorker {
    pub fn new(
        receiver: mpsc::Receiver<EvaluationInput>,
        pipeline: Arc<EvaluationPipeline>,
        max_concurrent: usize,
    ) -> Self {
        Self {
            receiver,
            pipeline,
            permits: Arc::new(Semaphore::new(max_concurrent.max(1))),
        }
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// Runs until every sender is dropped
    pub async fn run(mut self) {
        info!("Evaluation worker started");

        while let Some(input) = self.receiver.recv().await {
            let Ok(permit) = self.permits.clone().acquire_owned().await else {
                break;
            };
            let pipeline = self.pipeline.clone();

            tokio::spawn(async move {
                pipeline.evaluate(input).await;
                drop(permit);
            });
        }

        info!("Evaluation worker stopped");
    }
}
