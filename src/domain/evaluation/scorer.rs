//! Metric scorer trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::{EvaluationInput, Metric, MetricError};

/// Computes one named score for an interaction
#[async_trait]
pub trait MetricScorer: Send + Sync + Debug {
    fn metric(&self) -> Metric;

    async fn score(&self, input: &EvaluationInput) -> Result<f32, MetricError>;
}
