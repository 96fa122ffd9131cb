//! Evaluation domain - metrics, inputs, results and scorer contracts

mod error;
mod input;
pub mod lexical;
mod metric;
mod result;
mod scorer;

pub use error::{EvaluationError, MetricError};
pub use input::EvaluationInput;
pub use metric::Metric;
pub use result::{BatchEvaluationResult, EvaluationResult};
pub use scorer::MetricScorer;

#[cfg(test)]
pub use scorer::mock::MockScorer;
