//! Reference-based lexical scorers

use async_trait::async_trait;

use crate::domain::evaluation::lexical::{bleu, rouge};
use crate::domain::evaluation::{EvaluationInput, Metric, MetricError, MetricScorer};

/// Sentence BLEU-4 against the expected output
#[derive(Debug, Default)]
pub struct BleuScorer;

#[async_trait]
impl MetricScorer for BleuScorer {
    fn metric(&self) -> Metric {
        Metric::Bleu
    }

    async fn score(&self, input: &EvaluationInput) -> Result<f32, MetricError> {
        let reference = input
            .expected_output
            .as_deref()
            .ok_or(MetricError::MissingReference)?;

        Ok(bleu(&input.response, reference))
    }
}

/// ROUGE-L F1 against the expected output
#[derive(Debug, Default)]
pub struct RougeScorer;

#[async_trait]
impl MetricScorer for RougeScorer {
    fn metric(&self) -> Metric {
        Metric::Rouge
    }

    async fn score(&self, input: &EvaluationInput) -> Result<f32, MetricError> {
        let reference = input
            .expected_output
            .as_deref()
            .ok_or(MetricError::MissingReference)?;

        Ok(rouge(&input.response, reference).rouge_l)
    }
}
