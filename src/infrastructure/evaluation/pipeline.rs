//! Multi-metric evaluation pipeline

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use futures::future::join_all;
use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use crate::domain::evaluation::{
    BatchEvaluationResult, EvaluationError, EvaluationInput, EvaluationResult, Metric,
    MetricScorer,
};
use crate::domain::llm::LlmProvider;
use crate::domain::telemetry::{EvaluationRecord, ResultSink};

use super::judge::LlmJudgeScorer;
use super::lexical::{BleuScorer, RougeScorer};

/// Runs every scorer over an interaction and assembles the eight-score result
pub struct EvaluationPipeline {
    scorers: Vec<Arc<dyn MetricScorer>>,
    sink: Option<Arc<dyn ResultSink>>,
    batch_concurrency: usize,
}

impl fmt::Debug for EvaluationPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvaluationPipeline")
            .field("scorers", &self.scorers)
            .field("has_sink", &self.sink.is_some())
            .field("batch_concurrency", &self.batch_concurrency)
            .finish()
    }
}

impl EvaluationPipeline {
    pub fn new(scorers: Vec<Arc<dyn MetricScorer>>) -> Self {
        Self {
            scorers,
            sink: None,
            batch_concurrency: 4,
        }
    }

    /// Six judge scorers plus BLEU and ROUGE
    ///
    /// `threshold` supplies the pass mark logged for each judged metric.
    pub fn with_judge(
        provider: Arc<dyn LlmProvider>,
        model: &str,
        threshold: impl Fn(Metric) -> f32,
    ) -> Self {
        let mut scorers: Vec<Arc<dyn MetricScorer>> = Metric::MODEL_GRADED
            .iter()
            .map(|metric| {
                Arc::new(
                    LlmJudgeScorer::new(provider.clone(), model, *metric)
                        .with_threshold(threshold(*metric)),
                ) as Arc<dyn MetricScorer>
            })
            .collect();

        scorers.push(Arc::new(BleuScorer));
        scorers.push(Arc::new(RougeScorer));

        Self::new(scorers)
    }

    pub fn with_sink(mut self, sink: Arc<dyn ResultSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn with_batch_concurrency(mut self, concurrency: usize) -> Self {
        self.batch_concurrency = concurrency.max(1);
        self
    }

    fn applies(metric: Metric, input: &EvaluationInput) -> bool {
        if metric.requires_context() && !input.has_context() {
            return false;
        }

        if metric.requires_reference() && input.expected_output.is_none() {
            return false;
        }

        true
    }

    /// Runs the applicable scorers concurrently, failures keep the default score
    async fn run_scorers<'a>(
        &'a self,
        input: &'a EvaluationInput,
        filter: impl Fn(Metric) -> bool,
    ) -> Vec<(Metric, f32)> {
        let runs = self
            .scorers
            .iter()
            .filter(|s| filter(s.metric()) && Self::applies(s.metric(), input))
            .map(|scorer| async move { (scorer.metric(), scorer.score(input).await) });

        join_all(runs)
            .await
            .into_iter()
            .filter_map(|(metric, outcome)| match outcome {
                Ok(value) => Some((metric, value)),
                Err(e) => {
                    warn!(metric = %metric, error = %e, "Scorer failed, keeping default");
                    None
                }
            })
            .collect()
    }

    /// Scores one interaction, persisting the result when it carries a transaction id
    pub async fn evaluate(&self, input: EvaluationInput) -> EvaluationResult {
        let scores = self.run_scorers(&input, |_| true).await;
        let result = EvaluationResult::from_scores(scores);

        debug!(transaction_id = ?input.transaction_id, scores = ?result.to_map(), "Evaluation complete");

        if let (Some(transaction_id), Some(sink)) = (&input.transaction_id, &self.sink) {
            let record = EvaluationRecord::new(transaction_id.clone(), result);

            if let Err(e) = sink.record_evaluation(record).await {
                warn!(transaction_id = %transaction_id, error = %e, "Failed to record evaluation");
            }
        }

        result
    }

    /// Scores a batch with the model-graded metrics only, preserving case order
    pub async fn evaluate_batch(
        &self,
        cases: Vec<EvaluationInput>,
    ) -> Result<BatchEvaluationResult, EvaluationError> {
        validate_batch(&cases)?;

        info!(cases = cases.len(), concurrency = self.batch_concurrency, "Evaluating batch");

        let results: Vec<BTreeMap<Metric, f32>> = stream::iter(cases)
            .map(|case| async move {
                let mut scores: BTreeMap<Metric, f32> =
                    Metric::MODEL_GRADED.iter().map(|m| (*m, 0.0)).collect();

                scores.extend(self.run_scorers(&case, |m| m.is_model_graded()).await);
                scores
            })
            .buffered(self.batch_concurrency)
            .collect()
            .await;

        Ok(BatchEvaluationResult::from_cases(results))
    }
}

fn validate_batch(cases: &[EvaluationInput]) -> Result<(), EvaluationError> {
    if cases.is_empty() {
        return Err(EvaluationError::EmptyBatch);
    }

    for (index, case) in cases.iter().enumerate() {
        if case.query.trim().is_empty() {
            return Err(EvaluationError::EmptyQuery { index });
        }

        if case.response.trim().is_empty() {
            return Err(EvaluationError::EmptyResponse { index });
        }
    }

    Ok(())
}
