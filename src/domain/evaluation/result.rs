//! Evaluation results

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Metric;

/// Fixed eight-score result, every score defaults to 0.0
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EvaluationResult {
    answer_relevancy: f32,
    faithfulness: f32,
    context_precision: f32,
    context_recall: f32,
    context_relevancy: f32,
    hallucination: f32,
    lexical_overlap_bleu: f32,
    lexical_overlap_rouge: f32,
}

impl EvaluationResult {
    /// Assembles a result, metrics not listed keep 0.0
    pub fn from_scores(scores: impl IntoIterator<Item = (Metric, f32)>) -> Self {
        let mut result = Self::default();

        for (metric, value) in scores {
            *result.slot(metric) = value;
        }

        result
    }

    fn slot(&mut self, metric: Metric) -> &mut f32 {
        match metric {
            Metric::AnswerRelevancy => &mut self.answer_relevancy,
            Metric::Faithfulness => &mut self.faithfulness,
            Metric::ContextPrecision => &mut self.context_precision,
            Metric::ContextRecall => &mut self.context_recall,
            Metric::ContextRelevancy => &mut self.context_relevancy,
            Metric::Hallucination => &mut self.hallucination,
            Metric::Bleu => &mut self.lexical_overlap_bleu,
            Metric::Rouge => &mut self.lexical_overlap_rouge,
        }
    }

    pub fn get(&self, metric: Metric) -> f32 {
        match metric {
            Metric::AnswerRelevancy => self.answer_relevancy,
            Metric::Faithfulness => self.faithfulness,
            Metric::ContextPrecision => self.context_precision,
            Metric::ContextRecall => self.context_recall,
            Metric::ContextRelevancy => self.context_relevancy,
            Metric::Hallucination => self.hallucination,
            Metric::Bleu => self.lexical_overlap_bleu,
            Metric::Rouge => self.lexical_overlap_rouge,
        }
    }

    /// All eight scores keyed by metric name
    pub fn to_map(&self) -> BTreeMap<&'static str, f32> {
        Metric::ALL
            .iter()
            .map(|m| (m.as_str(), self.get(*m)))
            .collect()
    }
}

/// Model-graded scores for a batch, in case order, plus per-metric means
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchEvaluationResult {
    pub cases: Vec<BTreeMap<Metric, f32>>,
    pub averages: BTreeMap<Metric, f32>,
}

impl BatchEvaluationResult {
    pub fn from_cases(cases: Vec<BTreeMap<Metric, f32>>) -> Self {
        let mut averages = BTreeMap::new();

        if !cases.is_empty() {
            for metric in Metric::MODEL_GRADED {
                let total: f32 = cases
                    .iter()
                    .map(|c| c.get(&metric).copied().unwrap_or(0.0))
                    .sum();
                averages.insert(metric, total / cases.len() as f32);
            }
        }

        Self { cases, averages }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_all_eight_keys() {
        let map = EvaluationResult::default().to_map();

        assert_eq!(map.len(), 8);
        assert!(map.values().all(|v| *v == 0.0));
        assert!(map.contains_key("lexical_overlap_rouge"));
    }

    #[test]
    fn test_from_scores_overwrites_only_listed() {
        let result = EvaluationResult::from_scores([
            (Metric::AnswerRelevancy, 0.9),
            (Metric::Bleu, 0.4),
        ]);

        assert_eq!(result.get(Metric::AnswerRelevancy), 0.9);
        assert_eq!(result.get(Metric::Bleu), 0.4);
        assert_eq!(result.get(Metric::Faithfulness), 0.0);
    }

    #[test]
    fn test_serializes_with_metric_names() {
        let json = serde_json::to_value(EvaluationResult::default()).unwrap();
        let object = json.as_object().unwrap();

        assert_eq!(object.len(), 8);
        for metric in Metric::ALL {
            assert!(object.contains_key(metric.as_str()));
        }
    }

    #[test]
    fn test_batch_averages() {
        let cases = vec![
            BTreeMap::from([(Metric::AnswerRelevancy, 1.0)]),
            BTreeMap::from([(Metric::AnswerRelevancy, 0.5)]),
        ];

        let batch = BatchEvaluationResult::from_cases(cases);

        assert_eq!(batch.averages[&Metric::AnswerRelevancy], 0.75);
        assert_eq!(batch.averages[&Metric::Hallucination], 0.0);
        assert_eq!(batch.averages.len(), 6);
    }

    #[test]
    fn test_batch_serializes_metric_keys() {
        let batch =
            BatchEvaluationResult::from_cases(vec![BTreeMap::from([(Metric::Faithfulness, 0.5)])]);
        let json = serde_json::to_value(&batch).unwrap();

        assert_eq!(json["cases"][0]["faithfulness"], 0.5);
    }
}
