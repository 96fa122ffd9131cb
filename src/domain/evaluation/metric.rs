//! Metric names and applicability rules

use std::fmt;

use serde::{Deserialize, Serialize};

/// The eight scores produced for every interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    AnswerRelevancy,
    Faithfulness,
    ContextPrecision,
    ContextRecall,
    ContextRelevancy,
    Hallucination,
    #[serde(rename = "lexical_overlap_bleu")]
    Bleu,
    #[serde(rename = "lexical_overlap_rouge")]
    Rouge,
}

impl Metric {
    pub const ALL: [Metric; 8] = [
        Metric::AnswerRelevancy,
        Metric::Faithfulness,
        Metric::ContextPrecision,
        Metric::ContextRecall,
        Metric::ContextRelevancy,
        Metric::Hallucination,
        Metric::Bleu,
        Metric::Rouge,
    ];

    /// Scorers graded by a language-model judge
    pub const MODEL_GRADED: [Metric; 6] = [
        Metric::AnswerRelevancy,
        Metric::Faithfulness,
        Metric::ContextPrecision,
        Metric::ContextRecall,
        Metric::ContextRelevancy,
        Metric::Hallucination,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AnswerRelevancy => "answer_relevancy",
            Self::Faithfulness => "faithfulness",
            Self::ContextPrecision => "context_precision",
            Self::ContextRecall => "context_recall",
            Self::ContextRelevancy => "context_relevancy",
            Self::Hallucination => "hallucination",
            Self::Bleu => "lexical_overlap_bleu",
            Self::Rouge => "lexical_overlap_rouge",
        }
    }

    /// Skipped when the interaction has no retrieval context
    pub fn requires_context(&self) -> bool {
        matches!(
            self,
            Self::Faithfulness
                | Self::ContextPrecision
                | Self::ContextRecall
                | Self::ContextRelevancy
        )
    }

    /// Computed only when a reference answer is supplied
    pub fn requires_reference(&self) -> bool {
        matches!(self, Self::Bleu | Self::Rouge)
    }

    pub fn is_model_graded(&self) -> bool {
        !self.requires_reference()
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_names_match_serde() {
        for metric in Metric::ALL {
            let json = serde_json::to_string(&metric).unwrap();
            assert_eq!(json, format!("\"{}\"", metric.as_str()));
        }
    }

    #[test]
    fn test_context_metrics() {
        let context: Vec<_> = Metric::ALL
            .iter()
            .filter(|m| m.requires_context())
            .collect();

        assert_eq!(context.len(), 4);
        assert!(!Metric::AnswerRelevancy.requires_context());
        assert!(!Metric::Hallucination.requires_context());
    }

    #[test]
    fn test_model_graded_excludes_lexical() {
        assert!(Metric::MODEL_GRADED.iter().all(|m| m.is_model_graded()));
        assert!(!Metric::Bleu.is_model_graded());
        assert!(Metric::Rouge.requires_reference());
    }
}
