//! LLM-as-judge scorers for the model-graded metrics
//!
//! Each scorer sends one grading prompt and expects `{"score": <0..1>, "reason": "..."}`.

use std::sync::Arc;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use tracing::debug;

use crate::domain::evaluation::{EvaluationInput, Metric, MetricError, MetricScorer};
use crate::domain::llm::{LlmProvider, LlmRequest};

const JUDGE_SYSTEM_PROMPT: &str = "You are an impartial evaluator of question answering \
systems. Follow the grading instructions exactly and respond with a JSON object of the form \
{\"score\": <number between 0 and 1>, \"reason\": \"<one sentence>\"}.";

const JUDGE_MAX_TOKENS: u32 = 300;

/// Outermost `{...}` span, possibly multi-line
static JSON_OBJECT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\{.*\}").unwrap());

/// Grades one metric with a chat model
#[derive(Debug)]
pub struct LlmJudgeScorer {
    provider: Arc<dyn LlmProvider>,
    model: String,
    metric: Metric,
    threshold: f32,
}

impl LlmJudgeScorer {
    pub fn new(provider: Arc<dyn LlmProvider>, model: impl Into<String>, metric: Metric) -> Self {
        Self {
            provider,
            model: model.into(),
            metric,
            threshold: 0.5,
        }
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    fn build_prompt(&self, input: &EvaluationInput) -> String {
        let contexts = format_contexts(&input.contexts);

        match self.metric {
            Metric::AnswerRelevancy => format!(
                "Rate how relevant the answer is to the question. 1 means it fully addresses \
the question, 0 means it is off topic.\n\nQuestion: {}\n\nAnswer: {}",
                input.query, input.response
            ),
            Metric::Faithfulness => format!(
                "Rate the fraction of claims in the answer that are supported by the context. \
1 means every claim is supported.\n\nContext:\n{}\n\nAnswer: {}",
                contexts, input.response
            ),
            Metric::ContextPrecision => format!(
                "Rate whether the context passages useful for producing the expected answer are \
ranked above the unhelpful ones. 1 means all useful passages come first.\n\nQuestion: {}\n\n\
Expected answer: {}\n\nContext:\n{}",
                input.query,
                input.reference_or_response(),
                contexts
            ),
            Metric::ContextRecall => format!(
                "Rate the fraction of statements in the expected answer that can be attributed \
to the context. 1 means everything is covered.\n\nExpected answer: {}\n\nContext:\n{}",
                input.reference_or_response(),
                contexts
            ),
            Metric::ContextRelevancy => format!(
                "Rate the fraction of the context that is relevant to the question. 1 means \
every passage is relevant.\n\nQuestion: {}\n\nContext:\n{}",
                input.query, contexts
            ),
            Metric::Hallucination => format!(
                "Rate the fraction of the context passages that the answer contradicts or \
ignores in favour of unsupported claims. 0 means no hallucination, 1 means the answer is \
entirely hallucinated.\n\nContext:\n{}\n\nAnswer: {}",
                contexts, input.response
            ),
            Metric::Bleu | Metric::Rouge => String::new(),
        }
    }

    fn parse_judgement(&self, response: &str) -> Result<JudgeResponse, MetricError> {
        let json_str = extract_json(response).unwrap_or(response);

        serde_json::from_str(json_str).map_err(|e| {
            MetricError::invalid_judgement(format!("{} in response {:?}", e, response))
        })
    }
}

#[derive(Debug, Deserialize)]
struct JudgeResponse {
    score: f32,
    reason: Option<String>,
}

fn format_contexts(contexts: &[String]) -> String {
    if contexts.is_empty() {
        return "(no context)".to_string();
    }

    contexts
        .iter()
        .enumerate()
        .map(|(i, c)| format!("[{}] {}", i + 1, c))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Extract a JSON object from free text (handles markdown code fences)
fn extract_json(text: &str) -> Option<&str> {
    JSON_OBJECT.find(text).map(|m| m.as_str())
}

#[async_trait]
impl MetricScorer for LlmJudgeScorer {
    fn metric(&self) -> Metric {
        self.metric
    }

    async fn score(&self, input: &EvaluationInput) -> Result<f32, MetricError> {
        if !self.metric.is_model_graded() {
            return Err(MetricError::invalid_judgement(format!(
                "{} is not a model-graded metric",
                self.metric
            )));
        }

        if self.metric.requires_context() && !input.has_context() {
            return Err(MetricError::MissingContext);
        }

        let request = LlmRequest::builder()
            .system(JUDGE_SYSTEM_PROMPT)
            .user(self.build_prompt(input))
            .temperature(0.0)
            .max_tokens(JUDGE_MAX_TOKENS)
            .json_mode(true)
            .build();

        let response = self
            .provider
            .chat(&self.model, request)
            .await
            .map_err(|e| MetricError::judge(e.to_string()))?;

        let content = response
            .content()
            .ok_or_else(|| MetricError::judge("empty judge response"))?;

        let judgement = self.parse_judgement(content)?;

        if !judgement.score.is_finite() {
            return Err(MetricError::invalid_judgement("score is not a number"));
        }

        let score = judgement.score.clamp(0.0, 1.0);

        debug!(
            metric = %self.metric,
            score,
            passed = score >= self.threshold,
            reason = judgement.reason.as_deref().unwrap_or(""),
            "Judge scored interaction"
        );

        Ok(score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::llm::MockLlmProvider;

    fn judge(content: &str, metric: Metric) -> (Arc<MockLlmProvider>, LlmJudgeScorer) {
        let provider = Arc::new(MockLlmProvider::new("mock").with_content(content));
        let scorer = LlmJudgeScorer::new(provider.clone(), "gpt-4o", metric);
        (provider, scorer)
    }

    fn input() -> EvaluationInput {
        EvaluationInput::new("What is the capital of France?", "Paris")
            .with_contexts(vec!["Paris is the capital of France.".to_string()])
    }

    #[test]
    fn test_extract_json() {
        let text = "Result: {\"score\": 0.8, \"reason\": \"Relevant\"}";
        assert_eq!(extract_json(text), Some("{\"score\": 0.8, \"reason\": \"Relevant\"}"));
        assert_eq!(extract_json("no json"), None);
    }

    #[test]
    fn test_extract_json_with_markdown() {
        let text = "```json\n{\"score\": 0.7}\n```";
        assert_eq!(extract_json(text), Some("{\"score\": 0.7}"));
    }

    #[tokio::test]
    async fn test_judge_parses_score() {
        let (provider, scorer) = judge(r#"{"score": 0.85, "reason": "Direct answer"}"#, Metric::AnswerRelevancy);

        let score = scorer.score(&input()).await.unwrap();

        assert!((score - 0.85).abs() < 1e-6);
        let request = &provider.requests()[0];
        assert!(request.json_mode);
        assert!(request.messages[1].content.contains("What is the capital of France?"));
    }

    #[tokio::test]
    async fn test_judge_clamps_score() {
        let (_, scorer) = judge(r#"{"score": 7}"#, Metric::Faithfulness);
        assert_eq!(scorer.score(&input()).await.unwrap(), 1.0);
    }

    #[tokio::test]
    async fn test_judge_invalid_response() {
        let (_, scorer) = judge("looks good to me", Metric::AnswerRelevancy);

        assert!(matches!(
            scorer.score(&input()).await,
            Err(MetricError::InvalidJudgement(_))
        ));
    }

    #[tokio::test]
    async fn test_judge_provider_failure() {
        let provider = Arc::new(MockLlmProvider::new("mock").with_error("HTTP 500"));
        let scorer = LlmJudgeScorer::new(provider, "gpt-4o", Metric::Hallucination);

        assert!(matches!(scorer.score(&input()).await, Err(MetricError::Judge(_))));
    }

    #[tokio::test]
    async fn test_context_metric_without_context() {
        let (provider, scorer) = judge(r#"{"score": 1.0}"#, Metric::ContextRecall);

        let result = scorer.score(&EvaluationInput::new("q", "a")).await;

        assert_eq!(result, Err(MetricError::MissingContext));
        assert!(provider.requests().is_empty());
    }

    #[test]
    fn test_recall_prompt_uses_response_without_reference() {
        let (_, scorer) = judge("{}", Metric::ContextRecall);

        let prompt = scorer.build_prompt(&input());

        assert!(prompt.contains("Expected answer: Paris"));
        assert!(prompt.contains("[1] Paris is the capital of France."));
    }
}
