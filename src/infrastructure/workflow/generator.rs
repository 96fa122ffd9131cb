//! LLM answer generator

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::llm::{LlmProvider, LlmRequest};
use crate::domain::workflow::{Generator, WorkflowError};

/// Chat-model generator with fixed sampling parameters
#[derive(Debug)]
pub struct LlmGenerator {
    provider: Arc<dyn LlmProvider>,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl LlmGenerator {
    pub fn new(provider: Arc<dyn LlmProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature: 0.7,
            max_tokens: 1000,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

#[async_trait]
impl Generator for LlmGenerator {
    async fn complete(
        &self,
        system_instruction: &str,
        user_message: &str,
    ) -> Result<String, WorkflowError> {
        let request = LlmRequest::builder()
            .system(system_instruction)
            .user(user_message)
            .temperature(self.temperature)
            .max_tokens(self.max_tokens)
            .build();

        let response = self
            .provider
            .chat(&self.model, request)
            .await
            .map_err(|e| WorkflowError::generation(e.to_string()))?;

        response
            .content()
            .map(str::to_string)
            .ok_or_else(|| WorkflowError::generation("model returned no content"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::llm::MockLlmProvider;

    #[tokio::test]
    async fn test_complete_builds_two_message_request() {
        let provider = Arc::new(MockLlmProvider::new("mock").with_content("Paris"));
        let generator = LlmGenerator::new(provider.clone(), "gpt-4o")
            .with_temperature(0.2)
            .with_max_tokens(64);

        let answer = generator.complete("Be brief", "Capital of France?").await.unwrap();

        assert_eq!(answer, "Paris");
        let request = &provider.requests()[0];
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.system_text(), Some("Be brief"));
        assert_eq!(request.max_tokens, Some(64));
        assert_eq!(request.temperature, Some(0.2));
    }

    #[tokio::test]
    async fn test_empty_content_is_error() {
        let provider = Arc::new(MockLlmProvider::new("mock").with_content(""));
        let generator = LlmGenerator::new(provider, "gpt-4o");

        assert!(generator.complete("sys", "user").await.is_err());
    }

    #[tokio::test]
    async fn test_provider_error_is_generation_error() {
        let provider = Arc::new(MockLlmProvider::new("mock").with_error("HTTP 500"));
        let generator = LlmGenerator::new(provider, "gpt-4o");

        let error = generator.complete("sys", "user").await.unwrap_err();

        assert!(matches!(error, WorkflowError::Generation(_)));
    }
}
