//! LLM routing classifier

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::llm::{LlmProvider, LlmRequest};
use crate::domain::workflow::{RoutingClassifier, WorkflowError, ROUTING_INSTRUCTION};

const ROUTING_MAX_TOKENS: u32 = 10;

/// Asks a chat model whether a query needs retrieval
#[derive(Debug)]
pub struct LlmRoutingClassifier {
    provider: Arc<dyn LlmProvider>,
    model: String,
    temperature: f32,
}

impl LlmRoutingClassifier {
    pub fn new(provider: Arc<dyn LlmProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature: 0.1,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

#[async_trait]
impl RoutingClassifier for LlmRoutingClassifier {
    async fn classify(&self, query: &str) -> Result<String, WorkflowError> {
        let request = LlmRequest::builder()
            .system(ROUTING_INSTRUCTION)
            .user(query)
            .temperature(self.temperature)
            .max_tokens(ROUTING_MAX_TOKENS)
            .build();

        let response = self
            .provider
            .chat(&self.model, request)
            .await
            .map_err(|e| WorkflowError::routing(e.to_string()))?;

        let judgement = response.content().unwrap_or_default().trim().to_string();
        debug!(model = %self.model, judgement = %judgement, "Routing judgement received");

        Ok(judgement)
    }
}
