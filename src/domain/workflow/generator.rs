//! Answer generator trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::WorkflowError;

/// Produces an answer from a system instruction and the user's message
#[async_trait]
pub trait Generator: Send + Sync + Debug {
    async fn complete(
        &self,
        system_instruction: &str,
        user_message: &str,
    ) -> Result<String, WorkflowError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    /// Records every (system, user) pair it is called with
    #[derive(Debug, Default)]
    pub struct MockGenerator {
        content: Option<String>,
        error: Option<String>,
        calls: Mutex<Vec<(String, String)>>,
    }

    impl MockGenerator {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_content(mut self, content: impl Into<String>) -> Self {
            self.content = Some(content.into());
            self
        }

        pub fn with_error(mut self, error: impl Into<String>) -> Self {
            self.error = Some(error.into());
            self
        }

        pub fn calls(&self) -> Vec<(String, String)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Generator for MockGenerator {
        async fn complete(
            &self,
            system_instruction: &str,
            user_message: &str,
        ) -> Result<String, WorkflowError> {
            self.calls
                .lock()
                .unwrap()
                .push((system_instruction.to_string(), user_message.to_string()));

            if let Some(ref error) = self.error {
                return Err(WorkflowError::generation(error));
            }

            Ok(self.content.clone().unwrap_or_default())
        }
    }
}
