use serde::Deserialize;

use crate::domain::evaluation::Metric;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub llm: LlmConfig,
    pub retrieval: RetrievalConfig,
    pub evaluation: EvaluationConfig,
    pub storage: StorageSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Chat model settings shared by routing and generation
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub api_key: String,
    pub base_url: String,
    pub chat_model: String,
    pub routing_model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub routing_temperature: f32,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    pub top_k: usize,
    pub embedding_model: String,
    pub query_prefix: String,
    pub passage_prefix: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    pub enabled: bool,
    pub judge_model: String,
    pub queue_capacity: usize,
    pub max_concurrent: usize,
    pub batch_concurrency: usize,
    pub thresholds: EvaluationThresholds,
}

/// Pass marks for the judged metrics
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EvaluationThresholds {
    pub answer_relevancy: f32,
    pub faithfulness: f32,
    pub context_precision: f32,
    pub context_recall: f32,
    pub context_relevancy: f32,
    pub hallucination: f32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub backend: String,
    pub database_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.openai.com".to_string(),
            chat_model: "gpt-4o".to_string(),
            routing_model: "gpt-4o".to_string(),
            temperature: 0.7,
            max_tokens: 1000,
            routing_temperature: 0.1,
            request_timeout_secs: 60,
        }
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: 5,
            embedding_model: "text-embedding-3-small".to_string(),
            query_prefix: "query: ".to_string(),
            passage_prefix: "passage: ".to_string(),
        }
    }
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            judge_model: "gpt-4o".to_string(),
            queue_capacity: 256,
            max_concurrent: 4,
            batch_concurrency: 4,
            thresholds: EvaluationThresholds::default(),
        }
    }
}

impl Default for EvaluationThresholds {
    fn default() -> Self {
        Self {
            answer_relevancy: 0.5,
            faithfulness: 0.7,
            context_precision: 0.5,
            context_recall: 0.5,
            context_relevancy: 0.5,
            hallucination: 0.5,
        }
    }
}

impl EvaluationThresholds {
    pub fn for_metric(&self, metric: Metric) -> f32 {
        match metric {
            Metric::AnswerRelevancy => self.answer_relevancy,
            Metric::Faithfulness => self.faithfulness,
            Metric::ContextPrecision => self.context_precision,
            Metric::ContextRecall => self.context_recall,
            Metric::ContextRelevancy => self.context_relevancy,
            Metric::Hallucination => self.hallucination,
            Metric::Bleu | Metric::Rouge => 0.0,
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: "memory".to_string(),
            database_url: None,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut app_config: Self = config.try_deserialize()?;
        app_config.apply_env_fallbacks();

        Ok(app_config)
    }

    /// Fills secrets from the conventional variables when not configured
    fn apply_env_fallbacks(&mut self) {
        if self.llm.api_key.is_empty() {
            if let Ok(key) = std::env::var("OPENAI_API_KEY") {
                self.llm.api_key = key;
            }
        }

        if self.storage.database_url.is_none() {
            self.storage.database_url = std::env::var("DATABASE_URL").ok();
        }
    }
}
