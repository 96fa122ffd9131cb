//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, EvaluationConfig, EvaluationThresholds, LlmConfig, LogFormat, LoggingConfig,
    RetrievalConfig, ServerConfig, StorageSettings,
};
