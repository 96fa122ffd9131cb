//! Agentic RAG gateway
//!
//! Routes each chat query either through retrieval-augmented generation or a direct
//! answer, records telemetry per transaction, and grades answers out of band with
//! model-judged and lexical metrics.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use api::state::AppState;
use domain::embedding::EmbeddingProvider;
use domain::llm::LlmProvider;
use domain::retrieval::{DocumentStore, Retriever, StoredPassage};
use domain::session::ChatSession;
use domain::telemetry::{EvaluationRecord, FeedbackRecord, TelemetryRecord};
use domain::workflow::{Generator, RoutingClassifier, WorkflowEngine};
use infrastructure::embedding::OpenAiEmbeddingProvider;
use infrastructure::evaluation::{EvaluationPipeline, EvaluationQueue};
use infrastructure::llm::{HttpClient, OpenAiProvider};
use infrastructure::retrieval::{InMemoryVectorStore, VectorStoreConfig};
use infrastructure::session::SessionService;
use infrastructure::storage::{StorageConfig, StorageFactory};
use infrastructure::telemetry::StorageResultSink;
use infrastructure::workflow::{LlmGenerator, LlmRoutingClassifier, RagWorkflowEngine};
use tracing::{info, warn};

/// Create the application state with the default configuration
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state with custom configuration
///
/// Starts the background evaluation worker when `evaluation.enabled` is set.
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    if config.llm.api_key.is_empty() {
        warn!("No LLM API key configured, model calls will be rejected upstream");
    }

    let http_client =
        HttpClient::with_timeout(Duration::from_secs(config.llm.request_timeout_secs))?;

    let llm: Arc<dyn LlmProvider> = Arc::new(OpenAiProvider::with_base_url(
        http_client.clone(),
        &config.llm.api_key,
        &config.llm.base_url,
    ));
    let embedder: Arc<dyn EmbeddingProvider> = Arc::new(OpenAiEmbeddingProvider::with_base_url(
        http_client,
        &config.llm.api_key,
        &config.retrieval.embedding_model,
        &config.llm.base_url,
    ));

    let storage_config = StorageConfig::from_backend(
        &config.storage.backend,
        config.storage.database_url.as_deref(),
    )?;
    info!(backend = %config.storage.backend, "Storage backend selected");
    let storage = StorageFactory::connect(&storage_config).await?;

    let results = StorageResultSink::new(
        storage.create::<TelemetryRecord>().await?,
        storage.create::<EvaluationRecord>().await?,
        storage.create::<FeedbackRecord>().await?,
    );
    let sessions = SessionService::new(storage.create::<ChatSession>().await?);

    let vector_store = Arc::new(InMemoryVectorStore::with_storage(
        embedder,
        VectorStoreConfig {
            query_prefix: config.retrieval.query_prefix.clone(),
            passage_prefix: config.retrieval.passage_prefix.clone(),
        },
        storage.create::<StoredPassage>().await?,
    ));
    vector_store.load().await?;

    let classifier: Arc<dyn RoutingClassifier> = Arc::new(
        LlmRoutingClassifier::new(llm.clone(), &config.llm.routing_model)
            .with_temperature(config.llm.routing_temperature),
    );
    let generator: Arc<dyn Generator> = Arc::new(
        LlmGenerator::new(llm.clone(), &config.llm.chat_model)
            .with_temperature(config.llm.temperature)
            .with_max_tokens(config.llm.max_tokens),
    );
    let engine: Arc<dyn WorkflowEngine> = Arc::new(
        RagWorkflowEngine::new(
            classifier,
            vector_store.clone() as Arc<dyn Retriever>,
            generator,
            Arc::new(results.clone()),
        )
        .with_top_k(config.retrieval.top_k),
    );

    let thresholds = config.evaluation.thresholds.clone();
    let pipeline = Arc::new(
        EvaluationPipeline::with_judge(llm, &config.evaluation.judge_model, move |metric| {
            thresholds.for_metric(metric)
        })
        .with_sink(Arc::new(results.clone()))
        .with_batch_concurrency(config.evaluation.batch_concurrency),
    );

    let state = AppState::new(
        engine,
        vector_store as Arc<dyn DocumentStore>,
        sessions,
        results,
        pipeline.clone(),
    );

    if !config.evaluation.enabled {
        info!("Background evaluation disabled");
        return Ok(state);
    }

    let (queue, _worker) = EvaluationQueue::start(
        pipeline,
        config.evaluation.queue_capacity,
        config.evaluation.max_concurrent,
    );
    info!(
        capacity = config.evaluation.queue_capacity,
        max_concurrent = config.evaluation.max_concurrent,
        "Background evaluation enabled"
    );

    Ok(state.with_evaluation_queue(queue))
}
