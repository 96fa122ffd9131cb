//! Vector store with an in-memory cosine-similarity index
//!
//! Passages are written through to a [`Storage`] backend and reloaded from it
//! with [`InMemoryVectorStore::load`], so an index backed by Postgres survives
//! restarts.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::domain::embedding::{cosine_similarity, EmbeddingProvider};
use crate::domain::retrieval::{
    DocumentStore, NewDocument, RetrievedDocument, Retriever, StoredPassage,
};
use crate::domain::storage::Storage;
use crate::domain::DomainError;
use crate::infrastructure::storage::InMemoryStorage;

/// Prefixes applied before embedding
#[derive(Debug, Clone)]
pub struct VectorStoreConfig {
    pub query_prefix: String,
    pub passage_prefix: String,
}

impl Default for VectorStoreConfig {
    fn default() -> Self {
        Self {
            query_prefix: "query: ".to_string(),
            passage_prefix: "passage: ".to_string(),
        }
    }
}

/// Vector store searching passages and their embeddings in memory
#[derive(Debug)]
pub struct InMemoryVectorStore {
    embedder: Arc<dyn EmbeddingProvider>,
    config: VectorStoreConfig,
    storage: Arc<dyn Storage<StoredPassage>>,
    passages: RwLock<Vec<StoredPassage>>,
}

impl InMemoryVectorStore {
    pub fn new(embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self::with_config(embedder, VectorStoreConfig::default())
    }

    pub fn with_config(embedder: Arc<dyn EmbeddingProvider>, config: VectorStoreConfig) -> Self {
        Self::with_storage(embedder, config, Arc::new(InMemoryStorage::new()))
    }

    /// Creates a store whose passages are persisted in `storage`
    pub fn with_storage(
        embedder: Arc<dyn EmbeddingProvider>,
        config: VectorStoreConfig,
        storage: Arc<dyn Storage<StoredPassage>>,
    ) -> Self {
        Self {
            embedder,
            config,
            storage,
            passages: RwLock::new(Vec::new()),
        }
    }

    /// Rebuilds the index from the persisted passages, returns how many were loaded
    pub async fn load(&self) -> Result<usize, DomainError> {
        let mut stored = self.storage.list().await?;
        stored.sort_by(|a, b| a.id.cmp(&b.id));

        let mut passages = self.passages.write().await;
        *passages = stored;

        info!(passages = passages.len(), "Document index loaded");

        Ok(passages.len())
    }
}

#[async_trait]
impl Retriever for InMemoryVectorStore {
    async fn search(&self, query: &str, k: usize) -> Result<Vec<RetrievedDocument>, DomainError> {
        if k == 0 || self.passages.read().await.is_empty() {
            return Ok(Vec::new());
        }

        // Embed before locking so writers are never blocked on the provider
        let text = format!("{}{}", self.config.query_prefix, query);
        let query_embedding = self
            .embedder
            .embed(std::slice::from_ref(&text))
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::retrieval("Embedding provider returned no vector"))?;

        let passages = self.passages.read().await;
        let mut scored: Vec<RetrievedDocument> = passages
            .iter()
            .map(|p| RetrievedDocument {
                content: p.content.clone(),
                metadata: p.metadata.clone(),
                score: cosine_similarity(&query_embedding, &p.embedding),
            })
            .collect();

        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(k);

        debug!(k, returned = scored.len(), "Vector search completed");

        Ok(scored)
    }
}

#[async_trait]
impl DocumentStore for InMemoryVectorStore {
    async fn add_documents(&self, documents: Vec<NewDocument>) -> Result<Vec<String>, DomainError> {
        if documents.is_empty() {
            return Ok(Vec::new());
        }

        let texts: Vec<String> = documents
            .iter()
            .map(|d| format!("{}{}", self.config.passage_prefix, d.content))
            .collect();
        let embeddings = self.embedder.embed(&texts).await?;

        if embeddings.len() != documents.len() {
            return Err(DomainError::retrieval(format!(
                "Expected {} embeddings, received {}",
                documents.len(),
                embeddings.len()
            )));
        }

        let mut stored = Vec::with_capacity(documents.len());
        for (document, embedding) in documents.into_iter().zip(embeddings) {
            stored.push(self.storage.save(StoredPassage::new(document, embedding)).await?);
        }

        let mut passages = self.passages.write().await;
        let mut ids = Vec::with_capacity(stored.len());

        for passage in stored {
            passages.retain(|p| p.id != passage.id);
            ids.push(passage.id.clone());
            passages.push(passage);
        }

        debug!(added = ids.len(), total = passages.len(), "Documents added");

        Ok(ids)
    }

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.passages.read().await.len())
    }
}
