//! Retrieved passage and ingestion document types

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::storage::StorageEntity;

/// A passage returned by a retriever
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedDocument {
    /// Passage text
    pub content: String,
    /// Arbitrary metadata attached at ingestion
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
    /// Relevance score, higher is more relevant
    pub score: f32,
}

impl RetrievedDocument {
    pub fn new(content: impl Into<String>, score: f32) -> Self {
        Self {
            content: content.into(),
            metadata: HashMap::new(),
            score,
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }
}

/// A document to be added to a document store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDocument {
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl NewDocument {
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            metadata: HashMap::new(),
        }
    }

    pub fn with_metadata(mut self, metadata: HashMap<String, serde_json::Value>) -> Self {
        self.metadata = metadata;
        self
    }
}

/// An ingested passage with its embedding, as persisted by a document store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredPassage {
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
    pub embedding: Vec<f32>,
}

impl StoredPassage {
    pub fn new(document: NewDocument, embedding: Vec<f32>) -> Self {
        Self {
            id: document.id,
            content: document.content,
            metadata: document.metadata,
            embedding,
        }
    }
}

impl StorageEntity for StoredPassage {
    const COLLECTION: &'static str = "document_passages";

    fn key(&self) -> &str {
        &self.id
    }
}
