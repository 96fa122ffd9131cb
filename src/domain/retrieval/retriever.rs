//! Retriever and document store traits

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::domain::DomainError;

use super::document::{NewDocument, RetrievedDocument};

/// Similarity search over stored passages
///
/// Results are ordered by descending relevance and hold at most `k` entries.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Retriever: Send + Sync {
    async fn search(&self, query: &str, k: usize) -> Result<Vec<RetrievedDocument>, DomainError>;
}

/// Document management for a retrieval backend
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Adds documents, returning their ids in input order
    async fn add_documents(&self, documents: Vec<NewDocument>) -> Result<Vec<String>, DomainError>;

    /// Number of stored documents
    async fn count(&self) -> Result<usize, DomainError>;
}
