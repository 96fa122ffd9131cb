//! Retrieval backends and document ingestion

mod ingest;
mod in_memory;

pub use ingest::parse_jsonl;
pub use in_memory::{InMemoryVectorStore, VectorStoreConfig};
