//! Retrieval domain - passages, retriever and document store contracts

mod document;
mod retriever;

pub use document::{NewDocument, RetrievedDocument, StoredPassage};
pub use retriever::{DocumentStore, Retriever};

#[cfg(test)]
pub use retriever::MockRetriever;
