//! Embedding provider domain traits and vector math

mod provider;
mod vector;

pub use provider::EmbeddingProvider;
pub use vector::cosine_similarity;

#[cfg(test)]
pub use provider::mock::MockEmbeddingProvider;
