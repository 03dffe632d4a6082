//! Embedding provider trait for sentence embeddings

use crate::error::Result;

/// Trait for generating sentence embeddings.
///
/// Contract: returned vectors must be unit-normalized so that a plain dot
/// product equals cosine similarity -- the semantic chunker relies on this.
/// Implementations must be reentrant; the chunkers hold a provider behind an
/// immutable reference and may be called from parallel threads. Retries,
/// timeouts, and I/O policy belong to the implementation, not the chunkers.
pub trait EmbeddingProvider: Send + Sync {
    /// Generate embeddings for a batch of texts, one vector per input,
    /// in input order. A single embedding pass per chunking call.
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Embedding dimensionality
    fn dimensions(&self) -> usize;

    /// Provider name for logging
    fn name(&self) -> &str;
}
