//! Provider abstractions for externally-injected collaborators

pub mod embedding;

pub use embedding::EmbeddingProvider;
