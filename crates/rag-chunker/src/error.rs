//! Error types for the chunking toolkit

use thiserror::Error;

/// Result type alias for chunking operations
pub type Result<T> = std::result::Result<T, Error>;

/// Chunking toolkit errors
///
/// Chunkers never fail on malformed input text -- missing structural markers
/// degrade to whole-text-as-one-unit. Errors are reserved for programmer
/// mistakes (invalid configuration) and propagated collaborator failures
/// (embedding backend, tokenizer).
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Embedding error
    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    /// Tokenizer error
    #[error("Tokenizer error: {0}")]
    Tokenizer(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parse error
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an embedding error
    pub fn embedding(message: impl Into<String>) -> Self {
        Self::Embedding(message.into())
    }

    /// Create a tokenizer error
    pub fn tokenizer(message: impl Into<String>) -> Self {
        Self::Tokenizer(message.into())
    }
}
