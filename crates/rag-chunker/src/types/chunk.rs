//! Chunk output types with source tracking for citations

use serde::{Deserialize, Serialize};

/// Which strategy produced a chunk
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChunkType {
    /// Plain text (recursive/separator-based splitting)
    Text,
    /// Semantic similarity-based splitting
    Semantic,
    /// Email message unit
    Email,
    /// Slide unit
    Slide,
}

impl ChunkType {
    /// Tag used in serialized metadata
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Semantic => "semantic",
            Self::Email => "email",
            Self::Slide => "slide",
        }
    }
}

impl std::fmt::Display for ChunkType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata attached to every emitted chunk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkMetadata {
    /// Stable chunk identifier (`{source_doc_id}_chunk_{index}`)
    pub chunk_id: String,
    /// Identifier of the source document
    pub source_doc_id: String,
    /// 0-based position among sibling chunks
    pub chunk_index: usize,
    /// Character offset of the chunk start: into the source text for the
    /// recursive strategy, into the concatenated emitted content for the
    /// structural strategies (whose output omits markers and trimmed text)
    pub start_char: usize,
    /// Character offset of the chunk end, same basis as `start_char`
    pub end_char: usize,
    /// Measured or estimated token count of the content
    pub token_count: usize,
    /// Strategy tag
    pub chunk_type: ChunkType,
    /// True when the chunk wraps a single indivisible unit (table, long
    /// word) that exceeds the configured budget -- the one permitted overflow
    #[serde(default)]
    pub oversized: bool,
}

/// A bounded-size span of text emitted for downstream embedding/storage.
///
/// Chunks are created fresh per chunking call and never mutated afterwards;
/// ownership transfers entirely to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    /// The materialized text
    pub content: String,
    /// Attribution metadata
    pub metadata: ChunkMetadata,
}

impl Chunk {
    /// Create a chunk with its metadata
    pub fn new(content: String, metadata: ChunkMetadata) -> Self {
        Self { content, metadata }
    }
}

/// Generate a chunk identifier from its source document and index
pub fn chunk_id(source_doc_id: &str, chunk_index: usize) -> String {
    format!("{}_chunk_{}", source_doc_id, chunk_index)
}
