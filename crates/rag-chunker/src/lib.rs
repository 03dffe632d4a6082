//! Structure-aware Markdown chunking for RAG pipelines.
//!
//! Takes parser-produced Markdown (optionally carrying `<table>` spans and
//! `## Email N` / `## Slide N` markers) and turns it into bounded-size,
//! metadata-rich chunks ready for embedding and retrieval:
//!
//! - [`RecursiveChunker`]: prioritized-separator splitting with overlap,
//!   the general-purpose default.
//! - [`SemanticChunker`]: embedding-similarity breakpoints, needs an
//!   [`EmbeddingProvider`].
//! - [`EmailChunker`] / [`SlideChunker`]: structural units first, packed
//!   sentences only when a unit overshoots the budget.
//! - [`HybridChunker`]: semantic pass with recursive cleanup of oversized
//!   chunks.
//! - [`DocumentChunker`]: facade dispatching on [`ChunkStrategy`], with
//!   auto-selection and strategy comparison.
//!
//! Sizes are measured in characters or real tokenizer tokens
//! ([`LengthMeasure`]). Malformed input never errors: missing markers
//! degrade to whole-text-as-one-unit, and indivisible oversized units
//! (tables, long words) are emitted whole with `oversized` set in their
//! metadata.
//!
//! ```no_run
//! use rag_chunker::{ChunkStrategy, ChunkerConfig, DocumentChunker};
//!
//! # fn main() -> rag_chunker::Result<()> {
//! let chunker = DocumentChunker::new(ChunkerConfig::default())?;
//! let chunks = chunker.chunk("Some Markdown text.", "doc-1", ChunkStrategy::Recursive)?;
//! for chunk in &chunks {
//!     println!("{}: {} chars", chunk.metadata.chunk_id, chunk.content.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod chunker;
pub mod config;
pub mod error;
pub mod length;
pub mod providers;
pub mod text;
pub mod types;

pub use chunker::{
    ChunkStrategy, DocumentChunker, EmailChunker, HybridChunker, RecursiveChunker,
    SemanticChunker, SlideChunker,
};
pub use config::{ChunkConfig, ChunkerConfig, EmailConfig, HybridConfig, SemanticConfig};
pub use error::{Error, Result};
pub use length::{estimate_tokens, LengthMeasure, LengthType};
pub use providers::EmbeddingProvider;
pub use types::{
    Chunk, ChunkMetadata, ChunkType, SemanticComplexity, StrategyReport, StructuralUnit,
    StructureAnalysis,
};
