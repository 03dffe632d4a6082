//! Chunking strategies and the dispatching facade.

pub mod email;
pub mod hybrid;
mod pack;
pub mod recursive;
pub mod semantic;
pub mod slide;

pub use email::EmailChunker;
pub use hybrid::HybridChunker;
pub use recursive::RecursiveChunker;
pub use semantic::SemanticChunker;
pub use slide::SlideChunker;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::ChunkerConfig;
use crate::error::{Error, Result};
use crate::length::{LengthMeasure, LengthType};
use crate::providers::EmbeddingProvider;
use crate::types::{Chunk, SemanticComplexity, StrategyReport, StructureAnalysis};

/// Chunking strategy tag, dispatched by a single `match`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkStrategy {
    Recursive,
    Semantic,
    Email,
    Slide,
    Hybrid,
}

impl ChunkStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChunkStrategy::Recursive => "recursive",
            ChunkStrategy::Semantic => "semantic",
            ChunkStrategy::Email => "email",
            ChunkStrategy::Slide => "slide",
            ChunkStrategy::Hybrid => "hybrid",
        }
    }
}

impl fmt::Display for ChunkStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Facade over all chunking strategies.
///
/// The embedding provider is optional; requesting a semantic or hybrid
/// strategy without one is a configuration error. Everything else works
/// offline.
pub struct DocumentChunker {
    config: ChunkerConfig,
    length: LengthMeasure,
    embedder: Option<Arc<dyn EmbeddingProvider>>,
}

impl DocumentChunker {
    /// Build a chunker from a validated config, without embeddings.
    pub fn new(config: ChunkerConfig) -> Result<Self> {
        Self::with_embedder(config, None)
    }

    /// Build a chunker with an embedding provider for the semantic family.
    pub fn with_embedder(
        config: ChunkerConfig,
        embedder: Option<Arc<dyn EmbeddingProvider>>,
    ) -> Result<Self> {
        config.validate()?;
        let length = match config.length_type {
            LengthType::Char => LengthMeasure::chars(),
            LengthType::Token => {
                return Err(Error::config(
                    "length_type = \"token\" requires a tokenizer, use with_length",
                ))
            }
        };
        Ok(Self {
            config,
            length,
            embedder,
        })
    }

    /// Build a chunker with an explicit length measure, bypassing
    /// `length_type` resolution (used for token measurement).
    pub fn with_length(
        config: ChunkerConfig,
        length: LengthMeasure,
        embedder: Option<Arc<dyn EmbeddingProvider>>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            length,
            embedder,
        })
    }

    /// Chunk a document with an explicitly chosen strategy.
    pub fn chunk(
        &self,
        text: &str,
        source_doc_id: &str,
        strategy: ChunkStrategy,
    ) -> Result<Vec<Chunk>> {
        tracing::debug!(source_doc_id, %strategy, "Chunking document");
        match strategy {
            ChunkStrategy::Recursive => {
                let chunker =
                    RecursiveChunker::new(self.config.chunking.clone(), self.length.clone())?;
                Ok(chunker.chunk(text, source_doc_id))
            }
            ChunkStrategy::Semantic => {
                let chunker = SemanticChunker::new(
                    self.config.chunking.clone(),
                    self.config.semantic.clone(),
                    self.length.clone(),
                    self.require_embedder("semantic")?,
                )?;
                chunker.chunk(text, source_doc_id)
            }
            ChunkStrategy::Email => {
                let chunker = EmailChunker::new(
                    self.config.chunking.clone(),
                    self.config.email.clone(),
                    self.length.clone(),
                )?;
                Ok(chunker.chunk(text, source_doc_id))
            }
            ChunkStrategy::Slide => {
                let chunker =
                    SlideChunker::new(self.config.chunking.clone(), self.length.clone())?;
                Ok(chunker.chunk(text, source_doc_id))
            }
            ChunkStrategy::Hybrid => {
                let chunker = HybridChunker::new(
                    self.config.chunking.clone(),
                    self.config.semantic.clone(),
                    self.config.hybrid.clone(),
                    self.length.clone(),
                    self.require_embedder("hybrid")?,
                )?;
                chunker.chunk(text, source_doc_id)
            }
        }
    }

    /// Chunk with an automatically selected strategy.
    pub fn chunk_auto(&self, text: &str, source_doc_id: &str) -> Result<Vec<Chunk>> {
        let strategy = self.auto_select(text);
        self.chunk(text, source_doc_id, strategy)
    }

    /// Pick a strategy from the text's size and semantic structure.
    ///
    /// Short texts and texts we cannot analyze (no embedder, or the
    /// analysis fails) fall back to recursive chunking. Analysis failure
    /// here is auxiliary: it is logged, never propagated.
    pub fn auto_select(&self, text: &str) -> ChunkStrategy {
        if text.chars().count() < 1000 {
            return ChunkStrategy::Recursive;
        }

        let Some(embedder) = self.embedder.clone() else {
            return ChunkStrategy::Recursive;
        };

        let chunker = match SemanticChunker::new(
            self.config.chunking.clone(),
            self.config.semantic.clone(),
            self.length.clone(),
            embedder,
        ) {
            Ok(chunker) => chunker,
            Err(e) => {
                tracing::warn!(error = %e, "Strategy auto-selection unavailable, using recursive");
                return ChunkStrategy::Recursive;
            }
        };

        match chunker.analyze_structure(text) {
            Ok(analysis) => match analysis.complexity {
                SemanticComplexity::Low => ChunkStrategy::Recursive,
                SemanticComplexity::Medium => ChunkStrategy::Hybrid,
                SemanticComplexity::High => ChunkStrategy::Semantic,
            },
            Err(e) => {
                tracing::warn!(error = %e, "Structure analysis failed, using recursive");
                ChunkStrategy::Recursive
            }
        }
    }

    /// Analyze a text's semantic structure (requires an embedder).
    pub fn analyze_structure(&self, text: &str) -> Result<StructureAnalysis> {
        let chunker = SemanticChunker::new(
            self.config.chunking.clone(),
            self.config.semantic.clone(),
            self.length.clone(),
            self.require_embedder("analysis")?,
        )?;
        chunker.analyze_structure(text)
    }

    /// Run every applicable strategy over a text and summarize the results.
    ///
    /// Strategies needing an absent embedder are skipped; a strategy that
    /// errors is skipped with a warning rather than failing the comparison.
    pub fn compare_strategies(
        &self,
        text: &str,
        source_doc_id: &str,
    ) -> HashMap<ChunkStrategy, StrategyReport> {
        let mut reports = HashMap::new();
        let strategies = [
            ChunkStrategy::Recursive,
            ChunkStrategy::Semantic,
            ChunkStrategy::Email,
            ChunkStrategy::Slide,
            ChunkStrategy::Hybrid,
        ];

        for strategy in strategies {
            let needs_embedder =
                matches!(strategy, ChunkStrategy::Semantic | ChunkStrategy::Hybrid);
            if needs_embedder && self.embedder.is_none() {
                continue;
            }
            match self.chunk(text, source_doc_id, strategy) {
                Ok(chunks) => {
                    let total_size: usize =
                        chunks.iter().map(|c| c.content.chars().count()).sum();
                    let avg_chunk_size = if chunks.is_empty() {
                        0.0
                    } else {
                        total_size as f64 / chunks.len() as f64
                    };
                    reports.insert(
                        strategy,
                        StrategyReport {
                            chunk_count: chunks.len(),
                            avg_chunk_size,
                            total_size,
                        },
                    );
                }
                Err(e) => {
                    tracing::warn!(%strategy, error = %e, "Strategy failed during comparison");
                }
            }
        }
        reports
    }

    fn require_embedder(&self, purpose: &str) -> Result<Arc<dyn EmbeddingProvider>> {
        self.embedder.clone().ok_or_else(|| {
            Error::config(format!(
                "The {} strategy requires an embedding provider",
                purpose
            ))
        })
    }
}
