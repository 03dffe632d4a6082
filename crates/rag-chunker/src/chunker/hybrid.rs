//! Hybrid chunking: semantic breakpoints first, recursive cleanup after.
//!
//! Semantic chunks can overshoot the budget when a topically coherent run
//! refuses to break. Chunks past `chunk_size * max_chunk_size_multiplier`
//! get re-split by the recursive chunker; everything else is kept as the
//! semantic pass produced it.

use std::sync::Arc;

use crate::chunker::recursive::RecursiveChunker;
use crate::chunker::semantic::SemanticChunker;
use crate::config::{ChunkConfig, HybridConfig, SemanticConfig};
use crate::error::Result;
use crate::length::LengthMeasure;
use crate::providers::EmbeddingProvider;
use crate::types::{chunk_id, Chunk, ChunkType};

pub struct HybridChunker {
    semantic: SemanticChunker,
    recursive: RecursiveChunker,
    length: LengthMeasure,
    max_chunk_size: usize,
}

impl HybridChunker {
    pub fn new(
        config: ChunkConfig,
        semantic: SemanticConfig,
        hybrid: HybridConfig,
        length: LengthMeasure,
        embedder: Arc<dyn EmbeddingProvider>,
    ) -> Result<Self> {
        let max_chunk_size =
            (config.chunk_size as f32 * hybrid.max_chunk_size_multiplier) as usize;
        let recursive = RecursiveChunker::new(config.clone(), length.clone())?;
        let semantic = SemanticChunker::new(config, semantic, length.clone(), embedder)?;
        Ok(Self {
            semantic,
            recursive,
            length,
            max_chunk_size,
        })
    }

    pub fn chunk(&self, text: &str, source_doc_id: &str) -> Result<Vec<Chunk>> {
        let first_pass = self.semantic.chunk(text, source_doc_id)?;

        let mut chunks = Vec::with_capacity(first_pass.len());
        for chunk in first_pass {
            if self.length.measure(&chunk.content) <= self.max_chunk_size {
                chunks.push(chunk);
                continue;
            }

            tracing::debug!(
                length = self.length.measure(&chunk.content),
                max = self.max_chunk_size,
                "Re-splitting oversized semantic chunk recursively"
            );
            let mut refined = self.recursive.chunk(&chunk.content, source_doc_id);
            for sub in &mut refined {
                // re-splits inherit the semantic origin and stay anchored
                // to the parent's position in the document
                sub.metadata.chunk_type = ChunkType::Semantic;
                sub.metadata.start_char += chunk.metadata.start_char;
                sub.metadata.end_char += chunk.metadata.start_char;
            }
            chunks.extend(refined);
        }

        // a second pass changed the count, so indices and ids are reassigned
        for (index, chunk) in chunks.iter_mut().enumerate() {
            chunk.metadata.chunk_index = index;
            chunk.metadata.chunk_id = chunk_id(source_doc_id, index);
        }
        Ok(chunks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;

    /// Everything coheres: the semantic pass never breaks on similarity.
    struct UniformEmbedder;

    impl EmbeddingProvider for UniformEmbedder {
        fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            Ok(texts.iter().map(|_| vec![1.0, 0.0]).collect())
        }

        fn dimensions(&self) -> usize {
            2
        }

        fn name(&self) -> &str {
            "uniform-fake"
        }
    }

    fn chunker(chunk_size: usize, min_chunk_size: usize) -> HybridChunker {
        HybridChunker::new(
            ChunkConfig::new(chunk_size, 0).unwrap(),
            SemanticConfig {
                similarity_threshold: 0.5,
                min_chunk_size,
            },
            HybridConfig {
                max_chunk_size_multiplier: 1.5,
            },
            LengthMeasure::chars(),
            Arc::new(UniformEmbedder),
        )
        .unwrap()
    }

    #[test]
    fn test_oversized_semantic_chunks_get_resplit() {
        // min_chunk_size so large the semantic pass emits one giant chunk
        let text = "A steady topic sentence. ".repeat(12);
        let chunks = chunker(60, 100_000).chunk(&text, "doc").unwrap();
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.content.chars().count() <= 90);
            assert_eq!(chunk.metadata.chunk_type, ChunkType::Semantic);
        }
    }

    #[test]
    fn test_fitting_chunks_pass_through() {
        let text = "Short coherent text. More of the same.";
        let chunks = chunker(200, 10).chunk(&text, "doc").unwrap();
        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].content.contains("Short coherent text."));
    }

    #[test]
    fn test_indices_are_contiguous_after_resplit() {
        let text = "A steady topic sentence. ".repeat(12);
        let chunks = chunker(60, 100_000).chunk(&text, "doc").unwrap();
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.metadata.chunk_index, i);
            assert_eq!(chunk.metadata.chunk_id, format!("doc_chunk_{}", i));
        }
    }
}
