//! Semantic similarity-based chunking.
//!
//! Sentences are embedded once, pairwise similarities go into an N x N
//! matrix, and breakpoints fall where topical drift (mean similarity against
//! the running chunk drops below the threshold) or the size budget demands
//! one. Breakpoints are only committed once the running chunk has reached
//! `min_chunk_size`, which keeps noisy low-similarity runs from producing
//! pathologically tiny chunks.

use std::sync::Arc;

use ndarray::Array2;

use crate::config::{ChunkConfig, SemanticConfig};
use crate::error::{Error, Result};
use crate::length::{estimate_tokens, LengthMeasure};
use crate::providers::EmbeddingProvider;
use crate::text::split_sentences;
use crate::types::{
    chunk_id, Chunk, ChunkMetadata, ChunkType, SemanticComplexity, StructureAnalysis,
};

/// Semantic chunker with an injected embedding provider.
///
/// The provider must return unit-normalized vectors (dot product = cosine
/// similarity). Given deterministic embeddings, output is deterministic.
pub struct SemanticChunker {
    config: ChunkConfig,
    semantic: SemanticConfig,
    length: LengthMeasure,
    embedder: Arc<dyn EmbeddingProvider>,
}

impl SemanticChunker {
    /// Create a semantic chunker, validating the configuration
    pub fn new(
        config: ChunkConfig,
        semantic: SemanticConfig,
        length: LengthMeasure,
        embedder: Arc<dyn EmbeddingProvider>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            semantic,
            length,
            embedder,
        })
    }

    /// Chunk a text along semantic breakpoints.
    ///
    /// The embedding pass happens exactly once per call; its failure is
    /// propagated, never swallowed.
    pub fn chunk(&self, text: &str, source_doc_id: &str) -> Result<Vec<Chunk>> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let sentences = split_sentences(text);
        let sentences: Vec<String> = sentences
            .into_iter()
            .filter(|s| !s.trim().is_empty())
            .collect();

        if sentences.len() <= 1 {
            return Ok(vec![self.single_chunk(text, source_doc_id)]);
        }

        let matrix = self.similarity_matrix(&sentences)?;
        let breakpoints = self.find_breakpoints(&sentences, &matrix);
        Ok(self.materialize(&sentences, &breakpoints, source_doc_id))
    }

    /// Analyze a text's semantic structure without emitting chunks.
    ///
    /// Used by strategy auto-selection; shares the single embedding pass.
    pub fn analyze_structure(&self, text: &str) -> Result<StructureAnalysis> {
        let sentences: Vec<String> = split_sentences(text)
            .into_iter()
            .filter(|s| !s.trim().is_empty())
            .collect();

        if sentences.len() <= 1 {
            return Ok(StructureAnalysis {
                sentence_count: sentences.len(),
                mean_similarity: 1.0,
                similarity_variance: 0.0,
                complexity: SemanticComplexity::Low,
                recommended_chunks: 1,
                total_length: text.chars().count(),
            });
        }

        let matrix = self.similarity_matrix(&sentences)?;
        let n = (matrix.len()) as f32;
        let mean = matrix.sum() / n;
        let variance = matrix.iter().map(|v| (v - mean).powi(2)).sum::<f32>() / n;

        let complexity = if mean > 0.7 {
            SemanticComplexity::Low
        } else if mean > 0.4 {
            SemanticComplexity::Medium
        } else {
            SemanticComplexity::High
        };

        let breakpoints = self.find_breakpoints(&sentences, &matrix);
        Ok(StructureAnalysis {
            sentence_count: sentences.len(),
            mean_similarity: mean,
            similarity_variance: variance,
            complexity,
            recommended_chunks: breakpoints.len().saturating_sub(1),
            total_length: text.chars().count(),
        })
    }

    /// One embedding pass, then an N x N dot-product matrix
    fn similarity_matrix(&self, sentences: &[String]) -> Result<Array2<f32>> {
        let embeddings = self.embedder.embed_batch(sentences)?;
        if embeddings.len() != sentences.len() {
            return Err(Error::embedding(format!(
                "Provider '{}' returned {} embeddings for {} sentences",
                self.embedder.name(),
                embeddings.len(),
                sentences.len()
            )));
        }
        let dims = embeddings.first().map(Vec::len).unwrap_or(0);
        if dims == 0 || embeddings.iter().any(|e| e.len() != dims) {
            return Err(Error::embedding(format!(
                "Provider '{}' returned inconsistent embedding dimensions",
                self.embedder.name()
            )));
        }

        let n = embeddings.len();
        let flat: Vec<f32> = embeddings.into_iter().flatten().collect();
        let matrix = Array2::from_shape_vec((n, dims), flat)
            .map_err(|e| Error::embedding(format!("Bad embedding shape: {}", e)))?;
        Ok(matrix.dot(&matrix.t()))
    }

    /// Left-to-right breakpoint walk over the sentence sequence
    fn find_breakpoints(&self, sentences: &[String], matrix: &Array2<f32>) -> Vec<usize> {
        let mut breakpoints = vec![0];
        let mut chunk_start = 0usize;
        let mut chunk_size = self.length.measure(&sentences[0]);

        for i in 1..sentences.len() {
            let window = chunk_start..i;
            let count = window.len() as f32;
            let mean_similarity: f32 =
                window.map(|j| matrix[[i, j]]).sum::<f32>() / count.max(1.0);

            chunk_size += self.length.measure(&sentences[i]);

            let should_break = mean_similarity < self.semantic.similarity_threshold
                || chunk_size > self.config.chunk_size;

            if should_break && chunk_size >= self.semantic.min_chunk_size {
                breakpoints.push(i);
                chunk_start = i;
                chunk_size = self.length.measure(&sentences[i]);
            }
        }

        if *breakpoints.last().unwrap_or(&0) != sentences.len() {
            breakpoints.push(sentences.len());
        }
        breakpoints
    }

    /// Materialize inter-breakpoint spans as chunks, prepending overlap
    /// sentences from the previous span up to `chunk_overlap` by length
    fn materialize(
        &self,
        sentences: &[String],
        breakpoints: &[usize],
        source_doc_id: &str,
    ) -> Vec<Chunk> {
        let mut chunks = Vec::with_capacity(breakpoints.len().saturating_sub(1));
        let mut index = 0usize;

        for window in breakpoints.windows(2) {
            let (start, end) = (window[0], window[1]);
            let core: String = sentences[start..end].concat();
            if core.trim().is_empty() {
                continue;
            }

            let mut content = core;
            if index > 0 && self.config.chunk_overlap > 0 {
                let overlap = self.overlap_sentences(sentences, start);
                if !overlap.is_empty() {
                    content = format!("{}{}", overlap.concat(), content);
                }
            }

            let start_char: usize = sentences[..start].iter().map(|s| s.chars().count()).sum();
            let token_count = match &self.length {
                LengthMeasure::Chars => estimate_tokens(&content),
                LengthMeasure::Tokens(_) => self.length.measure(&content),
            };

            let metadata = ChunkMetadata {
                chunk_id: chunk_id(source_doc_id, index),
                source_doc_id: source_doc_id.to_string(),
                chunk_index: index,
                start_char,
                end_char: start_char + content.chars().count(),
                token_count,
                chunk_type: ChunkType::Semantic,
                oversized: false,
            };
            chunks.push(Chunk::new(content, metadata));
            index += 1;
        }
        chunks
    }

    /// Trailing sentences of the previous span that fit the overlap budget
    fn overlap_sentences(&self, sentences: &[String], start: usize) -> Vec<String> {
        let mut overlap = Vec::new();
        let mut used = 0usize;
        for sentence in sentences[..start].iter().rev() {
            let len = self.length.measure(sentence);
            if used + len > self.config.chunk_overlap {
                break;
            }
            overlap.insert(0, sentence.clone());
            used += len;
        }
        overlap
    }

    fn single_chunk(&self, text: &str, source_doc_id: &str) -> Chunk {
        let token_count = match &self.length {
            LengthMeasure::Chars => estimate_tokens(text),
            LengthMeasure::Tokens(_) => self.length.measure(text),
        };
        Chunk::new(
            text.to_string(),
            ChunkMetadata {
                chunk_id: chunk_id(source_doc_id, 0),
                source_doc_id: source_doc_id.to_string(),
                chunk_index: 0,
                start_char: 0,
                end_char: text.chars().count(),
                token_count,
                chunk_type: ChunkType::Semantic,
                oversized: self.length.measure(text) > self.config.chunk_size,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;

    /// Deterministic fake: direction depends on the sentence's topic word.
    struct TopicEmbedder;

    impl EmbeddingProvider for TopicEmbedder {
        fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            Ok(texts
                .iter()
                .map(|t| {
                    if t.contains("AI") {
                        vec![1.0, 0.0, 0.0]
                    } else if t.contains("cat") || t.contains("raining") {
                        vec![0.0, 1.0, 0.0]
                    } else {
                        vec![0.0, 0.0, 1.0]
                    }
                })
                .collect())
        }

        fn dimensions(&self) -> usize {
            3
        }

        fn name(&self) -> &str {
            "topic-fake"
        }
    }

    struct FailingEmbedder;

    impl EmbeddingProvider for FailingEmbedder {
        fn embed_batch(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>> {
            Err(Error::embedding("backend down"))
        }

        fn dimensions(&self) -> usize {
            3
        }

        fn name(&self) -> &str {
            "failing-fake"
        }
    }

    fn chunker(
        chunk_size: usize,
        threshold: f32,
        min_chunk_size: usize,
        embedder: Arc<dyn EmbeddingProvider>,
    ) -> SemanticChunker {
        let config = ChunkConfig::new(chunk_size, 0).unwrap();
        let semantic = SemanticConfig {
            similarity_threshold: threshold,
            min_chunk_size,
        };
        SemanticChunker::new(config, semantic, LengthMeasure::chars(), embedder).unwrap()
    }

    #[test]
    fn test_topic_drift_creates_breakpoint() {
        let text = "AI is powerful. AI is everywhere. AI helps research. The cat sat down. It was raining hard.";
        let chunks = chunker(1000, 0.9, 10, Arc::new(TopicEmbedder))
            .chunk(text, "doc")
            .unwrap();
        assert_eq!(chunks.len(), 2);
        assert!(chunks[0].content.contains("AI is powerful."));
        assert!(chunks[0].content.contains("AI helps research."));
        assert!(chunks[1].content.contains("The cat sat down."));
        assert!(chunks[1].content.contains("raining"));
        for chunk in &chunks {
            assert_eq!(chunk.metadata.chunk_type, ChunkType::Semantic);
        }
    }

    #[test]
    fn test_single_sentence_passes_through() {
        let chunks = chunker(1000, 0.5, 10, Arc::new(TopicEmbedder))
            .chunk("Just one sentence.", "doc")
            .unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content, "Just one sentence.");
    }

    #[test]
    fn test_embedding_failure_propagates() {
        let result = chunker(1000, 0.5, 10, Arc::new(FailingEmbedder))
            .chunk("One sentence. Another sentence.", "doc");
        assert!(matches!(result, Err(Error::Embedding(_))));
    }

    #[test]
    fn test_min_chunk_size_suppresses_tiny_breaks() {
        // every sentence is a different topic but min_chunk_size is huge,
        // so no break is ever committed
        let text = "AI leads. The cat sat. Other topic here.";
        let chunks = chunker(1000, 0.9, 10_000, Arc::new(TopicEmbedder))
            .chunk(text, "doc")
            .unwrap();
        assert_eq!(chunks.len(), 1);
    }

    #[test]
    fn test_deterministic_given_deterministic_embeddings() {
        let text = "AI one. AI two. The cat sat. AI three. It was raining.";
        let c = chunker(1000, 0.9, 10, Arc::new(TopicEmbedder));
        let a = c.chunk(text, "doc").unwrap();
        let b = c.chunk(text, "doc").unwrap();
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.content, y.content);
        }
    }

    #[test]
    fn test_analyze_structure_complexity() {
        let uniform = "AI one. AI two. AI three.";
        let analysis = chunker(1000, 0.9, 10, Arc::new(TopicEmbedder))
            .analyze_structure(uniform)
            .unwrap();
        assert_eq!(analysis.complexity, SemanticComplexity::Low);
        assert_eq!(analysis.sentence_count, 3);

        let mixed = "AI one. The cat sat. Unrelated thing entirely.";
        let analysis = chunker(1000, 0.9, 10, Arc::new(TopicEmbedder))
            .analyze_structure(mixed)
            .unwrap();
        assert_eq!(analysis.complexity, SemanticComplexity::High);
    }
}
