//! Semantic structure analysis used by strategy auto-selection

use serde::{Deserialize, Serialize};

/// Coarse semantic complexity class of a text
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SemanticComplexity {
    /// High inter-sentence similarity, simple structure
    Low,
    /// Mixed similarity
    Medium,
    /// Low inter-sentence similarity, topically diverse
    High,
}

/// Result of analyzing a text's semantic structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructureAnalysis {
    /// Number of sentences detected
    pub sentence_count: usize,
    /// Mean of the pairwise similarity matrix
    pub mean_similarity: f32,
    /// Variance of the pairwise similarity matrix
    pub similarity_variance: f32,
    /// Complexity class derived from mean similarity
    pub complexity: SemanticComplexity,
    /// Chunk count the semantic breakpoint search would produce
    pub recommended_chunks: usize,
    /// Total text length in characters
    pub total_length: usize,
}

/// Per-strategy summary produced by `DocumentChunker::compare_strategies`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyReport {
    /// Number of chunks the strategy emitted
    pub chunk_count: usize,
    /// Mean chunk content length in characters
    pub avg_chunk_size: f64,
    /// Total content length across chunks
    pub total_size: usize,
}
