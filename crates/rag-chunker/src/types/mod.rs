//! Core types for the chunking toolkit

pub mod analysis;
pub mod chunk;
pub mod unit;

pub use analysis::{SemanticComplexity, StrategyReport, StructureAnalysis};
pub use chunk::{chunk_id, Chunk, ChunkMetadata, ChunkType};
pub use unit::StructuralUnit;
