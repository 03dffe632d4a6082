//! Slide-deck structural chunking.
//!
//! One chunk per slide when it fits the budget, packed sentences otherwise.
//! The preamble before the first `## Slide N` marker (deck title, speaker
//! notes header) is its own unit.

use crate::chunker::email::emit_units;
use crate::config::ChunkConfig;
use crate::error::Result;
use crate::length::LengthMeasure;
use crate::text::split_slides;
use crate::types::{Chunk, ChunkType};

pub struct SlideChunker {
    config: ChunkConfig,
    length: LengthMeasure,
}

impl SlideChunker {
    pub fn new(config: ChunkConfig, length: LengthMeasure) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, length })
    }

    /// Chunk slide-deck Markdown along slide boundaries.
    pub fn chunk(&self, text: &str, source_doc_id: &str) -> Vec<Chunk> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let units = split_slides(text);
        tracing::debug!(
            source_doc_id,
            unit_count = units.len(),
            "Splitting document into slide units"
        );
        emit_units(
            &units,
            &self.config,
            &self.length,
            ChunkType::Slide,
            source_doc_id,
        )
    }
}
