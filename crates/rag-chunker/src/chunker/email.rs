//! Email-aware structural chunking.
//!
//! Documents that concatenate multiple emails are split at email boundaries
//! first, so a chunk never straddles two emails. Bodies that fit the budget
//! pass through verbatim; oversized bodies are packed sentence by sentence
//! within their own email.

use crate::chunker::pack::pack_sentences;
use crate::config::{ChunkConfig, EmailConfig};
use crate::error::Result;
use crate::length::{estimate_tokens, LengthMeasure};
use crate::text::{remove_email_addresses, split_emails};
use crate::types::{chunk_id, Chunk, ChunkMetadata, ChunkType, StructuralUnit};

pub struct EmailChunker {
    config: ChunkConfig,
    email: EmailConfig,
    length: LengthMeasure,
}

impl EmailChunker {
    pub fn new(config: ChunkConfig, email: EmailConfig, length: LengthMeasure) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            email,
            length,
        })
    }

    /// Chunk a multi-email document along email boundaries.
    pub fn chunk(&self, text: &str, source_doc_id: &str) -> Vec<Chunk> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let text = if self.email.remove_emails {
            remove_email_addresses(text)
        } else {
            text.to_string()
        };

        let units = split_emails(&text);
        tracing::debug!(
            source_doc_id,
            unit_count = units.len(),
            "Splitting document into email units"
        );
        emit_units(
            &units,
            &self.config,
            &self.length,
            ChunkType::Email,
            source_doc_id,
        )
    }
}

/// Turn structural units into chunks: verbatim when under budget, packed
/// otherwise. Shared with the slide chunker.
///
/// `start_char`/`end_char` here are offsets into the concatenated emitted
/// content, not into the source text: markers, trimmed whitespace, and
/// sanitized addresses never appear in the output, so source offsets do not
/// exist for every chunk. The offsets are contiguous across chunks.
pub(crate) fn emit_units(
    units: &[StructuralUnit],
    config: &ChunkConfig,
    length: &LengthMeasure,
    chunk_type: ChunkType,
    source_doc_id: &str,
) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut index = 0usize;
    let mut cursor = 0usize;

    for unit in units {
        let body = unit.content.trim();
        if body.is_empty() {
            continue;
        }

        let measured = length.measure(body);
        let pieces: Vec<String> = if measured <= config.chunk_size {
            vec![body.to_string()]
        } else {
            pack_sentences(body, config.chunk_size, length)
        };

        for piece in pieces {
            let piece_len = length.measure(&piece);
            let oversized = piece_len > config.chunk_size;
            if oversized {
                tracing::debug!(
                    chunk_index = index,
                    length = piece_len,
                    budget = config.chunk_size,
                    "Emitting oversized atomic chunk"
                );
            }
            let token_count = match length {
                LengthMeasure::Chars => estimate_tokens(&piece),
                LengthMeasure::Tokens(_) => piece_len,
            };
            let char_len = piece.chars().count();
            chunks.push(Chunk::new(
                piece,
                ChunkMetadata {
                    chunk_id: chunk_id(source_doc_id, index),
                    source_doc_id: source_doc_id.to_string(),
                    chunk_index: index,
                    start_char: cursor,
                    end_char: cursor + char_len,
                    token_count,
                    chunk_type,
                    oversized,
                },
            ));
            cursor += char_len;
            index += 1;
        }
    }
    chunks
}
