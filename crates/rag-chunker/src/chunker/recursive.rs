//! Recursive separator-based chunking: the default/fallback strategy.
//!
//! Splits on a prioritized separator list (paragraph -> line -> space ->
//! character), greedily packing pieces up to the budget and carrying
//! `chunk_overlap` worth of trailing content into the next chunk. A piece
//! that exceeds the budget on its own recurses into the next separator; an
//! atomic token that survives the final (character) level is emitted as-is,
//! the one permitted overflow.

use std::collections::VecDeque;

use crate::config::ChunkConfig;
use crate::error::Result;
use crate::length::{estimate_tokens, LengthMeasure};
use crate::types::{chunk_id, Chunk, ChunkMetadata, ChunkType};

/// General-purpose recursive chunker. Stateless across calls; holds only
/// immutable configuration.
#[derive(Debug, Clone)]
pub struct RecursiveChunker {
    config: ChunkConfig,
    length: LengthMeasure,
}

impl RecursiveChunker {
    /// Create a recursive chunker, validating the configuration
    pub fn new(config: ChunkConfig, length: LengthMeasure) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, length })
    }

    /// Active configuration
    pub fn config(&self) -> &ChunkConfig {
        &self.config
    }

    /// Chunk a text into metadata-bearing chunks.
    ///
    /// Empty input yields an empty sequence; input within the budget yields
    /// a single chunk equal to the input.
    pub fn chunk(&self, text: &str, source_doc_id: &str) -> Vec<Chunk> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let pieces = self.split_text(text);
        let mut chunks = Vec::with_capacity(pieces.len());
        let mut search_from = 0usize;

        for (index, content) in pieces.into_iter().enumerate() {
            let (start_char, end_char) = if self.config.add_start_index {
                self.locate(text, &content, &mut search_from)
            } else {
                (0, content.chars().count())
            };

            let measured = self.length.measure(&content);
            let oversized = measured > self.config.chunk_size;
            if oversized {
                tracing::debug!(
                    "Emitting oversized atomic chunk ({} > {})",
                    measured,
                    self.config.chunk_size
                );
            }

            let token_count = match &self.length {
                LengthMeasure::Chars => estimate_tokens(&content),
                LengthMeasure::Tokens(_) => measured,
            };

            let metadata = ChunkMetadata {
                chunk_id: chunk_id(source_doc_id, index),
                source_doc_id: source_doc_id.to_string(),
                chunk_index: index,
                start_char,
                end_char,
                token_count,
                chunk_type: ChunkType::Text,
                oversized,
            };
            chunks.push(Chunk::new(content, metadata));
        }
        chunks
    }

    /// Split a text into bounded strings without building metadata
    pub fn split_text(&self, text: &str) -> Vec<String> {
        self.split_recursive(text, &self.config.separators)
    }

    /// Find the chunk's character offsets in the source, scanning forward
    /// from the previous chunk so overlapping content resolves in order.
    fn locate(&self, text: &str, content: &str, search_from: &mut usize) -> (usize, usize) {
        match text[*search_from..].find(content) {
            Some(rel) => {
                let byte_start = *search_from + rel;
                let start = text[..byte_start].chars().count();
                *search_from = byte_start + 1;
                while *search_from < text.len() && !text.is_char_boundary(*search_from) {
                    *search_from += 1;
                }
                (start, start + content.chars().count())
            }
            None => {
                // stripped/merged content that no longer appears verbatim;
                // fall back to the current scan position
                let start = text[..*search_from].chars().count();
                (start, start + content.chars().count())
            }
        }
    }

    fn split_recursive(&self, text: &str, separators: &[String]) -> Vec<String> {
        let mut final_chunks = Vec::new();

        // first separator that actually occurs in the text wins
        let mut separator = separators.last().cloned().unwrap_or_default();
        let mut remaining: &[String] = &[];
        for (i, sep) in separators.iter().enumerate() {
            if sep.is_empty() || text.contains(sep.as_str()) {
                separator = sep.clone();
                remaining = &separators[i + 1..];
                break;
            }
        }

        let splits = split_on_separator(text, &separator, self.config.keep_separator);
        let merge_separator = if self.config.keep_separator {
            ""
        } else {
            separator.as_str()
        };

        let mut good: Vec<String> = Vec::new();
        for piece in splits {
            if self.length.measure(&piece) < self.config.chunk_size {
                good.push(piece);
            } else {
                if !good.is_empty() {
                    final_chunks.extend(self.merge_pieces(&good, merge_separator));
                    good.clear();
                }
                if remaining.is_empty() {
                    // no finer separator left: accepted atomic overflow
                    final_chunks.push(piece);
                } else {
                    final_chunks.extend(self.split_recursive(&piece, remaining));
                }
            }
        }
        if !good.is_empty() {
            final_chunks.extend(self.merge_pieces(&good, merge_separator));
        }
        final_chunks
    }

    /// Greedily accumulate pieces up to the budget, then restart the buffer
    /// seeded with the trailing `chunk_overlap` worth of pieces.
    fn merge_pieces(&self, pieces: &[String], separator: &str) -> Vec<String> {
        let sep_len = self.length.measure(separator);
        let mut docs = Vec::new();
        let mut current: VecDeque<String> = VecDeque::new();
        let mut total = 0usize;

        for piece in pieces {
            let len = self.length.measure(piece);
            let extra = if current.is_empty() { 0 } else { sep_len };

            if total + len + extra > self.config.chunk_size && !current.is_empty() {
                if let Some(doc) = self.join_pieces(&current, separator) {
                    docs.push(doc);
                }
                // drop from the front until within the overlap budget and
                // until the incoming piece fits
                while !current.is_empty()
                    && (total > self.config.chunk_overlap
                        || total + len + if current.is_empty() { 0 } else { sep_len }
                            > self.config.chunk_size)
                {
                    let front_extra = if current.len() > 1 { sep_len } else { 0 };
                    if let Some(front) = current.pop_front() {
                        total = total.saturating_sub(self.length.measure(&front) + front_extra);
                    }
                }
            }

            current.push_back(piece.clone());
            total += len + if current.len() > 1 { sep_len } else { 0 };
        }

        if let Some(doc) = self.join_pieces(&current, separator) {
            docs.push(doc);
        }
        docs
    }

    fn join_pieces(&self, pieces: &VecDeque<String>, separator: &str) -> Option<String> {
        let joined = pieces
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(separator);
        let joined = if self.config.strip_whitespace {
            joined.trim().to_string()
        } else {
            joined
        };
        if joined.is_empty() {
            None
        } else {
            Some(joined)
        }
    }
}

/// Split on a separator. The empty separator means raw character splitting.
/// With `keep_separator` the separator stays attached to the end of the
/// preceding piece so concatenation reconstructs the input.
fn split_on_separator(text: &str, separator: &str, keep_separator: bool) -> Vec<String> {
    if separator.is_empty() {
        return text.chars().map(|c| c.to_string()).collect();
    }
    if keep_separator {
        let mut pieces = Vec::new();
        let mut iter = text.split(separator).peekable();
        while let Some(part) = iter.next() {
            if iter.peek().is_some() {
                pieces.push(format!("{}{}", part, separator));
            } else if !part.is_empty() {
                pieces.push(part.to_string());
            }
        }
        pieces
    } else {
        text.split(separator)
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
            .collect()
    }
}
