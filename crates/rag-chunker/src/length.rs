//! Length estimation: every size decision in a chunker goes through one
//! `LengthMeasure` fixed at construction. Mixing units mid-computation is a
//! correctness bug, so measures are immutable once built.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokenizers::Tokenizer;
use unicode_segmentation::UnicodeSegmentation;

use crate::error::{Error, Result};

/// Which length unit a chunker counts in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LengthType {
    /// Character count
    #[default]
    Char,
    /// Subword token count via a HuggingFace tokenizer
    Token,
}

/// Pluggable text -> size function used by every chunker
#[derive(Clone)]
pub enum LengthMeasure {
    /// Identity length: number of Unicode scalar values
    Chars,
    /// Token count from a BPE/WordPiece tokenizer
    Tokens(Arc<Tokenizer>),
}

impl LengthMeasure {
    /// Character-count measure
    pub fn chars() -> Self {
        Self::Chars
    }

    /// Token-count measure backed by an already-loaded tokenizer
    pub fn tokens(tokenizer: Tokenizer) -> Self {
        Self::Tokens(Arc::new(tokenizer))
    }

    /// Token-count measure loaded from a `tokenizer.json` file
    pub fn tokens_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let tokenizer = Tokenizer::from_file(path.as_ref())
            .map_err(|e| Error::Tokenizer(format!("Failed to load tokenizer: {}", e)))?;
        Ok(Self::Tokens(Arc::new(tokenizer)))
    }

    /// Measure a text in this measure's unit.
    ///
    /// A tokenizer that fails to encode (malformed input for its normalizer)
    /// falls back to the heuristic token estimate rather than aborting a
    /// chunking pass.
    pub fn measure(&self, text: &str) -> usize {
        match self {
            Self::Chars => text.chars().count(),
            Self::Tokens(tokenizer) => match tokenizer.encode(text, false) {
                Ok(encoding) => encoding.get_ids().len(),
                Err(e) => {
                    tracing::warn!("Tokenizer encode failed, using estimate: {}", e);
                    estimate_tokens(text)
                }
            },
        }
    }
}

impl std::fmt::Debug for LengthMeasure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Chars => f.write_str("LengthMeasure::Chars"),
            Self::Tokens(_) => f.write_str("LengthMeasure::Tokens"),
        }
    }
}

/// Heuristic token estimate used for chunk metadata when no tokenizer is
/// configured: CJK characters count 1 each, remaining whitespace-separated
/// words count 1.3 each.
pub fn estimate_tokens(text: &str) -> usize {
    let cjk_chars = text.chars().filter(|c| is_cjk(*c)).count();
    let non_cjk: String = text.chars().map(|c| if is_cjk(c) { ' ' } else { c }).collect();
    let words = non_cjk.unicode_words().count();
    cjk_chars + (words as f64 * 1.3) as usize
}

fn is_cjk(c: char) -> bool {
    ('\u{4e00}'..='\u{9fff}').contains(&c)
}
