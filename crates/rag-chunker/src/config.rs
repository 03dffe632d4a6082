//! Configuration for the chunking toolkit

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::length::LengthType;

/// Separator-based chunking configuration shared by all strategies.
///
/// Invariant: `0 <= chunk_overlap < chunk_size`. Violations fail at
/// construction with [`Error::Config`]; they are never recovered locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkConfig {
    /// Maximum chunk size under the active length measure
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    /// Trailing content duplicated at the start of the next chunk
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,
    /// Ordered separator priority list, most-specific first; the empty
    /// string means raw character splitting and must come last
    #[serde(default = "default_separators")]
    pub separators: Vec<String>,
    /// Keep the matched separator attached to the preceding piece
    #[serde(default)]
    pub keep_separator: bool,
    /// Record the chunk's offset into the original text in metadata
    #[serde(default = "default_true")]
    pub add_start_index: bool,
    /// Trim whitespace from emitted chunk content
    #[serde(default = "default_true")]
    pub strip_whitespace: bool,
}

fn default_chunk_size() -> usize {
    1000
}
fn default_chunk_overlap() -> usize {
    200
}
fn default_true() -> bool {
    true
}

fn default_separators() -> Vec<String> {
    vec![
        "\n\n".to_string(),
        "\n".to_string(),
        " ".to_string(),
        String::new(),
    ]
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
            separators: default_separators(),
            keep_separator: false,
            add_start_index: true,
            strip_whitespace: true,
        }
    }
}

impl ChunkConfig {
    /// Create a validated config with default separators
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        let config = Self {
            chunk_size,
            chunk_overlap,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the size/overlap invariant
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(Error::config("chunk_size must be greater than 0"));
        }
        if self.chunk_overlap >= self.chunk_size {
            return Err(Error::config(format!(
                "chunk_overlap ({}) must be less than chunk_size ({})",
                self.chunk_overlap, self.chunk_size
            )));
        }
        Ok(())
    }

    /// Separator priority list tuned for a language.
    ///
    /// `zh` inserts CJK sentence terminators between the line and space
    /// levels; `en` inserts Latin terminators. Unknown tags return the
    /// default list.
    pub fn separators_for_language(language: &str) -> Vec<String> {
        match language {
            "zh" => ["\n\n", "\n", "。", "！", "？", "；", "：", "，", " ", ""]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            "en" => ["\n\n", "\n", ". ", "! ", "? ", "; ", ": ", ", ", " ", ""]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            _ => default_separators(),
        }
    }
}

/// Semantic chunking knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemanticConfig {
    /// Break when mean similarity against the current chunk falls below this
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f32,
    /// Never commit a breakpoint before the chunk reaches this size
    #[serde(default = "default_min_chunk_size")]
    pub min_chunk_size: usize,
}

fn default_similarity_threshold() -> f32 {
    0.5
}
fn default_min_chunk_size() -> usize {
    100
}

impl Default for SemanticConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: default_similarity_threshold(),
            min_chunk_size: default_min_chunk_size(),
        }
    }
}

/// Hybrid strategy knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HybridConfig {
    /// Semantic chunks larger than `chunk_size * multiplier` are re-split
    /// with the recursive chunker
    #[serde(default = "default_multiplier")]
    pub max_chunk_size_multiplier: f32,
}

fn default_multiplier() -> f32 {
    1.5
}

impl Default for HybridConfig {
    fn default() -> Self {
        Self {
            max_chunk_size_multiplier: default_multiplier(),
        }
    }
}

/// Email chunker knobs
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EmailConfig {
    /// Strip email addresses before measuring and chunking
    #[serde(default)]
    pub remove_emails: bool,
}

/// Top-level configuration for the chunking facade
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ChunkerConfig {
    /// Shared size/overlap/separator configuration
    #[serde(default)]
    pub chunking: ChunkConfig,
    /// Length unit used for all size decisions
    #[serde(default)]
    pub length_type: LengthType,
    /// Semantic strategy settings
    #[serde(default)]
    pub semantic: SemanticConfig,
    /// Hybrid strategy settings
    #[serde(default)]
    pub hybrid: HybridConfig,
    /// Email strategy settings
    #[serde(default)]
    pub email: EmailConfig,
}

impl ChunkerConfig {
    /// Load and validate a configuration from a TOML file
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate all nested invariants
    pub fn validate(&self) -> Result<()> {
        self.chunking.validate()?;
        if self.hybrid.max_chunk_size_multiplier < 1.0 {
            return Err(Error::config(
                "max_chunk_size_multiplier must be at least 1.0",
            ));
        }
        Ok(())
    }
}
