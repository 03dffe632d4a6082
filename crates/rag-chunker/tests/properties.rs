//! Property-based invariants over the separator-based chunkers.

use proptest::prelude::*;

use rag_chunker::{ChunkConfig, LengthMeasure, RecursiveChunker};

fn chunker(config: ChunkConfig) -> RecursiveChunker {
    RecursiveChunker::new(config, LengthMeasure::chars()).unwrap()
}

proptest! {
    /// Non-oversized chunks always respect the budget.
    #[test]
    fn chunks_respect_budget(
        text in "[a-zA-Z ,.\n]{0,400}",
        chunk_size in 10usize..200,
    ) {
        let config = ChunkConfig::new(chunk_size, 0).unwrap();
        let chunks = chunker(config).chunk(&text, "doc");
        for chunk in &chunks {
            if !chunk.metadata.oversized {
                prop_assert!(chunk.content.chars().count() <= chunk_size);
            }
        }
    }

    /// With separators kept, no trimming, and no overlap, concatenating the
    /// chunks reproduces the input exactly.
    #[test]
    fn lossless_reconstruction_without_overlap(
        text in "[a-z][a-z ,.\n]{0,300}",
        chunk_size in 10usize..100,
    ) {
        let config = ChunkConfig {
            chunk_size,
            chunk_overlap: 0,
            keep_separator: true,
            strip_whitespace: false,
            ..ChunkConfig::default()
        };
        let chunks = chunker(config).chunk(&text, "doc");
        let rejoined: String = chunks.iter().map(|c| c.content.as_str()).collect();
        prop_assert_eq!(rejoined, text);
    }

    /// Chunk indices are contiguous from zero and ids match them.
    #[test]
    fn indices_and_ids_are_contiguous(
        text in "[a-z .\n]{0,300}",
        chunk_size in 10usize..100,
        overlap_frac in 0usize..5,
    ) {
        let overlap = chunk_size * overlap_frac / 10;
        let config = ChunkConfig::new(chunk_size, overlap).unwrap();
        let chunks = chunker(config).chunk(&text, "d");
        for (i, chunk) in chunks.iter().enumerate() {
            prop_assert_eq!(chunk.metadata.chunk_index, i);
            prop_assert_eq!(chunk.metadata.chunk_id.clone(), format!("d_chunk_{}", i));
        }
    }

    /// Chunking is deterministic.
    #[test]
    fn chunking_is_deterministic(
        text in "[a-z .\n]{0,300}",
        chunk_size in 10usize..100,
    ) {
        let config = ChunkConfig::new(chunk_size, chunk_size / 5).unwrap();
        let c = chunker(config);
        let a = c.chunk(&text, "doc");
        let b = c.chunk(&text, "doc");
        prop_assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(&b) {
            prop_assert_eq!(&x.content, &y.content);
            prop_assert_eq!(x.metadata.start_char, y.metadata.start_char);
        }
    }

    /// Every non-whitespace character of the input survives chunking.
    #[test]
    fn no_content_loss(
        text in "[a-z .\n]{1,300}",
        chunk_size in 20usize..100,
    ) {
        let config = ChunkConfig::new(chunk_size, 0).unwrap();
        let chunks = chunker(config).chunk(&text, "doc");
        let squash = |s: &str| s.chars().filter(|c| !c.is_whitespace()).collect::<String>();
        let rejoined: String = chunks.iter().map(|c| squash(&c.content)).collect();
        prop_assert_eq!(rejoined, squash(&text));
    }

    /// The overlap invariant is enforced at construction.
    #[test]
    fn invalid_overlap_rejected(
        chunk_size in 1usize..100,
        excess in 0usize..50,
    ) {
        prop_assert!(ChunkConfig::new(chunk_size, chunk_size + excess).is_err());
    }
}
