//! End-to-end chunking scenarios across strategies.

use std::sync::Arc;

use rag_chunker::{
    Chunk, ChunkConfig, ChunkStrategy, ChunkType, ChunkerConfig, DocumentChunker,
    EmbeddingProvider, LengthMeasure, RecursiveChunker, Result, SemanticChunker, SemanticConfig,
};

fn chunker_config(chunk_size: usize, chunk_overlap: usize) -> ChunkerConfig {
    ChunkerConfig {
        chunking: ChunkConfig::new(chunk_size, chunk_overlap).unwrap(),
        ..ChunkerConfig::default()
    }
}

fn assert_budget(chunks: &[Chunk], chunk_size: usize) {
    for chunk in chunks {
        if !chunk.metadata.oversized {
            assert!(
                chunk.content.chars().count() <= chunk_size,
                "chunk {} over budget without oversized flag: {} chars",
                chunk.metadata.chunk_id,
                chunk.content.chars().count()
            );
        }
    }
}

#[test]
fn recursive_splits_paragraphed_prose_with_overlap() {
    // ~250 chars of paragraphed prose against a 100-char budget
    let text = "Lorem ipsum dolor sit amet, consectetur adipiscing elit.\n\n\
                Sed do eiusmod tempor incididunt ut labore et dolore magna aliqua. \
                Ut enim ad minim veniam, quis nostrud exercitation.\n\n\
                Duis aute irure dolor in reprehenderit in voluptate velit esse cillum.";
    let chunker =
        RecursiveChunker::new(ChunkConfig::new(100, 20).unwrap(), LengthMeasure::chars()).unwrap();
    let chunks = chunker.chunk(text, "lorem");

    assert!(chunks.len() >= 3, "expected >= 3 chunks, got {}", chunks.len());
    assert_budget(&chunks, 100);
    for (i, chunk) in chunks.iter().enumerate() {
        assert_eq!(chunk.metadata.chunk_index, i);
        assert_eq!(chunk.metadata.chunk_type, ChunkType::Text);
        assert!(!chunk.content.trim().is_empty());
    }
    // all source prose survives somewhere
    assert!(chunks.iter().any(|c| c.content.contains("Lorem ipsum")));
    assert!(chunks.iter().any(|c| c.content.contains("reprehenderit")));
}

#[test]
fn email_bodies_under_budget_pass_verbatim() {
    let text = "## Email 1\nHi team, quick update.\n\n## Email 2\nThanks, received it.";
    let chunker = DocumentChunker::new(chunker_config(50, 0)).unwrap();
    let chunks = chunker.chunk(text, "thread", ChunkStrategy::Email).unwrap();

    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[0].content, "Hi team, quick update.");
    assert_eq!(chunks[1].content, "Thanks, received it.");
    for chunk in &chunks {
        assert_eq!(chunk.metadata.chunk_type, ChunkType::Email);
        assert!(!chunk.metadata.oversized);
    }
}

#[test]
fn email_chunks_never_cross_marker_boundaries() {
    let text = "## Email 1\nFirst message body here.\n\n\
                ## Email 2\nSecond message body here.\n\n\
                ## Email 3\nThird message body here.";
    let chunker = DocumentChunker::new(chunker_config(1000, 0)).unwrap();
    let chunks = chunker.chunk(text, "thread", ChunkStrategy::Email).unwrap();

    assert_eq!(chunks.len(), 3);
    for (chunk, expected) in chunks.iter().zip(["First", "Second", "Third"]) {
        assert!(chunk.content.starts_with(expected));
        // one message per chunk, never two
        assert_eq!(chunk.content.matches("message body").count(), 1);
    }
}

/// Sentences about one topic embed in one direction, the rest in another.
struct TwoTopicEmbedder;

impl EmbeddingProvider for TwoTopicEmbedder {
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts
            .iter()
            .map(|t| {
                if t.contains("market") {
                    vec![0.0, 1.0]
                } else {
                    vec![1.0, 0.0]
                }
            })
            .collect())
    }

    fn dimensions(&self) -> usize {
        2
    }

    fn name(&self) -> &str {
        "two-topic"
    }
}

#[test]
fn semantic_breaks_where_the_topic_changes() {
    // sentences 1-3 share a topic, 4-5 switch to markets
    let text = "The model improves with data. The model trains overnight. \
                The model serves queries fast. The market opened lower today. \
                The market recovered by noon.";
    let chunker = SemanticChunker::new(
        ChunkConfig::new(1000, 0).unwrap(),
        SemanticConfig {
            similarity_threshold: 0.8,
            min_chunk_size: 20,
        },
        LengthMeasure::chars(),
        Arc::new(TwoTopicEmbedder),
    )
    .unwrap();
    let chunks = chunker.chunk(text, "report").unwrap();

    assert_eq!(chunks.len(), 2);
    assert!(chunks[0].content.contains("serves queries fast"));
    assert!(!chunks[0].content.contains("market"));
    assert!(chunks[1].content.contains("opened lower"));
    assert!(chunks[1].content.contains("recovered by noon"));
}

#[test]
fn oversized_table_lands_whole_in_a_flagged_chunk() {
    let table = format!(
        "<table><tr><td>{}</td></tr></table>",
        "cell data ".repeat(20).trim_end()
    );
    assert!(table.chars().count() > 200);
    let text = format!(
        "## Email 1\nPlease review the figures. {} Let me know today.",
        table
    );
    let chunker = DocumentChunker::new(chunker_config(100, 0)).unwrap();
    let chunks = chunker.chunk(&text, "report", ChunkStrategy::Email).unwrap();

    let table_chunk = chunks
        .iter()
        .find(|c| c.content.contains("<table>"))
        .expect("table chunk missing");
    assert_eq!(table_chunk.content, table);
    assert!(table_chunk.metadata.oversized);
    // prose around the table is preserved in other chunks
    assert!(chunks.iter().any(|c| c.content.contains("review the figures")));
    assert!(chunks.iter().any(|c| c.content.contains("know today")));
    assert_budget(&chunks, 100);
}

#[test]
fn slide_decks_chunk_one_slide_at_a_time() {
    let text = "Deck: Q3 Results\n\n\
                ## Slide 1\nRevenue grew in all regions.\n\n\
                ## Slide 2\nCosts were flat quarter over quarter.";
    let chunker = DocumentChunker::new(chunker_config(1000, 0)).unwrap();
    let chunks = chunker.chunk(text, "deck", ChunkStrategy::Slide).unwrap();

    assert_eq!(chunks.len(), 3);
    assert_eq!(chunks[0].content, "Deck: Q3 Results");
    assert_eq!(chunks[1].content, "Revenue grew in all regions.");
    assert_eq!(chunks[2].content, "Costs were flat quarter over quarter.");
}

#[test]
fn malformed_input_never_errors() {
    let chunker = DocumentChunker::new(chunker_config(100, 10)).unwrap();
    let inputs = [
        "",
        "   \n\t  ",
        "<table>unclosed table",
        "## Email not-a-number\nbody",
        "\u{0}\u{1}control chars",
    ];
    for (i, input) in inputs.iter().enumerate() {
        for strategy in [ChunkStrategy::Recursive, ChunkStrategy::Email, ChunkStrategy::Slide] {
            let result = chunker.chunk(input, &format!("doc-{}", i), strategy);
            assert!(result.is_ok(), "{:?} failed on input {}", strategy, i);
        }
    }
}

#[test]
fn chunk_metadata_serializes_for_storage() {
    let chunker = DocumentChunker::new(chunker_config(100, 0)).unwrap();
    let chunks = chunker
        .chunk("A sentence to store.", "doc", ChunkStrategy::Recursive)
        .unwrap();
    let json = serde_json::to_string(&chunks[0]).unwrap();
    let back: Chunk = serde_json::from_str(&json).unwrap();
    assert_eq!(back.content, chunks[0].content);
    assert_eq!(back.metadata.chunk_id, "doc_chunk_0");
    assert_eq!(back.metadata.chunk_type, ChunkType::Text);
}
