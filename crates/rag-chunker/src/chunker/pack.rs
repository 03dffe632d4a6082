//! Greedy sentence packing shared by the structural chunkers.

use crate::length::LengthMeasure;
use crate::text::{split_sentences, TableGuard};

/// Pack a structural unit's body into pieces under `chunk_size`.
///
/// Tables are placeholder-protected before sentence splitting and restored
/// afterwards, so a table is always atomic: it lands whole in a piece even
/// when that piece then exceeds the budget. A single oversized prose
/// sentence degrades to word packing instead.
pub fn pack_sentences(text: &str, chunk_size: usize, length: &LengthMeasure) -> Vec<String> {
    let (masked, guard) = TableGuard::protect(text);
    let sentences = split_sentences(&masked);

    let mut pieces: Vec<String> = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut current_len = 0usize;

    let flush = |current: &mut Vec<String>, pieces: &mut Vec<String>| {
        if !current.is_empty() {
            let joined = current.join("\n");
            let trimmed = joined.trim();
            if !trimmed.is_empty() {
                pieces.push(trimmed.to_string());
            }
            current.clear();
        }
    };

    for sentence in sentences {
        let restored = guard.restore_unit(&sentence);
        let len = length.measure(&restored);
        let joiner = if current.is_empty() { 0 } else { 1 };

        if current_len + len + joiner > chunk_size && !current.is_empty() {
            flush(&mut current, &mut pieces);
            current_len = 0;
        }

        if len > chunk_size {
            flush(&mut current, &mut pieces);
            current_len = 0;
            if TableGuard::is_placeholder(sentence.trim()) {
                // atomic: never split a table, even over budget
                pieces.push(restored);
            } else {
                pieces.extend(pack_words(&restored, chunk_size, length));
            }
            continue;
        }

        current_len += len + joiner;
        current.push(restored);
    }
    flush(&mut current, &mut pieces);
    pieces
}

/// Word-level fallback for a single sentence that exceeds the budget
fn pack_words(sentence: &str, chunk_size: usize, length: &LengthMeasure) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_len = 0usize;

    for word in sentence.split_whitespace() {
        let len = length.measure(word);
        let joiner = if current.is_empty() { 0 } else { 1 };
        if current_len + len + joiner > chunk_size && !current.is_empty() {
            pieces.push(current.join(" "));
            current.clear();
            current_len = 0;
        }
        current_len += len + if current.is_empty() { 0 } else { 1 };
        current.push(word);
    }
    if !current.is_empty() {
        pieces.push(current.join(" "));
    }
    pieces
}
