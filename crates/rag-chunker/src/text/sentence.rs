//! Sentence splitting over mixed CJK/Latin prose.
//!
//! Recognized units: table placeholders (passed through unsplit), runs of
//! text ending in a CJK (。！？；) or Latin (. ! ? ;) terminator, blank-line
//! paragraph breaks, and `###` heading lines. Text between recognized units
//! (for example a trailing clause with no terminator) is kept as its own
//! unit so no content is ever dropped.

use once_cell::sync::Lazy;
use regex::Regex;

static SENTENCE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^。！？；.!?;\n]+[。！？；.!?;]+|\n\n|###[^\n]+\n").expect("Invalid regex")
});

static INLINE_PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"__TABLE_PLACEHOLDER_\d+__").expect("Invalid regex"));

/// Split a text block into ordered sentence-like units.
///
/// If no unit boundary is found at all, the input is returned whole as a
/// single unit -- the caller's budget logic handles the oversized case.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut units = Vec::new();

    // Placeholders are carved out first so a table can never end up glued
    // into a surrounding sentence run.
    let mut last_end = 0;
    for m in INLINE_PLACEHOLDER_RE.find_iter(text) {
        split_prose(&text[last_end..m.start()], &mut units);
        units.push(m.as_str().to_string());
        last_end = m.end();
    }
    split_prose(&text[last_end..], &mut units);

    if units.is_empty() && !text.trim().is_empty() {
        // single run-on without any boundary
        units.push(text.to_string());
    }

    units
}

fn split_prose(text: &str, units: &mut Vec<String>) {
    let mut last_end = 0;
    for m in SENTENCE_RE.find_iter(text) {
        // keep any non-whitespace gap between recognized units
        let gap = &text[last_end..m.start()];
        if !gap.trim().is_empty() {
            units.push(gap.to_string());
        }
        units.push(m.as_str().to_string());
        last_end = m.end();
    }
    let tail = &text[last_end..];
    if !tail.trim().is_empty() {
        units.push(tail.to_string());
    }
}
