//! Structural boundary detection over parser-produced Markdown.
//!
//! Slide decks carry `## Slide N` markers; email threads carry `## Email N`
//! markers inserted by the parsing collaborator. Older email exports have no
//! markers, so a legacy table-driven header scan (English, Simplified
//! Chinese, Traditional Chinese) is kept as the fallback. Marker-less input
//! is never an error: the whole text becomes one unit.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::StructuralUnit;

static SLIDE_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^## Slide (\d+)\s*$").expect("Invalid regex"));

static EMAIL_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^## Email (\d+)\s*$").expect("Invalid regex"));

/// Legacy email header patterns, one per language variant, tried in order.
/// Each matches the three header fields that open a quoted message.
static EMAIL_HEADER_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    vec![
        (
            "en",
            Regex::new(r"(?m)^\*\*From:\*\*.*\n\*\*Sent:\*\*.*\n\*\*To:\*\*.*$")
                .expect("Invalid regex"),
        ),
        (
            "zh-hans",
            Regex::new(r"(?m)^\*\*发件人\*\*.*\n\*\*(?:发送时间|已发送)\s*\*\*.*\n\*\*收件人\s*\*\*.*$")
                .expect("Invalid regex"),
        ),
        (
            "zh-hant",
            Regex::new(r"(?m)^\*\*寄件[者人]\*\*.*\n\*\*寄件日期\*\*.*\n\*\*收件[者人]\s*\*\*.*$")
                .expect("Invalid regex"),
        ),
    ]
});

/// Horizontal-rule separators (`---`, `* * *`, `___`) left dangling at unit
/// edges after splitting.
static LEADING_RULE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-*_\s]+\n").expect("Invalid regex"));
static TRAILING_RULE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n[-*_\s]+$").expect("Invalid regex"));

/// Split slide-deck Markdown into whole-slide units.
///
/// Content preceding the first `## Slide N` marker becomes unit 0 (the file
/// header/preamble). Without any marker the whole input is one unit.
pub fn split_slides(markdown: &str) -> Vec<StructuralUnit> {
    split_by_markers(markdown, &SLIDE_MARKER_RE)
}

/// Split email-thread Markdown into whole-message units.
///
/// `## Email N` markers are authoritative when present; otherwise the legacy
/// header scan across three language variants takes over. Without any
/// detected boundary the whole input is one unit.
pub fn split_emails(markdown: &str) -> Vec<StructuralUnit> {
    if EMAIL_MARKER_RE.is_match(markdown) {
        return split_by_markers(markdown, &EMAIL_MARKER_RE);
    }
    split_by_headers(markdown)
}

/// Marker lines themselves are scaffolding inserted upstream; unit content
/// is the body between a marker and the next one, with the marker's number
/// preserved on the unit.
fn split_by_markers(markdown: &str, marker: &Regex) -> Vec<StructuralUnit> {
    let positions: Vec<(usize, usize, usize)> = marker
        .captures_iter(markdown)
        .filter_map(|caps| {
            let m = caps.get(0)?;
            let number = caps.get(1)?.as_str().parse().ok()?;
            Some((m.start(), m.end(), number))
        })
        .collect();

    if positions.is_empty() {
        tracing::debug!("No structural markers found, treating input as one unit");
        return vec![StructuralUnit::new(0, markdown)];
    }

    let mut units = Vec::with_capacity(positions.len() + 1);

    // preamble before the first marker
    let preamble = markdown[..positions[0].0].trim();
    if !preamble.is_empty() {
        units.push(StructuralUnit::new(0, preamble));
    }

    for (i, &(_, body_start, number)) in positions.iter().enumerate() {
        let end = positions
            .get(i + 1)
            .map(|&(next, _, _)| next)
            .unwrap_or(markdown.len());
        let content = markdown[body_start..end].trim();
        if !content.is_empty() {
            units.push(StructuralUnit::new(number, content));
        }
    }

    units
}

fn split_by_headers(markdown: &str) -> Vec<StructuralUnit> {
    let mut positions: Vec<usize> = Vec::new();
    for (language, pattern) in EMAIL_HEADER_PATTERNS.iter() {
        for m in pattern.find_iter(markdown) {
            tracing::debug!("Matched {} email header at offset {}", language, m.start());
            positions.push(m.start());
        }
    }
    positions.sort_unstable();
    positions.dedup();

    if positions.is_empty() {
        return vec![StructuralUnit::new(0, markdown)];
    }

    let mut units = Vec::with_capacity(positions.len() + 1);

    let first = trim_rules(markdown[..positions[0]].trim());
    if !first.is_empty() {
        units.push(StructuralUnit::new(0, first));
    }

    for (i, &start) in positions.iter().enumerate() {
        let end = positions.get(i + 1).copied().unwrap_or(markdown.len());
        let content = trim_rules(markdown[start..end].trim());
        if !content.is_empty() {
            units.push(StructuralUnit::new(i + 1, content));
        }
    }

    // a lone pseudo-boundary usually means a simple single message
    if units.len() <= 1 {
        return vec![StructuralUnit::new(0, markdown)];
    }

    units
}

fn trim_rules(text: &str) -> String {
    let text = LEADING_RULE_RE.replace(text, "");
    TRAILING_RULE_RE.replace(&text, "").into_owned()
}
