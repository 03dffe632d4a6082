//! Table protection: HTML `<table>` spans are atomic and must never be
//! split across chunks. Before sentence/word splitting they are swapped for
//! sentinel placeholders, then restored verbatim afterwards.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

static TABLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<table.*?</table>").expect("Invalid regex"));

static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^__TABLE_PLACEHOLDER_\d+__$").expect("Invalid regex"));

/// Holds the placeholder -> original table mapping for one protect/restore
/// cycle.
#[derive(Debug, Default)]
pub struct TableGuard {
    tables: HashMap<String, String>,
}

impl TableGuard {
    /// Replace every `<table>...</table>` span (non-greedy, multi-line) with
    /// a unique `__TABLE_PLACEHOLDER_i__` sentinel, recording the mapping.
    pub fn protect(text: &str) -> (String, Self) {
        let mut tables = HashMap::new();
        let mut index = 0;
        let protected = TABLE_RE
            .replace_all(text, |caps: &regex::Captures<'_>| {
                let placeholder = format!("__TABLE_PLACEHOLDER_{}__", index);
                tables.insert(placeholder.clone(), caps[0].to_string());
                index += 1;
                placeholder
            })
            .into_owned();
        (protected, Self { tables })
    }

    /// True when `text` is exactly one table placeholder
    pub fn is_placeholder(text: &str) -> bool {
        PLACEHOLDER_RE.is_match(text)
    }

    /// Look up the original table for a placeholder
    pub fn get(&self, placeholder: &str) -> Option<&str> {
        self.tables.get(placeholder).map(String::as_str)
    }

    /// Restore a piece of text: a lone placeholder becomes its table again,
    /// anything else passes through unchanged.
    pub fn restore_unit(&self, text: &str) -> String {
        match self.tables.get(text.trim()) {
            Some(table) => table.clone(),
            None => text.to_string(),
        }
    }

    /// Number of protected tables
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// True when no tables were found
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
