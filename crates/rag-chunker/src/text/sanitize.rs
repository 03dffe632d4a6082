//! Email-address removal applied before measuring and chunking, so token
//! budgets are computed on the cleaned text.

use once_cell::sync::Lazy;
use regex::Regex;

const EMAIL_ADDR: &str = r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}";

static MAILTO_LINK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"\[{addr}\]\(mailto:{addr}\)", addr = EMAIL_ADDR)).expect("Invalid regex")
});

static ANGLE_ADDR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("<{}>", EMAIL_ADDR)).expect("Invalid regex"));

static PLAIN_ADDR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"\b{}\b", EMAIL_ADDR)).expect("Invalid regex"));

static MULTI_SPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r" +").expect("Invalid regex"));
static DOUBLE_PUNCT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*[,;]\s*[,;]+").expect("Invalid regex"));
static COLON_COMMA_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r":\s*,").expect("Invalid regex"));

/// Strip every email address (Markdown mailto links, angle-bracketed, and
/// plain) while preserving line structure, then collapse the doubled
/// punctuation and stray spaces the removal leaves behind.
pub fn remove_email_addresses(text: &str) -> String {
    let text = MAILTO_LINK_RE.replace_all(text, "");
    let text = ANGLE_ADDR_RE.replace_all(&text, "");
    let text = PLAIN_ADDR_RE.replace_all(&text, "");

    let cleaned: Vec<String> = text
        .split('\n')
        .map(|line| {
            let line = MULTI_SPACE_RE.replace_all(line, " ");
            let line = DOUBLE_PUNCT_RE.replace_all(&line, ",");
            let line = COLON_COMMA_RE.replace_all(&line, ":");
            line.trim().to_string()
        })
        .collect();
    cleaned.join("\n")
}
