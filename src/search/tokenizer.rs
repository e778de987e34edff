use regex::Regex;
use std::sync::LazyLock;

static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,\s]+").expect("separator pattern is valid"));

/// Splits a raw ingredient query on runs of commas and whitespace.
///
/// Tokens keep their original case and order; empty tokens are dropped.
pub fn tokenize_query(query: &str) -> Vec<String> {
    SEPARATORS
        .split(query)
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_string)
        .collect()
}
