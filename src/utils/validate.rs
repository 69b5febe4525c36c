use regex::Regex;
use std::sync::LazyLock;

/// Structural header grammar: `>`, two letters, `_`, digits, `.`, free text.
static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^>[A-Za-z]{2}_[0-9]+\..+").expect("header grammar is a valid regex")
});

/// Strict identifier token grammar, e.g. `NR_118889.1`.
static IDENTIFIER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z]{2}_[0-9]+\.[0-9]+").expect("identifier grammar is a valid regex")
});

/// Check whether a line satisfies the header grammar
pub fn is_header_line(line: &str) -> bool {
    HEADER_RE.is_match(line)
}

/// Check whether a character belongs to the body alphabet (`A-Z`, `a-z`)
#[inline]
pub fn is_body_symbol(ch: char) -> bool {
    ch.is_ascii_alphabetic()
}

/// Check a whole body line, returning the first offending character
pub fn first_invalid_symbol(body: &str) -> Option<char> {
    body.chars().find(|&c| !is_body_symbol(c))
}

/// Extract every identifier token from a piece of text, in order of appearance.
///
/// Only tokens of the strict shape (`AB_123.4`) are returned; duplicates are kept.
pub fn extract_identifiers(text: &str) -> Vec<String> {
    identifier_spans(text)
        .map(|(start, end)| text[start..end].to_string())
        .collect()
}

/// Byte spans of identifier tokens within `text`
pub fn identifier_spans(text: &str) -> impl Iterator<Item = (usize, usize)> + '_ {
    IDENTIFIER_RE.find_iter(text).map(|m| (m.start(), m.end()))
}
