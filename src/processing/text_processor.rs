//! Text normalization and tokenization shared by the extractors

use regex::Regex;
use std::sync::OnceLock;
use unicode_segmentation::UnicodeSegmentation;

/// Characters that separate tokens in addition to whitespace
const TOKEN_SEPARATORS: &[char] = &[
    '/', '|', ',', ';', '(', ')', '[', ']', '{', '}', '<', '>', '"', '•', '·',
];

/// Punctuation trimmed from both ends of a token
const EDGE_PUNCTUATION: &[char] = &[
    '.', ':', '!', '?', '\'', '`', '*', '-', '–', '—', '\u{2018}', '\u{2019}', '\u{201C}',
    '\u{201D}',
];

fn whitespace_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("Invalid whitespace regex"))
}

/// Collapse runs of whitespace to a single space and trim the ends
pub fn normalize_whitespace(text: &str) -> String {
    whitespace_regex().replace_all(text, " ").trim().to_string()
}

/// Canonical form of a skill phrase: lowercase, single-spaced, trimmed
pub fn normalize_skill(skill: &str) -> String {
    normalize_whitespace(&skill.to_lowercase())
}

/// Lowercase tokens used for phrase matching.
///
/// Documents and vocabulary phrases must both go through this function so
/// that `Python,` in a document still lines up with the phrase `python`.
/// Inner punctuation survives (`node.js`, `c++`, `c#`), edge punctuation
/// does not.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| c.is_whitespace() || TOKEN_SEPARATORS.contains(&c))
        .map(|raw| raw.trim_matches(EDGE_PUNCTUATION))
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// The first `limit` non-blank lines, trimmed
pub fn header_lines(text: &str, limit: usize) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(limit)
        .collect()
}

/// Unicode words of a line together with their byte offsets
pub fn word_spans(line: &str) -> Vec<(usize, &str)> {
    line.unicode_word_indices().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_strips_edge_punctuation() {
        let tokens = tokenize("Skills: Python, SQL; (Docker) and Node.js.");
        assert_eq!(
            tokens,
            vec!["skills", "python", "sql", "docker", "and", "node.js"]
        );
    }

    #[test]
    fn test_tokenize_keeps_language_symbols() {
        let tokens = tokenize("C++/C# and .NET");
        assert_eq!(tokens, vec!["c++", "c#", "and", "net"]);
    }

    #[test]
    fn test_normalize_skill() {
        assert_eq!(normalize_skill("  Machine   Learning "), "machine learning");
        assert_eq!(normalize_skill("SQL"), "sql");
    }

    #[test]
    fn test_header_lines_skip_blank() {
        let text = "\n\n  Jane Doe  \n\nData Analyst\nLine three\nfour\nfive\nsix";
        let lines = header_lines(text, 5);
        assert_eq!(lines, vec!["Jane Doe", "Data Analyst", "Line three", "four", "five"]);
    }

    #[test]
    fn test_word_spans_offsets() {
        let spans = word_spans("Jane O'Neil, PhD");
        assert_eq!(spans[0], (0, "Jane"));
        assert_eq!(spans[1], (5, "O'Neil"));
        assert_eq!(spans[2].1, "PhD");
    }
}
