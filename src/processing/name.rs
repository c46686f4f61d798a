//! Candidate display-name recovery

use crate::processing::text_processor::{header_lines, normalize_whitespace, word_spans};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

pub const UNKNOWN_NAME: &str = "Unknown";

const HEADER_LINE_LIMIT: usize = 5;
const MAX_NAME_WORDS: usize = 3;

/// Words that look capitalized in a resume header but never belong to a name
const NON_NAME_WORDS: &[&str] = &[
    "about", "address", "analyst", "architect", "backend", "bachelor", "career", "college",
    "consultant", "contact", "curriculum", "cv", "data", "designer", "details", "developer",
    "director", "doctor", "education", "email", "employment", "engineer", "experience",
    "frontend", "full", "github", "history", "information", "institute", "intern", "junior",
    "languages", "lead", "linkedin", "manager", "master", "me", "mobile", "objective",
    "personal", "phone", "portfolio", "professional", "profile", "projects", "references",
    "resume", "résumé", "school", "scientist", "senior", "skills", "software", "specialist",
    "stack", "street", "summary", "technical", "university", "vitae", "web", "work",
];

fn email_prefix_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*(.+?)\s+[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}")
            .expect("Invalid email regex")
    })
}

fn filename_separator_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\s_-]+").expect("Invalid separator regex"))
}

fn filename_noise_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\b(cv|resume|résumé|curriculum vitae|sample)\b")
            .expect("Invalid filename noise regex")
    })
}

fn digits_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+").expect("Invalid digits regex"))
}

/// Finds spans of a line that name a person.
pub trait PersonNameRecognizer: Send + Sync {
    fn person_spans(&self, line: &str) -> Vec<String>;
}

/// Treats runs of two or more capitalized words as a person's name.
///
/// Words may be joined by spaces, hyphens or periods (`Mary-Jane`,
/// `John A. Smith`). Common resume vocabulary breaks a run, so
/// `John Smith Software Engineer` yields `John Smith`.
#[derive(Debug, Default, Clone, Copy)]
pub struct CapitalizedRunRecognizer;

impl CapitalizedRunRecognizer {
    fn is_name_word(word: &str) -> bool {
        let starts_upper = word.chars().next().is_some_and(char::is_uppercase);
        starts_upper
            && word.chars().all(|c| c.is_alphabetic() || c == '\'')
            && !NON_NAME_WORDS.contains(&word.to_lowercase().as_str())
    }

    fn is_joiner(gap: &str) -> bool {
        gap.chars()
            .all(|c| c.is_whitespace() || c == '-' || c == '.')
    }
}

impl PersonNameRecognizer for CapitalizedRunRecognizer {
    fn person_spans(&self, line: &str) -> Vec<String> {
        let mut spans = Vec::new();
        let mut run: Vec<(usize, usize)> = Vec::new();

        let mut flush = |run: &mut Vec<(usize, usize)>| {
            if run.len() >= 2 {
                let start = run[0].0;
                let end = run[run.len() - 1].1;
                spans.push(line[start..end].to_string());
            }
            run.clear();
        };

        for (offset, word) in word_spans(line) {
            let end = offset + word.len();
            if !Self::is_name_word(word) {
                flush(&mut run);
                continue;
            }
            let separated = run
                .last()
                .is_some_and(|&(_, prev_end)| !Self::is_joiner(&line[prev_end..offset]));
            if separated {
                flush(&mut run);
            }
            run.push((offset, end));
        }
        flush(&mut run);

        spans
    }
}

/// Which heuristic produced a name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameSource {
    EmailAdjacent,
    HeaderEntity,
    Filename,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedName {
    pub name: String,
    pub source: NameSource,
}

/// Strategies in the order they are tried
const STRATEGY_ORDER: [NameSource; 3] = [
    NameSource::EmailAdjacent,
    NameSource::HeaderEntity,
    NameSource::Filename,
];

pub struct NameResolver {
    recognizer: Box<dyn PersonNameRecognizer>,
}

impl NameResolver {
    pub fn new() -> Self {
        Self::with_recognizer(Box::new(CapitalizedRunRecognizer))
    }

    pub fn with_recognizer(recognizer: Box<dyn PersonNameRecognizer>) -> Self {
        Self { recognizer }
    }

    /// Resolve a display name from document text and the file stem
    pub fn resolve(&self, text: &str, file_stem: &str) -> ResolvedName {
        STRATEGY_ORDER
            .iter()
            .find_map(|source| {
                self.run_strategy(*source, text, file_stem)
                    .map(|name| ResolvedName {
                        name,
                        source: *source,
                    })
            })
            .unwrap_or_else(|| ResolvedName {
                name: UNKNOWN_NAME.to_string(),
                source: NameSource::Fallback,
            })
    }

    fn run_strategy(&self, source: NameSource, text: &str, file_stem: &str) -> Option<String> {
        match source {
            NameSource::EmailAdjacent => from_email_line(text),
            NameSource::HeaderEntity => self.from_header_entities(text),
            NameSource::Filename => from_file_stem(file_stem),
            NameSource::Fallback => None,
        }
    }

    fn from_header_entities(&self, text: &str) -> Option<String> {
        header_lines(text, HEADER_LINE_LIMIT)
            .into_iter()
            .flat_map(|line| self.recognizer.person_spans(line))
            .filter(|span| span.trim().chars().count() >= 2)
            .find_map(|span| sanitize_name(span.trim()))
    }
}

impl Default for NameResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Text directly preceding an email address on the same line
fn from_email_line(text: &str) -> Option<String> {
    text.lines().find_map(|line| {
        let caps = email_prefix_regex().captures(line)?;
        let raw = caps.get(1)?.as_str().trim();
        if raw.chars().count() < 2 {
            return None;
        }
        sanitize_name(raw)
    })
}

fn from_file_stem(stem: &str) -> Option<String> {
    let spaced = filename_separator_regex().replace_all(stem, " ");
    let without_noise = filename_noise_regex().replace_all(spaced.trim(), "");
    let without_digits = digits_regex().replace_all(&without_noise, "");

    sanitize_name(&normalize_whitespace(&without_digits)).or_else(|| sanitize_name(stem))
}

/// Reduce a raw candidate to a plausible display name.
///
/// Drops every digit, then keeps only letters, whitespace and `'-.`,
/// collapses whitespace and keeps the first three words. Returns `None`
/// when nothing alphabetic survives.
pub fn sanitize_name(raw: &str) -> Option<String> {
    let without_digits = digits_regex().replace_all(raw, "");
    let kept: String = without_digits
        .chars()
        .filter(|c| c.is_alphabetic() || c.is_whitespace() || "'-.".contains(*c))
        .collect();

    let limited = normalize_whitespace(&kept)
        .split(' ')
        .filter(|word| !word.is_empty())
        .take(MAX_NAME_WORDS)
        .collect::<Vec<_>>()
        .join(" ");

    if limited.chars().any(char::is_alphabetic) {
        Some(limited)
    } else {
        None
    }
}
