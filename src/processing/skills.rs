//! Vocabulary phrase matching over document tokens

use crate::error::{Result, ShortlistError};
use crate::processing::text_processor::{normalize_skill, tokenize};
use aho_corasick::{AhoCorasick, MatchKind};
use std::collections::{BTreeSet, HashMap, HashSet};

/// Matches a fixed skill vocabulary against documents.
///
/// Both the document and every phrase are reduced to a space-joined token
/// stream with a sentinel space on each side, so an automaton match always
/// starts and ends on token boundaries. Overlapping matches are reported,
/// which lets `machine learning` and `learning` both hit in the same span.
pub struct SkillMatcher {
    automaton: Option<AhoCorasick>,
    /// Normalized skills sharing each automaton pattern id
    pattern_skills: Vec<Vec<String>>,
    vocabulary: Vec<String>,
}

impl SkillMatcher {
    pub fn new<I, S>(vocabulary: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen_skills = HashSet::new();
        let mut pattern_ids: HashMap<String, usize> = HashMap::new();
        let mut skills = Vec::new();
        let mut patterns = Vec::new();
        let mut pattern_skills: Vec<Vec<String>> = Vec::new();

        for entry in vocabulary {
            let skill = normalize_skill(entry.as_ref());
            if skill.is_empty() || !seen_skills.insert(skill.clone()) {
                continue;
            }
            skills.push(skill.clone());

            let tokens = tokenize(&skill);
            if tokens.is_empty() {
                continue;
            }
            let pattern = format!(" {} ", tokens.join(" "));
            match pattern_ids.get(&pattern) {
                Some(&id) => pattern_skills[id].push(skill),
                None => {
                    pattern_ids.insert(pattern.clone(), patterns.len());
                    patterns.push(pattern);
                    pattern_skills.push(vec![skill]);
                }
            }
        }

        let automaton = if patterns.is_empty() {
            None
        } else {
            let built = AhoCorasick::builder()
                .match_kind(MatchKind::Standard)
                .build(&patterns)
                .map_err(|e| {
                    ShortlistError::Processing(format!("Failed to build skill matcher: {}", e))
                })?;
            Some(built)
        };

        Ok(Self {
            automaton,
            pattern_skills,
            vocabulary: skills,
        })
    }

    /// Matcher with no vocabulary; finds nothing
    pub fn empty() -> Self {
        Self {
            automaton: None,
            pattern_skills: Vec::new(),
            vocabulary: Vec::new(),
        }
    }

    /// Distinct vocabulary skills that occur in `text`, in normalized form
    pub fn find_skills(&self, text: &str) -> BTreeSet<String> {
        let Some(automaton) = &self.automaton else {
            return BTreeSet::new();
        };

        let haystack = format!(" {} ", tokenize(text).join(" "));
        automaton
            .find_overlapping_iter(&haystack)
            .flat_map(|mat| self.pattern_skills[mat.pattern().as_usize()].iter().cloned())
            .collect()
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    pub fn len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vocabulary.is_empty()
    }
}

impl Default for SkillMatcher {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(skills: &[&str]) -> SkillMatcher {
        SkillMatcher::new(skills.iter().copied()).unwrap()
    }

    #[test]
    fn test_empty_vocabulary_finds_nothing() {
        let matcher = SkillMatcher::empty();
        assert!(matcher.is_empty());
        assert!(matcher.find_skills("Python and SQL everywhere").is_empty());

        let blank = SkillMatcher::new(Vec::<String>::new()).unwrap();
        assert!(blank.find_skills("Python").is_empty());
    }

    #[test]
    fn test_case_insensitive_and_punctuation_adjacent() {
        let matcher = matcher(&["Python", "sql", "Node.js"]);
        let found = matcher.find_skills("Stack: PYTHON, SQL; node.js.");

        let expected: BTreeSet<String> = ["node.js", "python", "sql"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(found, expected);
    }

    #[test]
    fn test_whole_tokens_only() {
        let matcher = matcher(&["java", "r"]);
        let found = matcher.find_skills("JavaScript developer, React and Rust");
        assert!(found.is_empty());
    }

    #[test]
    fn test_multi_word_phrases_must_be_contiguous() {
        let matcher = matcher(&["machine learning", "learning"]);

        let found = matcher.find_skills("Applied Machine Learning research");
        assert!(found.contains("machine learning"));
        assert!(found.contains("learning"));

        let found = matcher.find_skills("machine vision and deep learning");
        assert!(!found.contains("machine learning"));
        assert!(found.contains("learning"));
    }

    #[test]
    fn test_repeated_mentions_count_once() {
        let matcher = matcher(&["excel"]);
        let found = matcher.find_skills("Excel, excel and more EXCEL");
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_matching_is_idempotent() {
        let matcher = matcher(&["python", "sql", "power bi", "c++"]);
        let text = "Reporting in Power BI; C++ and Python tooling";
        assert_eq!(matcher.find_skills(text), matcher.find_skills(text));
    }

    #[test]
    fn test_vocabulary_is_normalized_and_deduplicated() {
        let matcher = matcher(&["  Power   BI ", "power bi", "SQL", ""]);
        assert_eq!(matcher.vocabulary(), &["power bi".to_string(), "sql".to_string()]);
        assert_eq!(matcher.len(), 2);
    }

    #[test]
    fn test_skills_with_same_tokens_all_match() {
        let matcher = matcher(&["CI/CD", "CI CD"]);
        assert_eq!(matcher.len(), 2);

        let found = matcher.find_skills("Built CI/CD pipelines and CI CD tooling");
        let expected: BTreeSet<String> = ["ci cd", "ci/cd"].iter().map(|s| s.to_string()).collect();
        assert_eq!(found, expected);
    }
}
