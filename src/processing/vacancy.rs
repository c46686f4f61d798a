//! Vacancy requirements: heuristic parsing and validation of external input

use crate::error::{Result, ShortlistError};
use crate::processing::education::{is_valid_level, level_from_lowercase};
use crate::processing::text_processor::normalize_skill;
use log::{debug, info};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::sync::OnceLock;

/// What a run ranks candidates against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VacancyRequirements {
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub nice_to_have_skills: Vec<String>,
    pub required_education_level: f64,
    #[serde(default)]
    pub required_education_field: String,
    pub minimum_years_experience: f64,
}

/// Section names that end a skill list in a vacancy text
const KNOWN_HEADINGS: &[&str] = &[
    "about the company",
    "about the role",
    "about us",
    "benefits",
    "compensation",
    "description",
    "duties",
    "education",
    "experience",
    "how to apply",
    "job description",
    "key responsibilities",
    "location",
    "perks",
    "qualifications",
    "requirements",
    "responsibilities",
    "salary",
    "what we offer",
];

/// Lines ending in ':' with at most this many words are treated as headings
const MAX_HEADING_WORDS: usize = 4;

const BULLET_CHARS: &[char] = &['-', '*', '•', '·', '–', '—', '+', '>'];

fn years_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+)\+?\s*(?:years|yrs)[^a-z]").expect("Invalid years regex"))
}

fn list_separator_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[,;]").expect("Invalid separator regex"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SkillList {
    Required,
    NiceToHave,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Heading {
    Skills(SkillList),
    Other,
}

impl VacancyRequirements {
    /// Parse and validate the JSON produced by an external requirements parser
    pub fn from_json_str(json: &str) -> Result<Self> {
        let parsed: VacancyRequirements = serde_json::from_str(json)
            .map_err(|e| ShortlistError::InvalidVacancy(format!("malformed document: {}", e)))?;
        let normalized = parsed.normalized();
        normalized.validate()?;
        Ok(normalized)
    }

    pub async fn load_json(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            ShortlistError::InvalidVacancy(format!("cannot read '{}': {}", path.display(), e))
        })?;
        let requirements = Self::from_json_str(&content)?;
        info!(
            "Loaded vacancy requirements from {} ({} required, {} nice-to-have skills)",
            path.display(),
            requirements.required_skills.len(),
            requirements.nice_to_have_skills.len()
        );
        Ok(requirements)
    }

    pub fn validate(&self) -> Result<()> {
        if !is_valid_level(self.required_education_level) {
            return Err(ShortlistError::InvalidVacancy(format!(
                "required_education_level {} is not one of 0, 0.5, 1, 2, 3",
                self.required_education_level
            )));
        }
        if !self.minimum_years_experience.is_finite() || self.minimum_years_experience < 0.0 {
            return Err(ShortlistError::InvalidVacancy(format!(
                "minimum_years_experience must be a non-negative number, got {}",
                self.minimum_years_experience
            )));
        }
        Ok(())
    }

    /// Lowercased, de-duplicated skill lists; a skill listed as required is
    /// not repeated among the nice-to-haves
    pub fn normalized(self) -> Self {
        let required_skills = dedup_skills(&self.required_skills, &HashSet::new());
        let required_set: HashSet<String> = required_skills.iter().cloned().collect();
        let nice_to_have_skills = dedup_skills(&self.nice_to_have_skills, &required_set);

        Self {
            required_skills,
            nice_to_have_skills,
            required_education_field: self.required_education_field.trim().to_lowercase(),
            ..self
        }
    }

    /// Required skills followed by nice-to-have skills
    pub fn all_skills(&self) -> impl Iterator<Item = &String> {
        self.required_skills
            .iter()
            .chain(self.nice_to_have_skills.iter())
    }
}

fn dedup_skills(skills: &[String], exclude: &HashSet<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    skills
        .iter()
        .map(|skill| normalize_skill(skill))
        .filter(|skill| !skill.is_empty() && !exclude.contains(skill))
        .filter(|skill| seen.insert(skill.clone()))
        .collect()
}

/// Derive requirements from a free-text vacancy
pub fn parse_vacancy_text(text: &str) -> VacancyRequirements {
    let text_lower = text.to_lowercase();

    let minimum_years_experience = years_regex()
        .captures(&text_lower)
        .and_then(|caps| caps[1].parse::<f64>().ok())
        .unwrap_or(0.0);

    let mut required = Vec::new();
    let mut nice_to_have = Vec::new();
    let mut current: Option<SkillList> = None;

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        match classify_heading(trimmed) {
            Some(Heading::Skills(list)) => {
                current = Some(list);
                // "Required skills: Python, SQL" carries items on the heading line
                if let Some((_, rest)) = trimmed.split_once(':') {
                    push_items(rest, list, &mut required, &mut nice_to_have);
                }
            }
            Some(Heading::Other) => current = None,
            None => {
                if let Some(list) = current {
                    push_items(trimmed, list, &mut required, &mut nice_to_have);
                }
            }
        }
    }

    debug!(
        "Vacancy text parsed: {} required, {} nice-to-have, {} years minimum",
        required.len(),
        nice_to_have.len(),
        minimum_years_experience
    );

    VacancyRequirements {
        required_skills: required,
        nice_to_have_skills: nice_to_have,
        required_education_level: level_from_lowercase(&text_lower),
        required_education_field: String::new(),
        minimum_years_experience,
    }
    .normalized()
}

fn classify_heading(line: &str) -> Option<Heading> {
    let lower = line.to_lowercase();

    if lower.contains("required skills") {
        return Some(Heading::Skills(SkillList::Required));
    }
    if lower.contains("nice to have") || lower.contains("preferred skills") {
        return Some(Heading::Skills(SkillList::NiceToHave));
    }

    let bare = lower
        .trim_start_matches(BULLET_CHARS)
        .trim()
        .trim_end_matches(':')
        .trim();
    if KNOWN_HEADINGS.contains(&bare) {
        return Some(Heading::Other);
    }
    if lower.ends_with(':') && bare.split_whitespace().count() <= MAX_HEADING_WORDS {
        return Some(Heading::Other);
    }

    None
}

fn push_items(
    line: &str,
    list: SkillList,
    required: &mut Vec<String>,
    nice_to_have: &mut Vec<String>,
) {
    let target = match list {
        SkillList::Required => required,
        SkillList::NiceToHave => nice_to_have,
    };

    let content = line.trim().trim_start_matches(BULLET_CHARS);
    target.extend(
        list_separator_regex()
            .split(content)
            .map(|item| item.trim().trim_end_matches('.').trim())
            .filter(|item| !item.is_empty())
            .map(str::to_string),
    );
}
