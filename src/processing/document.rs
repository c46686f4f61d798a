//! Candidate profile extraction from a single document

use crate::processing::education::extract_education;
use crate::processing::experience::extract_experience;
use crate::processing::name::{NameResolver, NameSource};
use crate::processing::skills::SkillMatcher;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// Structured attributes recovered from one resume
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub file: String,
    pub name: String,
    pub education_level: f64,
    pub education_field: String,
    pub total_experience_years: f64,
    pub skills: BTreeSet<String>,
}

/// Composes the education, experience, skill and name extractors.
///
/// Holds no mutable state, so one parser can be shared across worker
/// threads behind an `Arc`.
#[derive(Default)]
pub struct DocumentParser {
    name_resolver: NameResolver,
}

impl DocumentParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name_resolver(name_resolver: NameResolver) -> Self {
        Self { name_resolver }
    }

    /// Parse the text of `file` into a profile, matching skills from `skills`
    pub fn parse(&self, file: &str, text: &str, skills: &SkillMatcher) -> CandidateProfile {
        let education = extract_education(text);
        let experience = extract_experience(text);
        let found_skills = skills.find_skills(text);

        let stem = Path::new(file)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.to_string());
        let resolved = self.name_resolver.resolve(text, &stem);
        if resolved.source == NameSource::Fallback {
            debug!("No name found in {}, using placeholder", file);
        } else {
            debug!("Name for {} resolved via {:?}", file, resolved.source);
        }

        CandidateProfile {
            file: file.to_string(),
            name: resolved.name,
            education_level: education.level,
            education_field: education.field,
            total_experience_years: experience,
            skills: found_skills,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "Jane Doe jane.doe@example.com\n\
        EDUCATION\n\
        Master of Science, Computer Science, 2012-2014\n\
        EXPERIENCE\n\
        Data Engineer, January 2015 to January 2020\n\
        SKILLS\n\
        Python, SQL, Airflow";

    #[test]
    fn test_parse_full_profile() {
        let parser = DocumentParser::new();
        let skills = SkillMatcher::new(["python", "sql", "spark"]).unwrap();

        let profile = parser.parse("jane_doe.txt", RESUME, &skills);

        assert_eq!(profile.file, "jane_doe.txt");
        assert_eq!(profile.name, "Jane Doe");
        assert_eq!(profile.education_level, 2.0);
        assert_eq!(profile.education_field, "computer science");
        assert_eq!(profile.total_experience_years, 5.0);
        assert_eq!(
            profile.skills.iter().cloned().collect::<Vec<_>>(),
            vec!["python".to_string(), "sql".to_string()]
        );
    }

    #[test]
    fn test_parse_without_vocabulary() {
        let parser = DocumentParser::new();
        let profile = parser.parse("0042.txt", "nothing useful", &SkillMatcher::empty());

        assert!(profile.skills.is_empty());
        assert_eq!(profile.name, "Unknown");
        assert_eq!(profile.education_level, 0.0);
        assert_eq!(profile.total_experience_years, 0.0);
    }

    #[test]
    fn test_parse_uses_file_stem_for_name() {
        let parser = DocumentParser::new();
        let profile = parser.parse("cv_tom_hanssen.md", "no header here", &SkillMatcher::empty());
        assert_eq!(profile.name, "tom hanssen");
    }

    #[test]
    fn test_profile_serializes_sorted_skills() {
        let parser = DocumentParser::new();
        let skills = SkillMatcher::new(["sql", "airflow", "python"]).unwrap();
        let profile = parser.parse("jane_doe.txt", RESUME, &skills);

        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["skills"], serde_json::json!(["airflow", "python", "sql"]));
        assert_eq!(json["name"], "Jane Doe");
    }
}
