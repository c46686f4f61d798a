//! Education level and field detection

use serde::{Deserialize, Serialize};

/// Level keywords and their ordinal value on the education scale
pub const EDUCATION_LEVELS: [(&str, f64); 5] = [
    ("high school", 0.0),
    ("associate", 0.5),
    ("bachelor", 1.0),
    ("master", 2.0),
    ("doctor", 3.0),
];

/// Recognized fields of study. Detection is first match in this order,
/// so "engineering" shadows the more specific engineering fields.
pub const EDUCATION_FIELDS: [&str; 13] = [
    "architecture",
    "engineering",
    "computer science",
    "informatics",
    "design",
    "civil engineering",
    "electrical engineering",
    "business",
    "psychology",
    "accounting",
    "law",
    "economics",
    "information systems",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationInfo {
    pub level: f64,
    pub field: String,
}

pub fn extract_education(text: &str) -> EducationInfo {
    let text_lower = text.to_lowercase();

    EducationInfo {
        level: level_from_lowercase(&text_lower),
        field: field_from_lowercase(&text_lower).unwrap_or_default(),
    }
}

/// Highest level whose keyword appears anywhere in already-lowercased text
pub(crate) fn level_from_lowercase(text_lower: &str) -> f64 {
    EDUCATION_LEVELS
        .iter()
        .filter(|(keyword, _)| text_lower.contains(keyword))
        .map(|(_, value)| *value)
        .fold(0.0, f64::max)
}

fn field_from_lowercase(text_lower: &str) -> Option<String> {
    EDUCATION_FIELDS
        .iter()
        .find(|field| text_lower.contains(*field))
        .map(|field| field.to_string())
}

pub fn is_valid_level(level: f64) -> bool {
    EDUCATION_LEVELS.iter().any(|(_, value)| *value == level)
}

pub fn level_label(level: f64) -> &'static str {
    match EDUCATION_LEVELS.iter().find(|(_, value)| *value == level) {
        Some((keyword, _)) => keyword,
        None => "unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_keywords() {
        let info = extract_education("Worked ten years as a welder in Rotterdam.");
        assert_eq!(info.level, 0.0);
        assert_eq!(info.field, "");
    }

    #[test]
    fn test_highest_level_wins_regardless_of_order() {
        let doctor_first = extract_education("Doctor of Philosophy. Earlier: Bachelor of Arts.");
        let bachelor_first = extract_education("Bachelor of Arts, later Doctorate in Physics");
        assert_eq!(doctor_first.level, 3.0);
        assert_eq!(bachelor_first.level, 3.0);
    }

    #[test]
    fn test_case_insensitive_level() {
        assert_eq!(extract_education("MASTER OF SCIENCE").level, 2.0);
        assert_eq!(extract_education("Associate degree").level, 0.5);
    }

    #[test]
    fn test_field_is_first_match_in_list_order() {
        // "civil engineering" contains "engineering", which comes first
        let info = extract_education("BSc Civil Engineering, minor in Computer Science");
        assert_eq!(info.field, "engineering");

        let info = extract_education("Master in Economics and Law");
        assert_eq!(info.field, "law");
    }

    #[test]
    fn test_level_validation_and_labels() {
        assert!(is_valid_level(0.5));
        assert!(is_valid_level(3.0));
        assert!(!is_valid_level(1.5));
        assert_eq!(level_label(2.0), "master");
        assert_eq!(level_label(4.0), "unknown");
    }
}
