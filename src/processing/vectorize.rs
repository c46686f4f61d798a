//! Fixed-schema feature vectors over the vacancy vocabulary

use crate::processing::document::CandidateProfile;
use crate::processing::text_processor::normalize_skill;
use crate::processing::vacancy::VacancyRequirements;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

pub const REQUIRED_WEIGHT: f64 = 1.0;
pub const NICE_TO_HAVE_WEIGHT: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// One entry per vocabulary skill
    pub skill_vector: BTreeMap<String, f64>,
    pub experience_years: f64,
    pub education_level: f64,
    pub education_field: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateVector {
    pub file: String,
    pub name: String,
    #[serde(flatten)]
    pub features: FeatureVector,
}

/// Everything the scorer needs, persisted as `vectors.json` for inspection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorSet {
    pub vocabulary: Vec<String>,
    pub candidates: Vec<CandidateVector>,
    pub vacancy: FeatureVector,
}

pub struct VectorBuilder {
    vocabulary: BTreeSet<String>,
}

impl VectorBuilder {
    /// The vocabulary is the union of required and nice-to-have skills
    pub fn from_vacancy(vacancy: &VacancyRequirements) -> Self {
        let vocabulary = vacancy
            .all_skills()
            .map(|skill| normalize_skill(skill))
            .filter(|skill| !skill.is_empty())
            .collect();
        Self { vocabulary }
    }

    pub fn vocabulary(&self) -> &BTreeSet<String> {
        &self.vocabulary
    }

    /// Presence vector: 1 for a vocabulary skill the candidate has, else 0.
    /// Candidate skills outside the vocabulary are dropped.
    pub fn candidate_vector(&self, profile: &CandidateProfile) -> CandidateVector {
        let owned: BTreeSet<String> = profile.skills.iter().map(|s| normalize_skill(s)).collect();
        let skill_vector = self
            .vocabulary
            .iter()
            .map(|skill| {
                let weight = if owned.contains(skill) { 1.0 } else { 0.0 };
                (skill.clone(), weight)
            })
            .collect();

        CandidateVector {
            file: profile.file.clone(),
            name: profile.name.clone(),
            features: FeatureVector {
                skill_vector,
                experience_years: profile.total_experience_years,
                education_level: profile.education_level,
                education_field: profile.education_field.clone(),
            },
        }
    }

    /// Weighted vector: required 1, nice-to-have 0.5, otherwise 0
    pub fn vacancy_vector(&self, vacancy: &VacancyRequirements) -> FeatureVector {
        let required: BTreeSet<String> = vacancy
            .required_skills
            .iter()
            .map(|s| normalize_skill(s))
            .collect();
        let nice: BTreeSet<String> = vacancy
            .nice_to_have_skills
            .iter()
            .map(|s| normalize_skill(s))
            .collect();

        let skill_vector = self
            .vocabulary
            .iter()
            .map(|skill| {
                let weight = if required.contains(skill) {
                    REQUIRED_WEIGHT
                } else if nice.contains(skill) {
                    NICE_TO_HAVE_WEIGHT
                } else {
                    0.0
                };
                (skill.clone(), weight)
            })
            .collect();

        FeatureVector {
            skill_vector,
            experience_years: vacancy.minimum_years_experience,
            education_level: vacancy.required_education_level,
            education_field: vacancy.required_education_field.clone(),
        }
    }

    pub fn build(&self, profiles: &[CandidateProfile], vacancy: &VacancyRequirements) -> VectorSet {
        debug!(
            "Vectorizing {} candidates over {} skills",
            profiles.len(),
            self.vocabulary.len()
        );
        VectorSet {
            vocabulary: self.vocabulary.iter().cloned().collect(),
            candidates: profiles.iter().map(|p| self.candidate_vector(p)).collect(),
            vacancy: self.vacancy_vector(vacancy),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vacancy() -> VacancyRequirements {
        VacancyRequirements {
            required_skills: vec!["python".into(), "sql".into()],
            nice_to_have_skills: vec!["docker".into()],
            required_education_level: 1.0,
            required_education_field: "informatics".into(),
            minimum_years_experience: 3.0,
        }
    }

    fn profile(skills: &[&str]) -> CandidateProfile {
        CandidateProfile {
            file: "a.txt".into(),
            name: "Ann Lee".into(),
            education_level: 2.0,
            education_field: "informatics".into(),
            total_experience_years: 4.5,
            skills: skills.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_vacancy_weights() {
        let builder = VectorBuilder::from_vacancy(&vacancy());
        let vector = builder.vacancy_vector(&vacancy());

        assert_eq!(vector.skill_vector["python"], 1.0);
        assert_eq!(vector.skill_vector["sql"], 1.0);
        assert_eq!(vector.skill_vector["docker"], 0.5);
        assert_eq!(vector.experience_years, 3.0);
        assert_eq!(vector.education_field, "informatics");
    }

    #[test]
    fn test_candidate_skills_outside_vocabulary_dropped() {
        let builder = VectorBuilder::from_vacancy(&vacancy());
        let vector = builder.candidate_vector(&profile(&["python", "excel"]));

        let keys: Vec<_> = vector.features.skill_vector.keys().cloned().collect();
        assert_eq!(keys, vec!["docker", "python", "sql"]);
        assert_eq!(vector.features.skill_vector["python"], 1.0);
        assert_eq!(vector.features.skill_vector["sql"], 0.0);
        assert!(!vector.features.skill_vector.contains_key("excel"));
        assert_eq!(vector.features.experience_years, 4.5);
    }

    #[test]
    fn test_vector_set_serializes_flat_candidates() {
        let builder = VectorBuilder::from_vacancy(&vacancy());
        let set = builder.build(&[profile(&["sql"])], &vacancy());

        assert_eq!(set.vocabulary, vec!["docker", "python", "sql"]);
        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json["candidates"][0]["file"], "a.txt");
        assert_eq!(json["candidates"][0]["skill_vector"]["sql"], 1.0);
        assert_eq!(json["vacancy"]["skill_vector"]["docker"], 0.5);
    }

    #[test]
    fn test_empty_vocabulary() {
        let mut empty = vacancy();
        empty.required_skills.clear();
        empty.nice_to_have_skills.clear();

        let builder = VectorBuilder::from_vacancy(&empty);
        assert!(builder.vocabulary().is_empty());
        assert!(builder
            .candidate_vector(&profile(&["python"]))
            .features
            .skill_vector
            .is_empty());
    }
}
