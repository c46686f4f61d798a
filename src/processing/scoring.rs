//! Composite match scoring and ranking

use crate::processing::round_to;
use crate::processing::vectorize::{CandidateVector, FeatureVector, VectorSet};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub skills: f64,
    pub experience: f64,
    pub education: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            skills: 0.5,
            experience: 0.3,
            education: 0.2,
        }
    }
}

/// Unweighted component scores, each in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub skills: f64,
    pub experience: f64,
    pub education: f64,
}

/// One row of the ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub file: String,
    pub name: String,
    #[serde(rename = "Score")]
    pub score: f64,
    #[serde(rename = "Skill Matches")]
    pub skill_matches: usize,
    #[serde(rename = "Years of Experience")]
    pub years_of_experience: f64,
    #[serde(rename = "Education Field")]
    pub education_field: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCandidate {
    pub entry: RankedEntry,
    pub breakdown: ScoreBreakdown,
}

/// Cosine similarity over the union of keys; a missing key counts as 0.
///
/// Returns 0 when either side has zero norm.
pub fn cosine_similarity(a: &BTreeMap<String, f64>, b: &BTreeMap<String, f64>) -> f64 {
    let weight = |map: &BTreeMap<String, f64>, key: &str| map.get(key).copied().unwrap_or(0.0);

    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;
    for key in a.keys().chain(b.keys().filter(|k| !a.contains_key(*k))) {
        let (x, y) = (weight(a, key.as_str()), weight(b, key.as_str()));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (dot / (norm_a * norm_b).sqrt()).clamp(0.0, 1.0)
}

/// Vacancy skills with positive weight that the candidate also has
pub fn skill_match_count(vacancy: &BTreeMap<String, f64>, candidate: &BTreeMap<String, f64>) -> usize {
    vacancy
        .iter()
        .filter(|(skill, weight)| {
            **weight > 0.0 && candidate.get(*skill).is_some_and(|w| *w > 0.0)
        })
        .count()
}

pub fn experience_score(years: f64, minimum: f64) -> f64 {
    if minimum > 0.0 {
        (years.max(0.0) / minimum).min(1.0)
    } else {
        1.0
    }
}

/// Half for meeting the level, half for a matching field
pub fn education_score(
    candidate_level: f64,
    candidate_field: &str,
    required_level: f64,
    required_field: &str,
) -> f64 {
    let mut score = 0.0;
    if candidate_level >= required_level {
        score += 0.5;
    }
    let required_field = required_field.trim().to_lowercase();
    if !required_field.is_empty() && candidate_field.to_lowercase().contains(&required_field) {
        score += 0.5;
    }
    score
}

#[derive(Debug, Clone, Default)]
pub struct Scorer {
    weights: ScoringWeights,
}

impl Scorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> ScoringWeights {
        self.weights
    }

    pub fn score(&self, candidate: &CandidateVector, vacancy: &FeatureVector) -> RankedCandidate {
        let features = &candidate.features;
        let breakdown = ScoreBreakdown {
            skills: cosine_similarity(&features.skill_vector, &vacancy.skill_vector),
            experience: experience_score(features.experience_years, vacancy.experience_years),
            education: education_score(
                features.education_level,
                &features.education_field,
                vacancy.education_level,
                &vacancy.education_field,
            ),
        };

        let total = self.weights.skills * breakdown.skills
            + self.weights.experience * breakdown.experience
            + self.weights.education * breakdown.education;

        RankedCandidate {
            entry: RankedEntry {
                file: candidate.file.clone(),
                name: candidate.name.clone(),
                score: round_to(total, 4),
                skill_matches: skill_match_count(&vacancy.skill_vector, &features.skill_vector),
                years_of_experience: features.experience_years,
                education_field: features.education_field.clone(),
            },
            breakdown,
        }
    }

    /// Score every candidate and sort by score, highest first.
    /// Equal scores keep their input order.
    pub fn rank(&self, vectors: &VectorSet) -> Vec<RankedCandidate> {
        let mut ranked: Vec<RankedCandidate> = vectors
            .candidates
            .iter()
            .map(|candidate| self.score(candidate, &vectors.vacancy))
            .collect();
        ranked.sort_by(|a, b| b.entry.score.total_cmp(&a.entry.score));
        ranked
    }
}
