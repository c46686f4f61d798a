//! Shortlist report structures

use crate::processing::batch::DocumentFailure;
use crate::processing::scoring::{RankedCandidate, RankedEntry, ScoringWeights};
use crate::processing::vacancy::VacancyRequirements;
use serde::{Deserialize, Serialize};
use std::time::SystemTime;

/// Result of one ranking run, as rendered by the formatters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortlistReport {
    /// Candidates, best match first
    pub ranking: Vec<RankedCandidate>,

    /// Documents excluded from the ranking
    pub failures: Vec<DocumentFailure>,

    pub vacancy: VacancyRequirements,
    pub summary: ShortlistSummary,
    pub weights: ScoringWeights,
    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortlistSummary {
    pub documents_found: usize,
    pub candidates_ranked: usize,
    pub documents_failed: usize,
    pub vocabulary_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: SystemTime,
    pub tool_version: String,
    pub cv_dir: String,
    pub vacancy_source: String,
    pub processing_time_ms: u64,
}

/// Coarse label for a composite score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchBand {
    Strong,
    Good,
    Partial,
    Weak,
}

impl MatchBand {
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 0.8 => MatchBand::Strong,
            s if s >= 0.6 => MatchBand::Good,
            s if s >= 0.4 => MatchBand::Partial,
            _ => MatchBand::Weak,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MatchBand::Strong => "STRONG",
            MatchBand::Good => "GOOD",
            MatchBand::Partial => "PARTIAL",
            MatchBand::Weak => "WEAK",
        }
    }
}

impl ShortlistReport {
    /// The first `top_n` rows; 0 means all of them
    pub fn top(&self, top_n: usize) -> &[RankedCandidate] {
        if top_n == 0 || top_n >= self.ranking.len() {
            &self.ranking
        } else {
            &self.ranking[..top_n]
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = &RankedEntry> {
        self.ranking.iter().map(|r| &r.entry)
    }

    pub fn generated_at_utc(&self) -> String {
        chrono::DateTime::<chrono::Utc>::from(self.metadata.generated_at)
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string()
    }
}
