//! Pipeline engine: vacancy → profiles → vectors → ranking

use crate::config::Config;
use crate::error::{Result, ShortlistError};
use crate::input::InputManager;
use crate::output::report::{ReportMetadata, ShortlistReport, ShortlistSummary};
use crate::processing::batch::{BatchOutcome, BatchProcessor};
use crate::processing::document::{CandidateProfile, DocumentParser};
use crate::processing::scoring::{RankedCandidate, Scorer};
use crate::processing::skills::SkillMatcher;
use crate::processing::vacancy::{parse_vacancy_text, VacancyRequirements};
use crate::processing::vectorize::{VectorBuilder, VectorSet};
use log::info;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Instant, SystemTime};

/// Where the vacancy requirements come from
#[derive(Debug, Clone)]
pub enum VacancySource {
    /// Free-text vacancy, parsed heuristically
    Text(PathBuf),
    /// JSON produced by an external requirements parser
    Json(PathBuf),
    Parsed(VacancyRequirements),
}

impl fmt::Display for VacancySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VacancySource::Text(path) => write!(f, "text:{}", path.display()),
            VacancySource::Json(path) => write!(f, "json:{}", path.display()),
            VacancySource::Parsed(_) => write!(f, "inline"),
        }
    }
}

/// Everything a full run produces
#[derive(Debug, Clone)]
pub struct ShortlistRun {
    pub profiles: Vec<CandidateProfile>,
    pub vectors: VectorSet,
    pub report: ShortlistReport,
}

pub struct ShortlistEngine {
    batch: BatchProcessor,
    scorer: Scorer,
    input: InputManager,
}

impl ShortlistEngine {
    pub fn new(config: &Config) -> Self {
        Self {
            batch: BatchProcessor::new(&config.batch),
            scorer: Scorer::new(config.scoring_weights()),
            input: InputManager::new(),
        }
    }

    /// Replace the document parser used for every resume
    pub fn with_parser(mut self, parser: DocumentParser) -> Self {
        self.batch = self.batch.with_parser(parser);
        self
    }

    pub async fn load_vacancy(&self, source: &VacancySource) -> Result<VacancyRequirements> {
        let requirements = match source {
            VacancySource::Json(path) => VacancyRequirements::load_json(path).await?,
            VacancySource::Text(path) => {
                let text = self.input.extract_text(path).await.map_err(|e| {
                    ShortlistError::InvalidVacancy(format!(
                        "cannot read vacancy '{}': {}",
                        path.display(),
                        e
                    ))
                })?;
                let parsed = parse_vacancy_text(&text);
                info!(
                    "Parsed vacancy text {} ({} required, {} nice-to-have skills)",
                    path.display(),
                    parsed.required_skills.len(),
                    parsed.nice_to_have_skills.len()
                );
                parsed
            }
            VacancySource::Parsed(requirements) => {
                let normalized = requirements.clone().normalized();
                normalized.validate()?;
                normalized
            }
        };
        Ok(requirements)
    }

    /// Parse every document in `cv_dir`, matching skills from the vacancy
    pub async fn extract_profiles(
        &self,
        cv_dir: &Path,
        vacancy: &VacancyRequirements,
    ) -> Result<BatchOutcome> {
        let skills = Arc::new(SkillMatcher::new(vacancy.all_skills())?);
        self.batch.process_directory(cv_dir, skills).await
    }

    pub fn vectorize(
        &self,
        profiles: &[CandidateProfile],
        vacancy: &VacancyRequirements,
    ) -> VectorSet {
        VectorBuilder::from_vacancy(vacancy).build(profiles, vacancy)
    }

    pub fn rank(&self, vectors: &VectorSet) -> Vec<RankedCandidate> {
        self.scorer.rank(vectors)
    }

    /// Run every stage in order; a stage starts only once the previous one
    /// has finished
    pub async fn run(&self, cv_dir: &Path, source: &VacancySource) -> Result<ShortlistRun> {
        let start_time = Instant::now();

        let vacancy = self.load_vacancy(source).await?;
        let outcome = self.extract_profiles(cv_dir, &vacancy).await?;
        let vectors = self.vectorize(&outcome.profiles, &vacancy);
        let ranking = self.rank(&vectors);

        let processing_time_ms = start_time.elapsed().as_millis() as u64;
        info!(
            "Ranked {} candidates in {}ms ({} documents failed)",
            ranking.len(),
            processing_time_ms,
            outcome.failures.len()
        );

        let report = ShortlistReport {
            summary: ShortlistSummary {
                documents_found: outcome.total(),
                candidates_ranked: ranking.len(),
                documents_failed: outcome.failures.len(),
                vocabulary_size: vectors.vocabulary.len(),
            },
            ranking,
            failures: outcome.failures,
            vacancy,
            weights: self.scorer.weights(),
            metadata: ReportMetadata {
                generated_at: SystemTime::now(),
                tool_version: env!("CARGO_PKG_VERSION").to_string(),
                cv_dir: cv_dir.display().to_string(),
                vacancy_source: source.to_string(),
                processing_time_ms,
            },
        };

        Ok(ShortlistRun {
            profiles: outcome.profiles,
            vectors,
            report,
        })
    }
}
