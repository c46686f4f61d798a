//! Pipeline artifacts written to the output directory

use crate::error::Result;
use crate::output::formatter::CsvFormatter;
use crate::processing::analyzer::ShortlistRun;
use crate::processing::document::CandidateProfile;
use crate::processing::scoring::RankedEntry;
use crate::processing::vacancy::VacancyRequirements;
use crate::processing::vectorize::VectorSet;
use log::info;
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const ENTITIES_FILE: &str = "entities.json";
pub const VACANCY_FILE: &str = "vacancy.json";
pub const VECTORS_FILE: &str = "vectors.json";
pub const RANKING_FILE: &str = "ranking.csv";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub entities: PathBuf,
    pub vacancy: PathBuf,
    pub vectors: PathBuf,
    pub ranking: PathBuf,
}

pub struct ArtifactWriter {
    out_dir: PathBuf,
}

impl ArtifactWriter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    pub async fn write_entities(&self, profiles: &[CandidateProfile]) -> Result<PathBuf> {
        self.write_json(ENTITIES_FILE, &profiles).await
    }

    pub async fn write_vacancy(&self, vacancy: &VacancyRequirements) -> Result<PathBuf> {
        self.write_json(VACANCY_FILE, vacancy).await
    }

    pub async fn write_vectors(&self, vectors: &VectorSet) -> Result<PathBuf> {
        self.write_json(VECTORS_FILE, vectors).await
    }

    pub async fn write_ranking<'a, I>(&self, entries: I) -> Result<PathBuf>
    where
        I: IntoIterator<Item = &'a RankedEntry>,
    {
        let csv = CsvFormatter::format_entries(entries)?;
        self.write_file(RANKING_FILE, csv.as_bytes()).await
    }

    /// Write all four artifacts of a completed run
    pub async fn write_all(&self, run: &ShortlistRun) -> Result<ArtifactPaths> {
        Ok(ArtifactPaths {
            entities: self.write_entities(&run.profiles).await?,
            vacancy: self.write_vacancy(&run.report.vacancy).await?,
            vectors: self.write_vectors(&run.vectors).await?,
            ranking: self.write_ranking(run.report.entries()).await?,
        })
    }

    async fn write_json<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> Result<PathBuf> {
        let json = serde_json::to_string_pretty(value)?;
        self.write_file(name, json.as_bytes()).await
    }

    async fn write_file(&self, name: &str, contents: &[u8]) -> Result<PathBuf> {
        tokio::fs::create_dir_all(&self.out_dir).await?;
        let path = self.out_dir.join(name);
        tokio::fs::write(&path, contents).await?;
        info!("Wrote {}", path.display());
        Ok(path)
    }
}
