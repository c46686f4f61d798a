//! Configuration management for the shortlist tool

use crate::error::{Result, ShortlistError};
use crate::processing::scoring::ScoringWeights;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub batch: BatchConfig,
    pub scoring: ScoringConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchConfig {
    /// Upper bound on documents read or parsed at the same time.
    /// A parse that outlives its timeout keeps its slot until it returns.
    pub max_workers: usize,
    /// Per-document budget; a document exceeding it is reported as failed
    pub document_timeout_secs: u64,
    pub show_progress: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoringConfig {
    pub skills_weight: f64,
    pub experience_weight: f64,
    pub education_weight: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
    /// Rows shown by the console and markdown views; 0 shows every candidate
    pub top_n: usize,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Csv,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            batch: BatchConfig {
                max_workers: 4,
                document_timeout_secs: 30,
                show_progress: true,
            },
            scoring: ScoringConfig {
                skills_weight: 0.5,
                experience_weight: 0.3,
                education_weight: 0.2,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
                top_n: 10,
            },
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults on first use
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            ShortlistError::Configuration(format!(
                "Failed to parse config '{}': {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            ShortlistError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("cv-shortlist")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        if self.batch.max_workers == 0 {
            return Err(ShortlistError::Configuration(
                "batch.max_workers must be at least 1".to_string(),
            ));
        }
        if self.batch.document_timeout_secs == 0 {
            return Err(ShortlistError::Configuration(
                "batch.document_timeout_secs must be at least 1".to_string(),
            ));
        }

        let weights = [
            ("scoring.skills_weight", self.scoring.skills_weight),
            ("scoring.experience_weight", self.scoring.experience_weight),
            ("scoring.education_weight", self.scoring.education_weight),
        ];
        for (key, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(ShortlistError::Configuration(format!(
                    "{} must be a non-negative number, got {}",
                    key, value
                )));
            }
        }

        Ok(())
    }

    pub fn scoring_weights(&self) -> ScoringWeights {
        ScoringWeights {
            skills: self.scoring.skills_weight,
            experience: self.scoring.experience_weight,
            education: self.scoring.education_weight,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());

        let weights = config.scoring_weights();
        assert_eq!(weights, ScoringWeights::default());
    }

    #[test]
    fn test_config_roundtrip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.batch.max_workers = 8;
        config.output.format = OutputFormat::Csv;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_rejects_zero_workers() {
        let mut config = Config::default();
        config.batch.max_workers = 0;
        assert!(matches!(
            config.validate(),
            Err(ShortlistError::Configuration(_))
        ));
    }

    #[test]
    fn test_rejects_negative_weight() {
        let mut config = Config::default();
        config.scoring.experience_weight = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_file_is_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "batch = \"nope\"").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(ShortlistError::Configuration(_))
        ));
    }
}
