//! CLI interface for the shortlist tool

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "cv-shortlist")]
#[command(about = "Rank candidate resumes against a job vacancy")]
#[command(long_about = "Extract candidate profiles from resumes, score them against vacancy requirements and write a ranked shortlist")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full pipeline and rank every resume in a directory
    Rank {
        /// Directory of resumes (TXT, MD)
        #[arg(long)]
        cvs: PathBuf,

        /// Vacancy text, parsed heuristically
        #[arg(long, conflicts_with = "vacancy_json", required_unless_present = "vacancy_json")]
        vacancy: Option<PathBuf>,

        /// Vacancy requirements JSON from an external parser
        #[arg(long)]
        vacancy_json: Option<PathBuf>,

        /// Directory for entities.json, vacancy.json, vectors.json and ranking.csv
        #[arg(long, default_value = "output")]
        out: PathBuf,

        /// Output format: console, json, markdown, csv
        #[arg(short, long)]
        output: Option<String>,

        /// Show the per-component score breakdown
        #[arg(short, long)]
        detailed: bool,

        /// Save the rendered report to a file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Override batch.max_workers
        #[arg(short, long)]
        workers: Option<usize>,
    },

    /// Extract candidate profiles only
    Extract {
        /// Directory of resumes (TXT, MD)
        #[arg(long)]
        cvs: PathBuf,

        /// Vacancy text providing the skill vocabulary
        #[arg(long, conflicts_with = "vacancy_json")]
        vacancy: Option<PathBuf>,

        /// Vacancy requirements JSON providing the skill vocabulary
        #[arg(long)]
        vacancy_json: Option<PathBuf>,

        /// Output JSON file
        #[arg(long)]
        out: PathBuf,
    },

    /// Parse a vacancy text into requirements JSON
    Vacancy {
        /// Vacancy text (TXT, MD)
        #[arg(short, long)]
        input: PathBuf,

        /// Output JSON file
        #[arg(long)]
        out: PathBuf,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

impl Commands {
    /// Whether the command reads the existing configuration file.
    /// `config reset` and `config path` must work even when it is broken.
    pub fn needs_config(&self) -> bool {
        !matches!(
            self,
            Commands::Config {
                action: Some(ConfigAction::Reset | ConfigAction::Path)
            }
        )
    }
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        "csv" => Ok(OutputFormat::Csv),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown, csv",
            format
        )),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_requires_one_vacancy_source() {
        assert!(Cli::try_parse_from(["cv-shortlist", "rank", "--cvs", "cvs"]).is_err());
        assert!(Cli::try_parse_from([
            "cv-shortlist", "rank", "--cvs", "cvs", "--vacancy", "v.txt", "--vacancy-json", "v.json",
        ])
        .is_err());

        let cli = Cli::try_parse_from([
            "cv-shortlist", "-v", "rank", "--cvs", "cvs", "--vacancy-json", "v.json", "--workers", "2",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Rank {
                vacancy_json,
                workers,
                out,
                ..
            } => {
                assert_eq!(vacancy_json, Some(PathBuf::from("v.json")));
                assert_eq!(workers, Some(2));
                assert_eq!(out, PathBuf::from("output"));
            }
            _ => panic!("expected rank command"),
        }
    }

    #[test]
    fn test_extract_vacancy_is_optional() {
        let cli = Cli::try_parse_from(["cv-shortlist", "extract", "--cvs", "cvs", "--out", "e.json"]);
        assert!(cli.is_ok());
    }

    #[test]
    fn test_config_reset_and_path_skip_loading() {
        let parse = |args: &[&str]| Cli::try_parse_from(args).unwrap().command;

        assert!(!parse(&["cv-shortlist", "-c", "broken.toml", "config", "reset"]).needs_config());
        assert!(!parse(&["cv-shortlist", "config", "path"]).needs_config());
        assert!(parse(&["cv-shortlist", "config", "show"]).needs_config());
        assert!(parse(&["cv-shortlist", "config"]).needs_config());
        assert!(parse(&["cv-shortlist", "vacancy", "-i", "v.txt", "--out", "v.json"]).needs_config());
    }

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("MD"), Ok(OutputFormat::Markdown));
        assert_eq!(parse_output_format("csv"), Ok(OutputFormat::Csv));
        assert!(parse_output_format("pdf").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension(Path::new("vacancy.TXT"), &["txt", "md"]).is_ok());
        assert!(validate_file_extension(Path::new("vacancy.pdf"), &["txt", "md"]).is_err());
        assert!(validate_file_extension(Path::new("vacancy"), &["txt"]).is_err());
    }
}
