//! cv-shortlist: rank candidate resumes against a job vacancy

use anyhow::{Context, Result};
use clap::Parser;
use cv_shortlist::cli::{self, Cli, Commands, ConfigAction};
use cv_shortlist::config::Config;
use cv_shortlist::output::{save_report_to_file, ArtifactWriter, ReportGenerator};
use cv_shortlist::processing::analyzer::{ShortlistEngine, VacancySource};
use cv_shortlist::processing::vacancy::VacancyRequirements;
use cv_shortlist::ShortlistError;
use log::{error, info, warn};
use std::path::{Path, PathBuf};
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = if cli.command.needs_config() {
        match load_config(cli.config.as_deref()) {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load configuration: {:#}", e);
                process::exit(1);
            }
        }
    } else {
        Config::default()
    };

    if let Err(e) = run_command(cli.command, config, cli.config).await {
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("reading config file {}", path.display())),
        None => Config::load().context("loading default config"),
    }
}

fn vacancy_source(text: Option<PathBuf>, json: Option<PathBuf>) -> Option<VacancySource> {
    match (text, json) {
        (_, Some(json)) => Some(VacancySource::Json(json)),
        (Some(text), None) => Some(VacancySource::Text(text)),
        (None, None) => None,
    }
}

fn check_vacancy_text(path: &Path) -> Result<()> {
    cli::validate_file_extension(path, &["txt", "md", "markdown"])
        .map_err(|e| ShortlistError::InvalidInput(format!("Vacancy file: {}", e)))?;
    Ok(())
}

async fn run_command(command: Commands, mut config: Config, config_path: Option<PathBuf>) -> Result<()> {
    match command {
        Commands::Rank {
            cvs,
            vacancy,
            vacancy_json,
            out,
            output,
            detailed,
            save,
            workers,
        } => {
            if let Some(path) = &vacancy {
                check_vacancy_text(path)?;
            }
            if let Some(workers) = workers {
                config.batch.max_workers = workers;
            }
            if let Some(output) = &output {
                config.output.format =
                    cli::parse_output_format(output).map_err(ShortlistError::InvalidInput)?;
            }
            config.output.detailed |= detailed;
            config.validate()?;

            let source = vacancy_source(vacancy, vacancy_json)
                .ok_or_else(|| ShortlistError::InvalidInput("a vacancy is required".to_string()))?;
            info!("Ranking resumes in {} against {}", cvs.display(), source);

            let engine = ShortlistEngine::new(&config);
            let run = engine
                .run(&cvs, &source)
                .await
                .with_context(|| format!("ranking resumes in {}", cvs.display()))?;

            let paths = ArtifactWriter::new(&out)
                .write_all(&run)
                .await
                .with_context(|| format!("writing artifacts to {}", out.display()))?;

            let generator = ReportGenerator::with_options(
                config.output.color_output,
                config.output.detailed,
                true,
                true,
                config.output.top_n,
            );
            let rendered = generator.generate_report(&run.report, &config.output.format)?;
            println!("{}", rendered);
            println!("Ranking written to {}", paths.ranking.display());

            if let Some(save_path) = save {
                // saved copies never carry terminal color codes
                let plain = ReportGenerator::with_options(
                    false,
                    config.output.detailed,
                    true,
                    true,
                    config.output.top_n,
                )
                .generate_report(&run.report, &config.output.format)?;
                save_report_to_file(&plain, &save_path)?;
                println!("Report saved to {}", save_path.display());
            }
        }

        Commands::Extract {
            cvs,
            vacancy,
            vacancy_json,
            out,
        } => {
            if let Some(path) = &vacancy {
                check_vacancy_text(path)?;
            }
            config.validate()?;
            let engine = ShortlistEngine::new(&config);

            let requirements = match vacancy_source(vacancy, vacancy_json) {
                Some(source) => engine.load_vacancy(&source).await?,
                None => {
                    warn!("No vacancy given, profiles will carry no skills");
                    VacancyRequirements {
                        required_skills: Vec::new(),
                        nice_to_have_skills: Vec::new(),
                        required_education_level: 0.0,
                        required_education_field: String::new(),
                        minimum_years_experience: 0.0,
                    }
                }
            };

            let outcome = engine
                .extract_profiles(&cvs, &requirements)
                .await
                .with_context(|| format!("extracting profiles from {}", cvs.display()))?;

            let json = serde_json::to_string_pretty(&outcome.profiles)?;
            save_report_to_file(&json, &out)?;
            println!(
                "Extracted {} profiles to {} ({} documents skipped)",
                outcome.profiles.len(),
                out.display(),
                outcome.failures.len()
            );
            for failure in &outcome.failures {
                println!("  skipped {}: {}", failure.file, failure.reason);
            }
        }

        Commands::Vacancy { input, out } => {
            check_vacancy_text(&input)?;
            let engine = ShortlistEngine::new(&config);
            let requirements = engine.load_vacancy(&VacancySource::Text(input)).await?;

            let json = serde_json::to_string_pretty(&requirements)?;
            save_report_to_file(&json, &out)?;
            println!(
                "Vacancy requirements written to {} ({} required, {} nice-to-have skills)",
                out.display(),
                requirements.required_skills.len(),
                requirements.nice_to_have_skills.len()
            );
        }

        Commands::Config { action } => {
            let path = config_path.unwrap_or_else(Config::config_path);
            match action {
                Some(ConfigAction::Show) | None => {
                    let rendered = toml::to_string_pretty(&config)
                        .context("rendering configuration")?;
                    println!("# {}\n{}", path.display(), rendered);
                }

                Some(ConfigAction::Reset) => {
                    Config::default().save_to(&path)?;
                    println!("Configuration reset: {}", path.display());
                }

                Some(ConfigAction::Path) => {
                    println!("{}", path.display());
                }
            }
        }
    }

    Ok(())
}
