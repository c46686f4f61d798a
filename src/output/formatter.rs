//! Output formatters for the shortlist report

use crate::config::OutputFormat;
use crate::error::{Result, ShortlistError};
use crate::output::report::{MatchBand, ShortlistReport};
use crate::processing::education::level_label;
use crate::processing::scoring::RankedEntry;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for rendering a shortlist report
pub trait OutputFormatter {
    fn format_report(&self, report: &ShortlistReport) -> Result<String>;
}

/// Colored terminal table
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
    top_n: usize,
}

/// Full report as JSON
pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
    top_n: usize,
}

/// Ranking rows only, in the `ranking.csv` layout
pub struct CsvFormatter;

pub const RANKING_HEADER: [&str; 6] = [
    "file",
    "name",
    "Score",
    "Skill Matches",
    "Years of Experience",
    "Education Field",
];

/// Report generator that dispatches to the configured formatter
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    csv_formatter: CsvFormatter,
}

fn required_level_text(level: f64) -> &'static str {
    if level > 0.0 {
        level_label(level)
    } else {
        "any"
    }
}

fn join_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool, top_n: usize) -> Self {
        Self {
            use_colors,
            detailed,
            top_n,
        }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let (prefix, color) = match level {
            1 => ("█", Color::Blue),
            2 => ("▓", Color::Green),
            _ => ("▒", Color::Yellow),
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_band(&self, score: f64) -> String {
        let band = MatchBand::from_score(score);
        let color = match band {
            MatchBand::Strong => Color::Green,
            MatchBand::Good => Color::BrightGreen,
            MatchBand::Partial => Color::Yellow,
            MatchBand::Weak => Color::Red,
        };
        // pad before coloring so escape codes do not break the column width
        let padded = format!("{:<9}", format!("[{}]", band.label()));
        if self.use_colors {
            padded.color(color).bold().to_string()
        } else {
            padded
        }
    }

    fn format_row(&self, rank: usize, entry: &RankedEntry) -> String {
        format!(
            "{:>3}. {:.4} {} {:<24} {:<28} {:>2} skills {:>5.1} yrs  {}\n",
            rank,
            entry.score,
            self.format_band(entry.score),
            truncate(&entry.name, 24),
            truncate(&entry.file, 28),
            entry.skill_matches,
            entry.years_of_experience,
            if entry.education_field.is_empty() { "-" } else { entry.education_field.as_str() }
        )
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &ShortlistReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("CANDIDATE SHORTLIST", 1));
        output.push_str(&format!(
            "Generated: {} | Processing time: {}ms\n",
            report.generated_at_utc(),
            report.metadata.processing_time_ms
        ));
        output.push_str(&format!(
            "Documents: {} found, {} ranked, {} failed\n",
            report.summary.documents_found,
            report.summary.candidates_ranked,
            report.summary.documents_failed
        ));

        output.push_str(&self.format_header("Vacancy", 2));
        output.push_str(&format!(
            "Required skills: {}\n",
            self.colorize(&join_or_dash(&report.vacancy.required_skills), Color::Cyan)
        ));
        output.push_str(&format!(
            "Nice to have:    {}\n",
            join_or_dash(&report.vacancy.nice_to_have_skills)
        ));
        output.push_str(&format!(
            "Experience:      {} years minimum\n",
            report.vacancy.minimum_years_experience
        ));
        output.push_str(&format!(
            "Education:       {}{}\n",
            required_level_text(report.vacancy.required_education_level),
            if report.vacancy.required_education_field.is_empty() {
                String::new()
            } else {
                format!(" in {}", report.vacancy.required_education_field)
            }
        ));

        output.push_str(&self.format_header("Ranking", 2));
        let shown = report.top(self.top_n);
        if shown.is_empty() {
            output.push_str(&self.colorize("No candidates could be ranked.\n", Color::Yellow));
        }
        for (idx, ranked) in shown.iter().enumerate() {
            output.push_str(&self.format_row(idx + 1, &ranked.entry));

            if self.detailed {
                output.push_str(&format!(
                    "       skills {:.3} x {:.2} | experience {:.3} x {:.2} | education {:.3} x {:.2}\n",
                    ranked.breakdown.skills,
                    report.weights.skills,
                    ranked.breakdown.experience,
                    report.weights.experience,
                    ranked.breakdown.education,
                    report.weights.education
                ));
            }
        }
        if shown.len() < report.ranking.len() {
            output.push_str(&format!(
                "  ... {} more (see ranking.csv)\n",
                report.ranking.len() - shown.len()
            ));
        }

        if !report.failures.is_empty() {
            output.push_str(&self.format_header("Skipped documents", 3));
            for failure in &report.failures {
                output.push_str(&format!(
                    "{} {}: {}\n",
                    self.colorize("✗", Color::Red),
                    failure.file,
                    failure.reason
                ));
            }
        }

        Ok(output)
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &ShortlistReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool, top_n: usize) -> Self {
        Self {
            include_metadata,
            top_n,
        }
    }

    fn escape_cell(text: &str) -> String {
        text.replace('|', "\\|")
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &ShortlistReport) -> Result<String> {
        let mut output = String::new();

        output.push_str("# Candidate Shortlist\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Processing Time:** {}ms\n",
                report.generated_at_utc(),
                report.metadata.processing_time_ms
            ));
            output.push_str(&format!(
                "**Documents:** `{}` | **Vacancy:** `{}`\n\n",
                report.metadata.cv_dir, report.metadata.vacancy_source
            ));
        }

        output.push_str("## Vacancy\n\n");
        output.push_str(&format!(
            "- **Required skills:** {}\n",
            join_or_dash(&report.vacancy.required_skills)
        ));
        output.push_str(&format!(
            "- **Nice to have:** {}\n",
            join_or_dash(&report.vacancy.nice_to_have_skills)
        ));
        output.push_str(&format!(
            "- **Minimum experience:** {} years\n",
            report.vacancy.minimum_years_experience
        ));
        output.push_str(&format!(
            "- **Education:** {}\n\n",
            required_level_text(report.vacancy.required_education_level)
        ));

        output.push_str("## Ranking\n\n");
        output.push_str("| # | Name | File | Score | Skill Matches | Years of Experience | Education Field |\n");
        output.push_str("|---|------|------|-------|---------------|---------------------|-----------------|\n");
        for (idx, ranked) in report.top(self.top_n).iter().enumerate() {
            let entry = &ranked.entry;
            output.push_str(&format!(
                "| {} | {} | `{}` | {:.4} | {} | {:.1} | {} |\n",
                idx + 1,
                Self::escape_cell(&entry.name),
                Self::escape_cell(&entry.file),
                entry.score,
                entry.skill_matches,
                entry.years_of_experience,
                Self::escape_cell(&entry.education_field)
            ));
        }

        if !report.failures.is_empty() {
            output.push_str("\n## Skipped Documents\n\n");
            for failure in &report.failures {
                output.push_str(&format!("- `{}`: {}\n", failure.file, failure.reason));
            }
        }

        output.push_str(&format!(
            "\n---\n*cv-shortlist v{}*\n",
            report.metadata.tool_version
        ));
        Ok(output)
    }
}

impl CsvFormatter {
    /// Serialize ranking rows with the `ranking.csv` header
    pub fn format_entries<'a, I>(entries: I) -> Result<String>
    where
        I: IntoIterator<Item = &'a RankedEntry>,
    {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());
        // header is written even when there are no rows
        writer.write_record(RANKING_HEADER)?;
        for entry in entries {
            writer.serialize(entry)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| ShortlistError::OutputFormatting(format!("Failed to flush CSV: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|e| ShortlistError::OutputFormatting(format!("CSV is not UTF-8: {}", e)))
    }
}

impl OutputFormatter for CsvFormatter {
    fn format_report(&self, report: &ShortlistReport) -> Result<String> {
        Self::format_entries(report.entries())
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false, true, true, 10)
    }

    pub fn with_options(
        use_colors: bool,
        detailed: bool,
        pretty_json: bool,
        include_metadata: bool,
        top_n: usize,
    ) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed, top_n),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata, top_n),
            csv_formatter: CsvFormatter,
        }
    }

    pub fn generate_report(&self, report: &ShortlistReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
            OutputFormat::Csv => self.csv_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}
