//! Error handling for the shortlist pipeline

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShortlistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid vacancy requirements: {0}")]
    InvalidVacancy(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Processing error: {0}")]
    Processing(String),

    #[error("Document timed out after {secs}s: {file}")]
    DocumentTimeout { file: String, secs: u64 },

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, ShortlistError>;
