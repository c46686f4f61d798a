//! Input manager for candidate and vacancy documents

use crate::error::{Result, ShortlistError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{
    MarkdownExtractor, PlainTextExtractor, TextExtractor, UnsupportedBinaryExtractor,
};
use log::{debug, info};
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Clone, Copy)]
pub struct InputManager;

impl InputManager {
    pub fn new() -> Self {
        Self
    }

    /// Candidate documents directly inside `dir`, sorted by file name
    pub async fn list_documents(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        if !dir.is_dir() {
            return Err(ShortlistError::InvalidInput(format!(
                "Not a directory: {}",
                dir.display()
            )));
        }

        let mut entries = tokio::fs::read_dir(dir).await?;
        let mut documents = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if !entry.file_type().await?.is_file() {
                continue;
            }
            if FileType::from_path(&path).is_candidate_document() {
                documents.push(path);
            } else {
                debug!("Skipping non-document file: {}", path.display());
            }
        }

        documents.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        info!("Found {} candidate documents in {}", documents.len(), dir.display());
        Ok(documents)
    }

    pub async fn extract_text(&self, path: &Path) -> Result<String> {
        if !path.exists() {
            return Err(ShortlistError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        match FileType::from_path(path) {
            FileType::Text => PlainTextExtractor.extract(path).await,
            FileType::Markdown => MarkdownExtractor.extract(path).await,
            FileType::Pdf => UnsupportedBinaryExtractor { format: "PDF" }.extract(path).await,
            FileType::Docx => UnsupportedBinaryExtractor { format: "DOCX" }.extract(path).await,
            FileType::Unknown => Err(ShortlistError::UnsupportedFormat(format!(
                "Unsupported file type for: {}",
                path.display()
            ))),
        }
    }
}
