//! File type detection

use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Text,
    Markdown,
    Pdf,
    Docx,
    Unknown,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "txt" | "text" => FileType::Text,
            "md" | "markdown" => FileType::Markdown,
            "pdf" => FileType::Pdf,
            "docx" | "doc" => FileType::Docx,
            _ => FileType::Unknown,
        }
    }

    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(FileType::Unknown)
    }

    /// Whether a directory scan picks the file up as a candidate document.
    /// Binary formats are listed so they surface as per-document failures.
    pub fn is_candidate_document(self) -> bool {
        self != FileType::Unknown
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detection_is_case_insensitive() {
        assert_eq!(FileType::from_path(Path::new("a/Jane.TXT")), FileType::Text);
        assert_eq!(FileType::from_path(Path::new("cv.Md")), FileType::Markdown);
        assert_eq!(FileType::from_path(Path::new("cv.pdf")), FileType::Pdf);
        assert_eq!(FileType::from_path(Path::new("cv.docx")), FileType::Docx);
        assert_eq!(FileType::from_path(Path::new("README")), FileType::Unknown);
        assert_eq!(FileType::from_path(Path::new("photo.png")), FileType::Unknown);
    }

    #[test]
    fn test_binary_formats_are_listed() {
        assert!(FileType::Pdf.is_candidate_document());
        assert!(FileType::Docx.is_candidate_document());
        assert!(FileType::Markdown.is_candidate_document());
        assert!(!FileType::Unknown.is_candidate_document());
    }
}
