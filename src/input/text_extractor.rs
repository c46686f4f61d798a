//! Text extraction from candidate documents

use crate::error::{Result, ShortlistError};
use pulldown_cmark::{Event, Parser, Tag};
use std::path::Path;
use tokio::fs;

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        // invalid UTF-8 surfaces as an InvalidData io error
        let content = fs::read_to_string(path).await?;
        Ok(content)
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown_content = fs::read_to_string(path).await?;
        Ok(markdown_to_text(&markdown_content))
    }
}

/// Binary formats need converting to text before they can be ranked
pub struct UnsupportedBinaryExtractor {
    pub format: &'static str,
}

impl TextExtractor for UnsupportedBinaryExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        Err(ShortlistError::UnsupportedFormat(format!(
            "{} documents are not read directly, convert '{}' to text first",
            self.format,
            path.display()
        )))
    }
}

/// Flatten markdown to plain text, one block per line.
///
/// Headings, paragraphs and list items each end a line so that the line
/// based heuristics (email adjacency, header names, skill sections) see the
/// same layout as in a plain text resume.
pub fn markdown_to_text(markdown: &str) -> String {
    let mut output = String::new();

    for event in Parser::new(markdown) {
        match event {
            Event::Text(text) | Event::Code(text) => output.push_str(&text),
            Event::SoftBreak | Event::HardBreak | Event::Rule => output.push('\n'),
            Event::End(tag) => match tag {
                Tag::Paragraph
                | Tag::Heading(..)
                | Tag::Item
                | Tag::CodeBlock(_)
                | Tag::TableRow
                | Tag::TableHead => output.push('\n'),
                Tag::TableCell => output.push(' '),
                _ => {}
            },
            _ => {}
        }
    }

    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
