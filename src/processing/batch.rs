//! Concurrent profile extraction over a directory of documents

use crate::config::BatchConfig;
use crate::error::{Result, ShortlistError};
use crate::input::InputManager;
use crate::processing::document::{CandidateProfile, DocumentParser};
use crate::processing::skills::SkillMatcher;
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

/// A document that was excluded from the batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentFailure {
    pub file: String,
    pub reason: String,
}

/// Profiles and failures, both in input order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub profiles: Vec<CandidateProfile>,
    pub failures: Vec<DocumentFailure>,
}

impl BatchOutcome {
    pub fn total(&self) -> usize {
        self.profiles.len() + self.failures.len()
    }
}

pub struct BatchProcessor {
    parser: Arc<DocumentParser>,
    input: InputManager,
    max_workers: usize,
    document_timeout: Duration,
    show_progress: bool,
}

impl BatchProcessor {
    pub fn new(config: &BatchConfig) -> Self {
        Self {
            parser: Arc::new(DocumentParser::new()),
            input: InputManager::new(),
            max_workers: config.max_workers.max(1),
            document_timeout: Duration::from_secs(config.document_timeout_secs),
            show_progress: config.show_progress,
        }
    }

    pub fn with_parser(mut self, parser: DocumentParser) -> Self {
        self.parser = Arc::new(parser);
        self
    }

    pub async fn process_directory(
        &self,
        dir: &Path,
        skills: Arc<SkillMatcher>,
    ) -> Result<BatchOutcome> {
        let files = self.input.list_documents(dir).await?;
        self.process_files(&files, skills).await
    }

    /// Parse every file on a bounded pool of tasks.
    ///
    /// A document that cannot be read, is in an unsupported format, panics
    /// the parser or runs past the timeout is recorded as a failure and the
    /// rest of the batch carries on.
    pub async fn process_files(
        &self,
        files: &[PathBuf],
        skills: Arc<SkillMatcher>,
    ) -> Result<BatchOutcome> {
        info!(
            "Processing {} documents with {} workers",
            files.len(),
            self.max_workers
        );

        let progress = self.progress_bar(files.len());
        let semaphore = Arc::new(Semaphore::new(self.max_workers));
        let timeout = self.document_timeout;
        let mut handles = Vec::with_capacity(files.len());

        for path in files {
            let file = display_name(path);
            let permit = semaphore.clone().acquire_owned().await.map_err(|e| {
                ShortlistError::Processing(format!("Worker pool closed: {}", e))
            })?;

            let input = self.input;
            let parser = Arc::clone(&self.parser);
            let skills = Arc::clone(&skills);
            let progress = progress.clone();
            let path = path.clone();
            let task_file = file.clone();

            let handle = tokio::spawn(async move {
                let parse_file = task_file.clone();
                let work = async move {
                    let text = input.extract_text(&path).await?;
                    // the permit lives as long as the parse, even past a timeout
                    tokio::task::spawn_blocking(move || {
                        let _permit = permit;
                        parser.parse(&parse_file, &text, &skills)
                    })
                    .await
                    .map_err(|e| ShortlistError::Processing(format!("parser task failed: {}", e)))
                };
                let result = bounded(&task_file, timeout, work).await;
                progress.inc(1);
                result
            });
            handles.push((file, handle));
        }

        let mut outcome = BatchOutcome::default();
        for (file, handle) in handles {
            let result = match handle.await {
                Ok(result) => result,
                Err(e) => Err(ShortlistError::Processing(format!("task failed: {}", e))),
            };
            match result {
                Ok(profile) => outcome.profiles.push(profile),
                Err(e) => {
                    warn!("Skipping {}: {}", file, e);
                    outcome.failures.push(DocumentFailure {
                        file,
                        reason: e.to_string(),
                    });
                }
            }
        }

        progress.finish_and_clear();
        info!(
            "Batch finished: {} parsed, {} failed",
            outcome.profiles.len(),
            outcome.failures.len()
        );
        Ok(outcome)
    }

    fn progress_bar(&self, len: usize) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }
        let bar = ProgressBar::new(len as u64);
        if let Ok(style) =
            ProgressStyle::with_template("{spinner} [{bar:40}] {pos}/{len} documents ({elapsed})")
        {
            bar.set_style(style.progress_chars("=> "));
        }
        bar
    }
}

/// Run `work` for `file`, failing with `DocumentTimeout` once `limit` passes
async fn bounded<T, F>(file: &str, limit: Duration, work: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(limit, work).await {
        Ok(result) => result,
        Err(_) => Err(ShortlistError::DocumentTimeout {
            file: file.to_string(),
            secs: limit.as_secs(),
        }),
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::name::{NameResolver, PersonNameRecognizer};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    struct SlowRecognizer {
        active: Arc<AtomicUsize>,
        peak: Arc<AtomicUsize>,
    }

    impl PersonNameRecognizer for SlowRecognizer {
        fn person_spans(&self, _line: &str) -> Vec<String> {
            let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            std::thread::sleep(Duration::from_millis(1500));
            self.active.fetch_sub(1, Ordering::SeqCst);
            Vec::new()
        }
    }

    fn quiet_config(max_workers: usize) -> BatchConfig {
        BatchConfig {
            max_workers,
            document_timeout_secs: 30,
            show_progress: false,
        }
    }

    #[tokio::test]
    async fn test_failures_do_not_stop_the_batch() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a_anna.txt"), "Anna Berg anna@example.com\nPython").unwrap();
        std::fs::write(dir.path().join("b_broken.txt"), [0xff, 0xfe, 0xfd]).unwrap();
        std::fs::write(dir.path().join("c_scan.pdf"), b"%PDF-1.7").unwrap();
        std::fs::write(dir.path().join("d_dirk.md"), "# Dirk Vos\n\nSQL and python").unwrap();

        let skills = Arc::new(SkillMatcher::new(["python", "sql"]).unwrap());
        let outcome = BatchProcessor::new(&quiet_config(2))
            .process_directory(dir.path(), skills)
            .await
            .unwrap();

        let parsed: Vec<_> = outcome.profiles.iter().map(|p| p.file.as_str()).collect();
        assert_eq!(parsed, vec!["a_anna.txt", "d_dirk.md"]);
        let failed: Vec<_> = outcome.failures.iter().map(|f| f.file.as_str()).collect();
        assert_eq!(failed, vec!["b_broken.txt", "c_scan.pdf"]);
        assert_eq!(outcome.total(), 4);

        assert_eq!(outcome.profiles[0].name, "Anna Berg");
        assert_eq!(outcome.profiles[1].name, "Dirk Vos");
        assert_eq!(outcome.profiles[1].skills.len(), 2);
    }

    #[tokio::test]
    async fn test_input_order_is_kept_with_many_workers() {
        let dir = TempDir::new().unwrap();
        let mut files = Vec::new();
        for i in (0..12).rev() {
            let path = dir.path().join(format!("cv_{:02}.txt", i));
            std::fs::write(&path, "x".repeat(i * 1000)).unwrap();
            files.push(path);
        }

        let outcome = BatchProcessor::new(&quiet_config(8))
            .process_files(&files, Arc::new(SkillMatcher::empty()))
            .await
            .unwrap();

        let expected: Vec<String> = (0..12).rev().map(|i| format!("cv_{:02}.txt", i)).collect();
        let actual: Vec<String> = outcome.profiles.into_iter().map(|p| p.file).collect();
        assert_eq!(actual, expected);
    }

    #[tokio::test]
    async fn test_empty_directory() {
        let dir = TempDir::new().unwrap();
        let outcome = BatchProcessor::new(&quiet_config(4))
            .process_directory(dir.path(), Arc::new(SkillMatcher::empty()))
            .await
            .unwrap();
        assert_eq!(outcome.total(), 0);
    }

    #[tokio::test]
    async fn test_timed_out_parse_keeps_its_worker_slot() {
        let dir = TempDir::new().unwrap();
        let mut files = Vec::new();
        for name in ["one.txt", "two.txt"] {
            let path = dir.path().join(name);
            std::fs::write(&path, "header line").unwrap();
            files.push(path);
        }

        let active = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));
        let recognizer = SlowRecognizer {
            active: Arc::clone(&active),
            peak: Arc::clone(&peak),
        };
        let config = BatchConfig {
            max_workers: 1,
            document_timeout_secs: 1,
            show_progress: false,
        };
        let processor = BatchProcessor::new(&config).with_parser(DocumentParser::with_name_resolver(
            NameResolver::with_recognizer(Box::new(recognizer)),
        ));

        let outcome = processor
            .process_files(&files, Arc::new(SkillMatcher::empty()))
            .await
            .unwrap();

        assert!(outcome.profiles.is_empty());
        assert_eq!(outcome.failures.len(), 2);
        assert_eq!(peak.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_bounded_reports_timeout() {
        let result: Result<()> =
            bounded("slow.txt", Duration::from_millis(10), std::future::pending()).await;
        match result {
            Err(ShortlistError::DocumentTimeout { file, .. }) => assert_eq!(file, "slow.txt"),
            other => panic!("expected timeout, got {:?}", other),
        }

        let fast = bounded("fast.txt", Duration::from_secs(1), async { Ok(7) }).await;
        assert_eq!(fast.unwrap(), 7);
    }
}
