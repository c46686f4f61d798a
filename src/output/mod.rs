//! Report rendering and artifact persistence

pub mod artifacts;
pub mod formatter;
pub mod report;

pub use artifacts::{ArtifactPaths, ArtifactWriter};
pub use formatter::{save_report_to_file, ReportGenerator};
pub use report::ShortlistReport;
