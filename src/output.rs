//! Result types returned by the converter.
//!
//! Everything here is `Serialize` so the CLI can emit it with `--json`.

use crate::error::FileError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Outcome of one full directory run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionReport {
    /// The directory that was converted.
    pub directory: PathBuf,
    /// One entry per candidate PDF, in processing order.
    pub files: Vec<FileOutcome>,
    pub stats: ConversionStats,
}

impl ConversionReport {
    /// Outcomes whose status is [`FileStatus::Failed`].
    pub fn failures(&self) -> impl Iterator<Item = &FileOutcome> {
        self.files.iter().filter(|f| !f.is_converted())
    }

    /// `true` when every candidate was converted (also for an empty directory).
    pub fn is_success(&self) -> bool {
        self.stats.failed_files == 0
    }
}

/// What happened to a single candidate PDF.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileOutcome {
    /// Source file name, e.g. `report.pdf`.
    pub source: String,
    /// Page count, if the document could be opened.
    pub page_count: Option<usize>,
    /// Output file names actually written, in page order.
    pub outputs: Vec<String>,
    pub status: FileStatus,
}

impl FileOutcome {
    pub fn is_converted(&self) -> bool {
        matches!(self.status, FileStatus::Converted)
    }
}

/// Final state of a candidate PDF.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileStatus {
    /// All pages written and the source PDF deleted.
    Converted,
    /// The file failed; its source PDF is still present.
    Failed { error: FileError },
}

/// Aggregate statistics for a run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversionStats {
    pub candidate_files: usize,
    pub converted_files: usize,
    pub failed_files: usize,
    /// Page images written, including those of files that later failed.
    pub pages_written: usize,
    pub total_duration_ms: u64,
    pub render_duration_ms: u64,
}

/// One entry of an inspect (dry-run) plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedFile {
    /// Source file name, e.g. `report.pdf`.
    pub source: String,
    pub page_count: Option<usize>,
    /// Output file names a conversion would write.
    pub outputs: Vec<String>,
    /// Set when the file could not be opened.
    pub error: Option<FileError>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(status: FileStatus) -> FileOutcome {
        FileOutcome {
            source: "a.pdf".into(),
            page_count: Some(1),
            outputs: vec!["a.png".into()],
            status,
        }
    }

    #[test]
    fn failures_filters_failed_outcomes() {
        let report = ConversionReport {
            directory: PathBuf::from("output"),
            files: vec![
                outcome(FileStatus::Converted),
                outcome(FileStatus::Failed {
                    error: FileError::Delete {
                        detail: "busy".into(),
                    },
                }),
            ],
            stats: ConversionStats {
                candidate_files: 2,
                converted_files: 1,
                failed_files: 1,
                pages_written: 2,
                ..Default::default()
            },
        };
        assert_eq!(report.failures().count(), 1);
        assert!(!report.is_success());
    }

    #[test]
    fn report_serialises_to_json() {
        let report = ConversionReport {
            directory: PathBuf::from("output"),
            files: vec![outcome(FileStatus::Converted)],
            stats: ConversionStats::default(),
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"Converted\""), "got: {json}");
        assert!(json.contains("a.png"), "got: {json}");
    }
}
