//! Error types for the edgequake-pdf2png library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`Pdf2PngError`] is **fatal**: the run cannot proceed (directory missing,
//!   pdfium not loadable, invalid configuration, or a file failed under
//!   [`crate::config::FailurePolicy::Abort`]). Returned as `Err(Pdf2PngError)`
//!   from the top-level `convert*` functions.
//!
//! * [`FileError`] is **per-file**: one PDF could not be opened, rendered,
//!   written or deleted. Under [`crate::config::FailurePolicy::Continue`] it is
//!   stored inside [`crate::output::FileOutcome`] and the run moves on.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the edgequake-pdf2png library.
#[derive(Debug, Error)]
pub enum Pdf2PngError {
    // ── Directory errors ──────────────────────────────────────────────────
    /// The source directory does not exist.
    #[error("Directory not found: '{path}'\nCheck the path exists and is readable.")]
    DirectoryNotFound { path: PathBuf },

    /// The source path exists but is not a directory.
    #[error("'{path}' is not a directory")]
    NotADirectory { path: PathBuf },

    /// Listing the directory failed.
    #[error("Failed to read directory '{path}': {source}")]
    ReadDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Per-file errors escalated by FailurePolicy::Abort ────────────────
    /// A candidate PDF failed and the run was aborted.
    #[error("Conversion of '{path}' failed: {source}")]
    FileFailed {
        path: PathBuf,
        #[source]
        source: FileError,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Pdfium binding errors ─────────────────────────────────────────────
    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {0}\n\n\
You can:\n\
  • Set PDFIUM_LIB_PATH=/path/to/libpdfium (file or containing directory).\n\
  • Pass --pdfium-lib /path/to/libpdfium.\n\
  • Place the platform library next to the pdf2png executable.\n\
Pre-built libraries: https://github.com/bblanchon/pdfium-binaries/releases\n"
    )]
    PdfiumBindingFailed(String),
}

/// A failure confined to a single candidate PDF.
///
/// Page numbers are 1-indexed, matching the `_page_<n>` output suffix.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum FileError {
    /// The file could not be opened as a PDF document.
    #[error("cannot open as PDF: {detail}")]
    Open { detail: String },

    /// A page failed to rasterise.
    #[error("page {page}: rasterisation failed: {detail}")]
    Render { page: usize, detail: String },

    /// An output image could not be written.
    #[error("failed to write '{output}': {detail}")]
    Write { output: String, detail: String },

    /// The source PDF could not be removed after conversion.
    #[error("failed to delete source PDF: {detail}")]
    Delete { detail: String },
}

impl FileError {
    /// Short machine-readable kind, used in reports and log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            FileError::Open { .. } => "open",
            FileError::Render { .. } => "render",
            FileError::Write { .. } => "write",
            FileError::Delete { .. } => "delete",
        }
    }
}

/// Error reported by a [`crate::pipeline::render::PageRasterizer`] backend.
///
/// Backends only need to describe what went wrong; the converter decides
/// whether it becomes [`FileError::Open`] or [`FileError::Render`].
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct RasterError(pub String);

impl RasterError {
    pub fn new(detail: impl Into<String>) -> Self {
        Self(detail.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_failed_display_includes_path_and_cause() {
        let e = Pdf2PngError::FileFailed {
            path: PathBuf::from("output/report.pdf"),
            source: FileError::Render {
                page: 3,
                detail: "bad stream".into(),
            },
        };
        let msg = e.to_string();
        assert!(msg.contains("report.pdf"), "got: {msg}");
        assert!(msg.contains("page 3"), "got: {msg}");
    }

    #[test]
    fn file_error_kinds() {
        assert_eq!(FileError::Open { detail: String::new() }.kind(), "open");
        assert_eq!(
            FileError::Write {
                output: "a.png".into(),
                detail: String::new()
            }
            .kind(),
            "write"
        );
        assert_eq!(FileError::Delete { detail: String::new() }.kind(), "delete");
    }

    #[test]
    fn file_error_serialises_with_variant_tag() {
        let e = FileError::Open {
            detail: "truncated".into(),
        };
        let json = serde_json::to_string(&e).unwrap();
        assert!(json.contains("Open"), "got: {json}");
        assert!(json.contains("truncated"), "got: {json}");
    }

    #[test]
    fn binding_failure_mentions_env_var() {
        let e = Pdf2PngError::PdfiumBindingFailed("no such file".into());
        assert!(e.to_string().contains("PDFIUM_LIB_PATH"));
    }
}
