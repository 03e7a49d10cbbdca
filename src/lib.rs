//! # edgequake-pdf2png
//!
//! Replace every PDF in a directory with PNG renderings of its pages.
//!
//! ## What it does
//!
//! For each file directly inside the target directory whose name ends in
//! `.pdf` (any case), every page is rendered with pdfium and written next to
//! it, then the PDF is deleted:
//!
//! ```text
//! report.pdf (1 page)  ─▶ report.png
//! doc.pdf    (3 pages) ─▶ doc.png, doc_page_2.png, doc_page_3.png
//! ```
//!
//! Existing images at those paths are overwritten. Subdirectories and
//! non-PDF files are left alone. A second run over the same directory finds
//! no PDFs and does nothing.
//!
//! ## Pipeline Overview
//!
//! ```text
//! directory
//!  │
//!  ├─ 1. Scan    top-level *.pdf, case-insensitive, sorted by name
//!  ├─ 2. Render  rasterise each page via pdfium (72 DPI, RGB by default)
//!  ├─ 3. Name    <base>.png, <base>_page_<n>.png
//!  ├─ 4. Write   temp file + rename, replacing existing images
//!  └─ 5. Delete  remove the PDF once all of its pages are on disk
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use edgequake_pdf2png::{convert_directory, ConversionConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let report = convert_directory("output", &ConversionConfig::default())?;
//!     eprintln!(
//!         "{} files, {} pages",
//!         report.stats.converted_files, report.stats.pages_written
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdf2png` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! pdfium itself is loaded at runtime; see [`pdfium`] for where it is looked up.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pdfium;
pub mod pipeline;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConversionConfig, ConversionConfigBuilder, FailurePolicy, DEFAULT_DPI};
pub use convert::{convert_directory, convert_directory_with, inspect_directory, inspect_directory_with};
pub use error::{FileError, Pdf2PngError, RasterError};
pub use output::{ConversionReport, ConversionStats, FileOutcome, FileStatus, PlannedFile};
pub use pipeline::render::{PageRasterizer, PdfiumRasterizer, RasterDocument};
pub use progress::{ConversionProgressCallback, NoopProgressCallback, ProgressCallback};
