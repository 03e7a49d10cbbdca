//! Directory conversion entry points.
//!
//! [`convert_directory`] replaces every PDF directly inside a directory with
//! PNG renderings of its pages:
//!
//! ```text
//! for each *.pdf (any case, sorted by name):
//!     open ─▶ for page i: render ─▶ write <base>.png | <base>_page_<i+1>.png
//!          ─▶ close ─▶ delete the PDF
//! ```
//!
//! Files are processed one at a time on the calling thread. A source PDF is
//! deleted only after all of its pages were written. What happens after a
//! failure is governed by [`FailurePolicy`]; in every case the failing file's
//! source is kept and pages already written for it stay on disk.

use crate::config::{ConversionConfig, FailurePolicy};
use crate::error::{FileError, Pdf2PngError};
use crate::output::{ConversionReport, ConversionStats, FileOutcome, FileStatus, PlannedFile};
use crate::pipeline::naming::{output_file_name, output_file_names};
use crate::pipeline::render::{PageRasterizer, PdfiumRasterizer};
use crate::pipeline::scan::{find_candidates, Candidate};
use crate::pipeline::write::write_png_atomic;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Convert every PDF in `dir` using pdfium.
///
/// This is the primary entry point for the library.
///
/// # Returns
/// `Ok(ConversionReport)` once every candidate was attempted. With
/// [`FailurePolicy::Continue`] the report may contain failed files; check
/// [`ConversionReport::is_success`].
///
/// # Errors
/// - the directory is missing, not a directory, or cannot be listed
/// - pdfium cannot be bound
/// - with [`FailurePolicy::Abort`], the first file that fails
///   ([`Pdf2PngError::FileFailed`])
pub fn convert_directory(
    dir: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionReport, Pdf2PngError> {
    let dir = dir.as_ref();
    let candidates = find_candidates(dir)?;

    // Nothing to render: skip binding pdfium entirely so an empty directory
    // converts even where the library is not installed.
    if candidates.is_empty() {
        info!("No PDFs found in {}", dir.display());
        notify_start(config, 0);
        notify_complete(config, 0, 0);
        return Ok(empty_report(dir));
    }

    let rasterizer = PdfiumRasterizer::from_config(config)?;
    run(dir, candidates, &rasterizer, config)
}

/// Convert every PDF in `dir` with a caller-supplied rendering backend.
///
/// Same contract as [`convert_directory`]; useful for alternative renderers
/// and for tests.
pub fn convert_directory_with(
    dir: impl AsRef<Path>,
    rasterizer: &dyn PageRasterizer,
    config: &ConversionConfig,
) -> Result<ConversionReport, Pdf2PngError> {
    let dir = dir.as_ref();
    let candidates = find_candidates(dir)?;
    run(dir, candidates, rasterizer, config)
}

/// List what a conversion of `dir` would do, without writing or deleting.
///
/// Each candidate is opened to count its pages. Files that cannot be opened
/// are reported with [`PlannedFile::error`] set.
pub fn inspect_directory(
    dir: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<Vec<PlannedFile>, Pdf2PngError> {
    let dir = dir.as_ref();
    let candidates = find_candidates(dir)?;
    if candidates.is_empty() {
        return Ok(Vec::new());
    }
    let rasterizer = PdfiumRasterizer::from_config(config)?;
    Ok(plan(&candidates, &rasterizer))
}

/// [`inspect_directory`] with a caller-supplied rendering backend.
pub fn inspect_directory_with(
    dir: impl AsRef<Path>,
    rasterizer: &dyn PageRasterizer,
) -> Result<Vec<PlannedFile>, Pdf2PngError> {
    let candidates = find_candidates(dir.as_ref())?;
    Ok(plan(&candidates, rasterizer))
}

// ── Internal helpers ─────────────────────────────────────────────────────

fn run(
    dir: &Path,
    candidates: Vec<Candidate>,
    rasterizer: &dyn PageRasterizer,
    config: &ConversionConfig,
) -> Result<ConversionReport, Pdf2PngError> {
    let total_start = Instant::now();
    info!(
        "Converting {} PDFs in {}",
        candidates.len(),
        dir.display()
    );
    notify_start(config, candidates.len());

    let mut files = Vec::with_capacity(candidates.len());
    let mut pages_written = 0;
    let mut render_time = Duration::ZERO;

    for candidate in &candidates {
        let mut progress = FileProgress::default();
        let result = convert_file(dir, candidate, rasterizer, config, &mut progress);

        pages_written += progress.outputs.len();
        render_time += progress.render_time;

        match result {
            Ok(()) => {
                info!(
                    "Converted {} → {} page(s)",
                    candidate.display_name,
                    progress.outputs.len()
                );
                if let Some(ref cb) = config.progress_callback {
                    cb.on_file_complete(&candidate.display_name, progress.outputs.len());
                }
                files.push(FileOutcome {
                    source: candidate.display_name.clone(),
                    page_count: progress.page_count,
                    outputs: progress.outputs,
                    status: FileStatus::Converted,
                });
            }
            Err(error) => {
                if let Some(ref cb) = config.progress_callback {
                    cb.on_file_error(&candidate.display_name, &error.to_string());
                }
                match config.failure_policy {
                    FailurePolicy::Abort => {
                        return Err(Pdf2PngError::FileFailed {
                            path: candidate.path.clone(),
                            source: error,
                        });
                    }
                    FailurePolicy::Continue => {
                        warn!(
                            "Skipping {} ({} error): {}",
                            candidate.display_name,
                            error.kind(),
                            error
                        );
                        files.push(FileOutcome {
                            source: candidate.display_name.clone(),
                            page_count: progress.page_count,
                            outputs: progress.outputs,
                            status: FileStatus::Failed { error },
                        });
                    }
                }
            }
        }
    }

    let converted = files.iter().filter(|f| f.is_converted()).count();
    let stats = ConversionStats {
        candidate_files: candidates.len(),
        converted_files: converted,
        failed_files: candidates.len() - converted,
        pages_written,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
        render_duration_ms: render_time.as_millis() as u64,
    };

    info!(
        "Conversion complete: {}/{} files, {} pages, {}ms total",
        stats.converted_files, stats.candidate_files, stats.pages_written, stats.total_duration_ms
    );
    notify_complete(config, stats.candidate_files, stats.converted_files);

    Ok(ConversionReport {
        directory: dir.to_path_buf(),
        files,
        stats,
    })
}

/// What one file produced so far; survives a failure half-way through.
#[derive(Default)]
struct FileProgress {
    page_count: Option<usize>,
    outputs: Vec<String>,
    render_time: Duration,
}

/// Render, write and delete one candidate.
fn convert_file(
    dir: &Path,
    candidate: &Candidate,
    rasterizer: &dyn PageRasterizer,
    config: &ConversionConfig,
    progress: &mut FileProgress,
) -> Result<(), FileError> {
    debug!("Opening {}", candidate.path.display());

    let document = rasterizer
        .open(&candidate.path)
        .map_err(|e| FileError::Open { detail: e.0 })?;
    let total_pages = document.page_count();
    progress.page_count = Some(total_pages);

    if let Some(ref cb) = config.progress_callback {
        cb.on_file_start(&candidate.display_name, total_pages);
    }

    for index in 0..total_pages {
        let render_start = Instant::now();
        let image = document.render_page(index).map_err(|e| FileError::Render {
            page: index + 1,
            detail: e.0,
        })?;
        progress.render_time += render_start.elapsed();

        let output = output_file_name(&candidate.base_name, index);
        let target = dir.join(&output);
        if target.exists() {
            debug!("Overwriting existing {}", target.display());
        }
        let output = output.to_string_lossy().into_owned();
        write_png_atomic(&image, &target).map_err(|e| FileError::Write {
            output: output.clone(),
            detail: e.to_string(),
        })?;
        progress.outputs.push(output);

        if let Some(ref cb) = config.progress_callback {
            cb.on_page_written(&candidate.display_name, index + 1, total_pages);
        }
    }

    // Close the document before removing the file it was read from.
    drop(document);

    std::fs::remove_file(&candidate.path).map_err(|e| FileError::Delete {
        detail: e.to_string(),
    })?;
    debug!("Deleted {}", candidate.path.display());

    Ok(())
}

fn plan(candidates: &[Candidate], rasterizer: &dyn PageRasterizer) -> Vec<PlannedFile> {
    candidates
        .iter()
        .map(|candidate| match rasterizer.open(&candidate.path) {
            Ok(document) => {
                let page_count = document.page_count();
                PlannedFile {
                    source: candidate.display_name.clone(),
                    page_count: Some(page_count),
                    outputs: output_file_names(&candidate.base_name, page_count)
                        .iter()
                        .map(|name| name.to_string_lossy().into_owned())
                        .collect(),
                    error: None,
                }
            }
            Err(e) => PlannedFile {
                source: candidate.display_name.clone(),
                page_count: None,
                outputs: Vec::new(),
                error: Some(FileError::Open { detail: e.0 }),
            },
        })
        .collect()
}

fn empty_report(dir: &Path) -> ConversionReport {
    ConversionReport {
        directory: dir.to_path_buf(),
        files: Vec::new(),
        stats: ConversionStats::default(),
    }
}

fn notify_start(config: &ConversionConfig, total_files: usize) {
    if let Some(ref cb) = config.progress_callback {
        cb.on_conversion_start(total_files);
    }
}

fn notify_complete(config: &ConversionConfig, total_files: usize, converted: usize) {
    if let Some(ref cb) = config.progress_callback {
        cb.on_conversion_complete(total_files, converted);
    }
}
