//! Atomic PNG output.
//!
//! Each page is encoded into a temporary file in the destination directory and
//! then renamed over the final path. An existing image at that path is
//! replaced in one step, so the path never holds a truncated PNG. Keeping the
//! temporary file in the same directory keeps the rename on one filesystem.

use image::{DynamicImage, ImageError, ImageFormat};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::debug;

/// Why a page image could not be written.
#[derive(Debug, Error)]
pub enum PngWriteError {
    /// No temporary file could be created next to the target.
    #[error("cannot create temporary file in '{dir}': {source}")]
    TempFile {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// PNG encoding failed.
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] ImageError),

    /// Flushing the encoded bytes failed.
    #[error("flush failed: {0}")]
    Flush(#[source] std::io::Error),

    /// The temporary file could not be renamed over the target.
    #[error("cannot replace '{target}': {source}")]
    Persist {
        target: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Write `image` as a PNG to `target`, replacing any existing file.
pub fn write_png_atomic(image: &DynamicImage, target: &Path) -> Result<(), PngWriteError> {
    let dir = target
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let tmp = tempfile::Builder::new()
        .prefix(".pdf2png-")
        .suffix(".png.tmp")
        .tempfile_in(dir)
        .map_err(|source| PngWriteError::TempFile {
            dir: dir.to_path_buf(),
            source,
        })?;

    encode_png(image, &tmp)?;

    tmp.persist(target).map_err(|e| PngWriteError::Persist {
        target: target.to_path_buf(),
        source: e.error,
    })?;
    debug!("Wrote {}", target.display());
    Ok(())
}

fn encode_png(image: &DynamicImage, tmp: &NamedTempFile) -> Result<(), PngWriteError> {
    let mut writer = BufWriter::new(tmp.as_file());
    image.write_to(&mut writer, ImageFormat::Png)?;
    writer.flush().map_err(PngWriteError::Flush)?;
    Ok(())
}
