//! Binding to the pdfium shared library.
//!
//! `pdfium-render` loads pdfium dynamically, so the library has to be found at
//! runtime. Locations are tried in order, first hit wins:
//!
//! 1. the explicit path from [`crate::ConversionConfig::pdfium_library_path`];
//! 2. `PDFIUM_LIB_PATH`;
//! 3. the directory of the running executable;
//! 4. the system library search path.
//!
//! Paths in 1 and 2 may name the library file itself or a directory that
//! contains the platform library (`libpdfium.so`, `libpdfium.dylib`,
//! `pdfium.dll`).

use crate::error::Pdf2PngError;
use pdfium_render::prelude::Pdfium;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable naming a pdfium library file or directory.
pub const PDFIUM_LIB_PATH_ENV: &str = "PDFIUM_LIB_PATH";

/// Bind pdfium, trying `explicit` first and then the standard locations.
pub fn bind_pdfium(explicit: Option<&Path>) -> Result<Pdfium, Pdf2PngError> {
    let env_path = std::env::var_os(PDFIUM_LIB_PATH_ENV).map(PathBuf::from);
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));

    let mut failures = Vec::new();

    for path in candidate_library_paths(explicit, env_path.as_deref(), exe_dir.as_deref()) {
        match bind_pdfium_from_path(&path) {
            Ok(pdfium) => {
                debug!("Bound pdfium from {}", path.display());
                return Ok(pdfium);
            }
            Err(reason) => failures.push(format!("{}: {}", path.display(), reason)),
        }
    }

    match Pdfium::bind_to_system_library() {
        Ok(bindings) => {
            debug!("Bound pdfium from the system library path");
            Ok(Pdfium::new(bindings))
        }
        Err(e) => {
            failures.push(format!("system library: {e}"));
            Err(Pdf2PngError::PdfiumBindingFailed(failures.join("; ")))
        }
    }
}

/// Bind to a pdfium library at an explicit file `path`.
pub fn bind_pdfium_from_path(path: &Path) -> Result<Pdfium, String> {
    Pdfium::bind_to_library(path)
        .map(Pdfium::new)
        .map_err(|e| e.to_string())
}

/// Resolve a user-supplied location to a library file path.
///
/// Directories are joined with the platform library name.
fn library_file(location: &Path) -> PathBuf {
    if location.is_dir() {
        Pdfium::pdfium_platform_library_name_at_path(location)
    } else {
        location.to_path_buf()
    }
}

/// Ordered list of library files to try before the system search path.
fn candidate_library_paths(
    explicit: Option<&Path>,
    env_path: Option<&Path>,
    exe_dir: Option<&Path>,
) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = Vec::new();

    for location in [explicit, env_path].into_iter().flatten() {
        paths.push(library_file(location));
    }
    if let Some(dir) = exe_dir {
        paths.push(Pdfium::pdfium_platform_library_name_at_path(dir));
    }

    paths.dedup();
    paths
}
