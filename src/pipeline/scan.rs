//! Candidate discovery: find the PDFs directly inside a directory.
//!
//! Only the top level is scanned. An entry is a candidate when it is a regular
//! file (symlinks are followed) whose name ends in `.pdf`, compared
//! case-insensitively, so `Scan.PDF` qualifies just like `scan.pdf`.

use crate::error::Pdf2PngError;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use tracing::debug;

const PDF_SUFFIX: &[u8] = b".pdf";

/// A PDF found in the source directory.
///
/// Names are kept as `OsString` so files whose names are not valid UTF-8 are
/// converted like any other; `display_name` is the lossy form used in reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Full path of the PDF.
    pub path: PathBuf,
    /// File name as listed, e.g. `Scan.PDF`.
    pub file_name: OsString,
    /// File name without the `.pdf` suffix, e.g. `Scan`.
    pub base_name: OsString,
    /// `file_name` for reports and progress events.
    pub display_name: String,
}

impl Candidate {
    /// Build a candidate from a file name, or `None` if the name does not
    /// end in `.pdf` (any case).
    pub fn from_file_name(dir: &Path, file_name: &OsStr) -> Option<Self> {
        let base_name = base_name(file_name)?;
        Some(Self {
            path: dir.join(file_name),
            file_name: file_name.to_os_string(),
            base_name: base_name.to_os_string(),
            display_name: file_name.to_string_lossy().into_owned(),
        })
    }
}

/// `true` if `file_name` ends in `.pdf`, ignoring ASCII case.
pub fn is_pdf_name(file_name: &OsStr) -> bool {
    let bytes = file_name.as_encoded_bytes();
    bytes.len() >= PDF_SUFFIX.len()
        && bytes[bytes.len() - PDF_SUFFIX.len()..].eq_ignore_ascii_case(PDF_SUFFIX)
}

/// Strip the `.pdf` suffix from `file_name`.
///
/// Leading dots never start an extension: `.pdf`, `..pdf` and the like keep
/// their full name as the base, so `..pdf` renders to `..pdf.png`.
pub fn base_name(file_name: &OsStr) -> Option<&OsStr> {
    if !is_pdf_name(file_name) {
        return None;
    }
    let path = Path::new(file_name);
    match (path.file_stem(), path.extension()) {
        (Some(stem), Some(_)) if !stem.as_encoded_bytes().iter().all(|&b| b == b'.') => {
            Some(stem)
        }
        _ => Some(file_name),
    }
}

/// Check that `dir` exists and is a directory.
pub fn ensure_directory(dir: &Path) -> Result<(), Pdf2PngError> {
    match std::fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(Pdf2PngError::NotADirectory {
            path: dir.to_path_buf(),
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(Pdf2PngError::DirectoryNotFound {
                path: dir.to_path_buf(),
            })
        }
        Err(e) => Err(Pdf2PngError::ReadDirFailed {
            path: dir.to_path_buf(),
            source: e,
        }),
    }
}

/// List the candidate PDFs directly inside `dir`, sorted by file name.
pub fn find_candidates(dir: &Path) -> Result<Vec<Candidate>, Pdf2PngError> {
    ensure_directory(dir)?;

    let read_dir_failed = |e: std::io::Error| Pdf2PngError::ReadDirFailed {
        path: dir.to_path_buf(),
        source: e,
    };

    let mut candidates = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_dir_failed)? {
        let entry = entry.map_err(read_dir_failed)?;
        let file_name = entry.file_name();

        let Some(candidate) = Candidate::from_file_name(dir, &file_name) else {
            continue;
        };

        // Follow symlinks; directories named `*.pdf` are not candidates.
        match std::fs::metadata(&candidate.path) {
            Ok(meta) if meta.is_file() => candidates.push(candidate),
            Ok(_) => debug!("Skipping non-file entry {}", candidate.path.display()),
            Err(e) => debug!("Skipping unreadable entry {}: {}", candidate.path.display(), e),
        }
    }

    candidates.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    debug!("Found {} candidate PDFs in {}", candidates.len(), dir.display());
    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn os(s: &str) -> &OsStr {
        OsStr::new(s)
    }

    #[test]
    fn test_is_pdf_name() {
        assert!(is_pdf_name(os("report.pdf")));
        assert!(is_pdf_name(os("Scan.PDF")));
        assert!(is_pdf_name(os("mixed.PdF")));
        assert!(is_pdf_name(os(".pdf")));
        assert!(!is_pdf_name(os("notes.txt")));
        assert!(!is_pdf_name(os("image.png")));
        assert!(!is_pdf_name(os("pdf")));
        assert!(!is_pdf_name(os("report.pdf.bak")));
        assert!(!is_pdf_name(os("résumé")));
    }

    #[test]
    fn test_base_name() {
        assert_eq!(base_name(os("report.pdf")), Some(os("report")));
        assert_eq!(base_name(os("Scan.PDF")), Some(os("Scan")));
        assert_eq!(base_name(os("archive.tar.pdf")), Some(os("archive.tar")));
        assert_eq!(base_name(os("x..pdf")), Some(os("x.")));
        assert_eq!(base_name(os("notes.txt")), None);
    }

    #[test]
    fn leading_dots_never_start_an_extension() {
        assert_eq!(base_name(os(".pdf")), Some(os(".pdf")));
        assert_eq!(base_name(os("..pdf")), Some(os("..pdf")));
        assert_eq!(base_name(os("...PDF")), Some(os("...PDF")));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn non_utf8_names_are_candidates() {
        use std::os::unix::ffi::OsStrExt;

        let dir = TempDir::new().unwrap();
        let name = OsStr::from_bytes(b"scan\xff.pdf");
        std::fs::write(dir.path().join(name), b"x").unwrap();

        let found = find_candidates(dir.path()).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].file_name, name);
        assert_eq!(found[0].base_name, OsStr::from_bytes(b"scan\xff"));
        assert_eq!(found[0].display_name, "scan\u{FFFD}.pdf");
    }

    #[test]
    fn find_candidates_filters_and_sorts() {
        let dir = TempDir::new().unwrap();
        for name in ["b.pdf", "A.PDF", "notes.txt", "image.png"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }
        std::fs::create_dir(dir.path().join("folder.pdf")).unwrap();

        let found = find_candidates(dir.path()).unwrap();
        let names: Vec<_> = found.iter().map(|c| c.display_name.as_str()).collect();
        assert_eq!(names, vec!["A.PDF", "b.pdf"]);
        assert_eq!(found[0].base_name, "A");
        assert_eq!(found[0].path, dir.path().join("A.PDF"));
    }

    #[test]
    fn find_candidates_ignores_subdirectories() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("nested/inner.pdf"), b"x").unwrap();

        assert!(find_candidates(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn missing_directory_is_reported() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            find_candidates(&missing),
            Err(Pdf2PngError::DirectoryNotFound { .. })
        ));
    }

    #[test]
    fn file_instead_of_directory_is_reported() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("doc.pdf");
        std::fs::write(&file, b"x").unwrap();
        assert!(matches!(
            find_candidates(&file),
            Err(Pdf2PngError::NotADirectory { .. })
        ));
    }
}
