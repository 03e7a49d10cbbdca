//! Output file naming.
//!
//! Page 1 of `report.pdf` becomes `report.png`; every later page `n` becomes
//! `report_page_<n>.png`. A single-page PDF and the first page of a
//! multi-page PDF with the same base name therefore share one path, and the
//! converter overwrites whatever is there.
//!
//! Names are built on `OsString` so a base name that is not valid UTF-8 is
//! carried through byte for byte.

use std::ffi::{OsStr, OsString};

/// Output file name for the 0-indexed `page_index` of a document.
pub fn output_file_name(base_name: impl AsRef<OsStr>, page_index: usize) -> OsString {
    let mut name = base_name.as_ref().to_os_string();
    if page_index == 0 {
        name.push(".png");
    } else {
        name.push(format!("_page_{}.png", page_index + 1));
    }
    name
}

/// Output file names for every page of a `page_count`-page document.
pub fn output_file_names(base_name: impl AsRef<OsStr>, page_count: usize) -> Vec<OsString> {
    let base_name = base_name.as_ref();
    (0..page_count)
        .map(|i| output_file_name(base_name, i))
        .collect()
}
