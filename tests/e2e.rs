//! End-to-end tests against the real pdfium renderer.
//!
//! These need a pdfium shared library at runtime, so they are gated behind the
//! `E2E_ENABLED` environment variable and do not run in CI unless explicitly
//! requested.
//!
//! Run with:
//!   E2E_ENABLED=1 PDFIUM_LIB_PATH=/path/to/libpdfium.so cargo test --test e2e -- --nocapture

use edgequake_pdf2png::{convert_directory, inspect_directory, ConversionConfig};
use std::collections::BTreeSet;
use tempfile::TempDir;

// ── Test helpers ─────────────────────────────────────────────────────────────

macro_rules! e2e_skip_unless_enabled {
    () => {{
        if std::env::var("E2E_ENABLED").is_err() {
            println!("SKIP — set E2E_ENABLED=1 to run e2e tests");
            return;
        }
    }};
}

/// Build a minimal valid PDF with `pages` blank pages of `w × h` points.
fn minimal_pdf(pages: usize, w: u32, h: u32) -> Vec<u8> {
    let mut objects: Vec<String> = Vec::new();
    let kids: Vec<String> = (0..pages).map(|i| format!("{} 0 R", i + 3)).collect();

    objects.push("<< /Type /Catalog /Pages 2 0 R >>".to_string());
    objects.push(format!(
        "<< /Type /Pages /Kids [{}] /Count {} >>",
        kids.join(" "),
        pages
    ));
    for _ in 0..pages {
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {w} {h}] >>"
        ));
    }

    let mut out = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
    }

    let xref_start = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    out.extend_from_slice(b"0000000000 65535 f \n");
    for offset in offsets {
        out.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_start
        )
        .as_bytes(),
    );
    out
}

fn listing(dir: &TempDir) -> BTreeSet<String> {
    std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect()
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[test]
fn test_minimal_pdf_is_well_formed() {
    let pdf = minimal_pdf(2, 100, 50);
    assert!(pdf.starts_with(b"%PDF-1.4"));
    assert!(pdf.ends_with(b"%%EOF\n"));
    let text = String::from_utf8(pdf).unwrap();
    assert!(text.contains("/Count 2"));
    assert!(text.contains("4 0 obj"));
}

#[test]
fn test_convert_multi_page_pdf() {
    e2e_skip_unless_enabled!();

    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("doc.pdf"), minimal_pdf(3, 200, 100)).unwrap();
    std::fs::write(dir.path().join("Scan.PDF"), minimal_pdf(1, 200, 100)).unwrap();
    std::fs::write(dir.path().join("notes.txt"), "keep").unwrap();

    let report = convert_directory(dir.path(), &ConversionConfig::default())
        .expect("conversion should succeed");

    assert!(report.is_success());
    assert_eq!(report.stats.pages_written, 4);
    let expected: BTreeSet<String> = [
        "Scan.png",
        "doc.png",
        "doc_page_2.png",
        "doc_page_3.png",
        "notes.txt",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    assert_eq!(listing(&dir), expected);

    // 72 DPI: one pixel per point, RGB without alpha.
    let img = image::open(dir.path().join("doc.png")).unwrap();
    assert_eq!((img.width(), img.height()), (200, 100));
    assert_eq!(img.color(), image::ColorType::Rgb8);
}

#[test]
fn test_dpi_scales_output() {
    e2e_skip_unless_enabled!();

    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("page.pdf"), minimal_pdf(1, 100, 100)).unwrap();

    let config = ConversionConfig::builder().dpi(144).build().unwrap();
    convert_directory(dir.path(), &config).expect("conversion should succeed");

    let img = image::open(dir.path().join("page.png")).unwrap();
    assert_eq!((img.width(), img.height()), (200, 200));
}

#[test]
fn test_inspect_counts_pages() {
    e2e_skip_unless_enabled!();

    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("doc.pdf"), minimal_pdf(2, 100, 100)).unwrap();
    std::fs::write(dir.path().join("fake.pdf"), "not a pdf").unwrap();

    let plan = inspect_directory(dir.path(), &ConversionConfig::default())
        .expect("inspect should succeed");

    assert_eq!(plan.len(), 2);
    assert_eq!(plan[0].page_count, Some(2));
    assert!(plan[1].error.is_some());
    assert!(dir.path().join("doc.pdf").exists());
}
