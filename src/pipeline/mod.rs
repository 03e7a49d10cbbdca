//! Pipeline stages for directory conversion.
//!
//! Each submodule implements exactly one step, so each is testable on its own
//! and the rendering backend can be swapped without touching the others.
//!
//! ## Data Flow
//!
//! ```text
//! scan ──▶ render ──▶ naming ──▶ write ──▶ delete source
//! (*.pdf)  (pdfium)   (<base>…)  (atomic)  (convert.rs)
//! ```
//!
//! 1. [`scan`]   list the top-level `.pdf` files (any case) of the directory
//! 2. [`render`] open each PDF and rasterise its pages via [`render::PageRasterizer`]
//! 3. [`naming`] map page indices to `<base>.png` / `<base>_page_<n>.png`
//! 4. [`write`]  PNG-encode to a temp file and rename over the target

pub mod naming;
pub mod render;
pub mod scan;
pub mod write;
