//! PDF rasterisation behind the [`PageRasterizer`] seam.
//!
//! The converter only needs three things from a rendering backend: open a
//! file, report its page count, and render page `i` to an image. Keeping that
//! behind a trait lets the directory logic (naming, overwrite, delete) be
//! tested without a pdfium shared library, and keeps pdfium's lifetimes out of
//! the converter.
//!
//! The production backend is [`PdfiumRasterizer`]. Pages are rendered at
//! `dpi / 72` scale and flattened to 8-bit RGB.

use crate::config::ConversionConfig;
use crate::error::{Pdf2PngError, RasterError};
use image::DynamicImage;
use pdfium_render::prelude::*;
use std::path::Path;
use tracing::debug;

/// A rendering backend able to open documents.
pub trait PageRasterizer {
    /// Open the document at `path`.
    fn open<'a>(&'a self, path: &Path) -> Result<Box<dyn RasterDocument + 'a>, RasterError>;
}

/// An opened document. Dropping it closes the underlying handle.
pub trait RasterDocument {
    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// Render the 0-indexed page `index`.
    fn render_page(&self, index: usize) -> Result<DynamicImage, RasterError>;
}

/// [`PageRasterizer`] backed by the pdfium library.
pub struct PdfiumRasterizer {
    pdfium: Pdfium,
    render_config: PdfRenderConfig,
}

impl PdfiumRasterizer {
    /// Wrap an already-bound pdfium instance.
    pub fn new(pdfium: Pdfium, scale: f32) -> Self {
        Self {
            pdfium,
            render_config: PdfRenderConfig::new().scale_page_by_factor(scale),
        }
    }

    /// Bind pdfium as described by `config` and render at its DPI.
    pub fn from_config(config: &ConversionConfig) -> Result<Self, Pdf2PngError> {
        let pdfium = crate::pdfium::bind_pdfium(config.pdfium_library_path.as_deref())?;
        Ok(Self::new(pdfium, config.render_scale()))
    }
}

impl PageRasterizer for PdfiumRasterizer {
    fn open<'a>(&'a self, path: &Path) -> Result<Box<dyn RasterDocument + 'a>, RasterError> {
        let document = self
            .pdfium
            .load_pdf_from_file(path, None)
            .map_err(|e| RasterError::new(format!("{:?}", e)))?;

        debug!(
            "Opened {} ({} pages)",
            path.display(),
            document.pages().len()
        );

        Ok(Box::new(PdfiumDocument {
            document,
            render_config: &self.render_config,
        }))
    }
}

struct PdfiumDocument<'a> {
    document: PdfDocument<'a>,
    render_config: &'a PdfRenderConfig,
}

impl RasterDocument for PdfiumDocument<'_> {
    fn page_count(&self) -> usize {
        self.document.pages().len() as usize
    }

    fn render_page(&self, index: usize) -> Result<DynamicImage, RasterError> {
        let page_index = u16::try_from(index)
            .map_err(|_| RasterError::new(format!("page index {index} exceeds pdfium limit")))?;

        let page = self
            .document
            .pages()
            .get(page_index)
            .map_err(|e| RasterError::new(format!("{:?}", e)))?;

        let bitmap = page
            .render_with_config(self.render_config)
            .map_err(|e| RasterError::new(format!("{:?}", e)))?;

        let image = DynamicImage::ImageRgb8(bitmap.as_image().into_rgb8());
        debug!(
            "Rendered page {} → {}x{} px",
            index + 1,
            image.width(),
            image.height()
        );

        Ok(image)
    }
}
