//! Progress-callback trait for per-file and per-page conversion events.
//!
//! Inject an [`Arc<dyn ConversionProgressCallback>`] via
//! [`crate::config::ConversionConfigBuilder::progress_callback`] to receive
//! events as the converter walks the directory. The CLI uses it to drive its
//! progress bar; library callers can forward events anywhere they like.
//!
//! # Example
//!
//! ```rust
//! use edgequake_pdf2png::{ConversionProgressCallback, ConversionConfig};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct PageCounter {
//!     pages: AtomicUsize,
//! }
//!
//! impl ConversionProgressCallback for PageCounter {
//!     fn on_page_written(&self, file_name: &str, page_num: usize, total_pages: usize) {
//!         self.pages.fetch_add(1, Ordering::SeqCst);
//!         eprintln!("{file_name}: page {page_num}/{total_pages}");
//!     }
//! }
//!
//! let config = ConversionConfig::builder()
//!     .progress_callback(Arc::new(PageCounter { pages: AtomicUsize::new(0) }))
//!     .build()
//!     .unwrap();
//! ```

use std::sync::Arc;

/// Called by the converter as it processes each candidate PDF.
///
/// Events arrive in order from a single thread. The `Send + Sync` bound only
/// lets a config holding the callback be shared across threads. All methods
/// default to no-ops.
pub trait ConversionProgressCallback: Send + Sync {
    /// Called once after the directory has been scanned.
    fn on_conversion_start(&self, total_files: usize) {
        let _ = total_files;
    }

    /// Called after a PDF was opened and its page count is known.
    fn on_file_start(&self, file_name: &str, total_pages: usize) {
        let _ = (file_name, total_pages);
    }

    /// Called after a page image has been written (1-indexed `page_num`).
    fn on_page_written(&self, file_name: &str, page_num: usize, total_pages: usize) {
        let _ = (file_name, page_num, total_pages);
    }

    /// Called after every page was written and the source PDF was deleted.
    fn on_file_complete(&self, file_name: &str, pages_written: usize) {
        let _ = (file_name, pages_written);
    }

    /// Called when a file fails to open, render, write or delete.
    fn on_file_error(&self, file_name: &str, error: &str) {
        let _ = (file_name, error);
    }

    /// Called once after every candidate was attempted.
    ///
    /// Not called when the run was aborted by a failing file.
    fn on_conversion_complete(&self, total_files: usize, converted: usize) {
        let _ = (total_files, converted);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl ConversionProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ConversionConfig`].
pub type ProgressCallback = Arc<dyn ConversionProgressCallback>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct TrackingCallback {
        files: AtomicUsize,
        pages: AtomicUsize,
        errors: AtomicUsize,
        converted: AtomicUsize,
    }

    impl ConversionProgressCallback for TrackingCallback {
        fn on_file_start(&self, _file_name: &str, _total_pages: usize) {
            self.files.fetch_add(1, Ordering::SeqCst);
        }

        fn on_page_written(&self, _file_name: &str, _page_num: usize, _total_pages: usize) {
            self.pages.fetch_add(1, Ordering::SeqCst);
        }

        fn on_file_error(&self, _file_name: &str, _error: &str) {
            self.errors.fetch_add(1, Ordering::SeqCst);
        }

        fn on_conversion_complete(&self, _total_files: usize, converted: usize) {
            self.converted.store(converted, Ordering::SeqCst);
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopProgressCallback;
        cb.on_conversion_start(2);
        cb.on_file_start("a.pdf", 3);
        cb.on_page_written("a.pdf", 1, 3);
        cb.on_file_complete("a.pdf", 3);
        cb.on_file_error("b.pdf", "cannot open");
        cb.on_conversion_complete(2, 1);
    }

    #[test]
    fn tracking_callback_receives_events() {
        let tracker = TrackingCallback::default();

        tracker.on_file_start("a.pdf", 2);
        tracker.on_page_written("a.pdf", 1, 2);
        tracker.on_page_written("a.pdf", 2, 2);
        tracker.on_file_start("b.pdf", 1);
        tracker.on_file_error("b.pdf", "page 1: rasterisation failed");
        tracker.on_conversion_complete(2, 1);

        assert_eq!(tracker.files.load(Ordering::SeqCst), 2);
        assert_eq!(tracker.pages.load(Ordering::SeqCst), 2);
        assert_eq!(tracker.errors.load(Ordering::SeqCst), 1);
        assert_eq!(tracker.converted.load(Ordering::SeqCst), 1);
    }
}
