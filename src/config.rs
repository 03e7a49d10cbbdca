//! Configuration types for directory conversion.
//!
//! All conversion behaviour is controlled through [`ConversionConfig`], built
//! via its [`ConversionConfigBuilder`]. There are deliberately few knobs: the
//! naming rule and the delete-after-write contract are fixed, only the render
//! resolution, the failure policy and the pdfium location can change.

use crate::error::Pdf2PngError;
use crate::progress::ProgressCallback;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Default render resolution. 72 DPI renders one PDF point as one pixel.
pub const DEFAULT_DPI: u32 = 72;

/// Accepted DPI range.
pub const MIN_DPI: u32 = 36;
pub const MAX_DPI: u32 = 600;

/// Configuration for a directory conversion.
///
/// Built via [`ConversionConfig::builder()`] or using
/// [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use edgequake_pdf2png::{ConversionConfig, FailurePolicy};
///
/// let config = ConversionConfig::builder()
///     .dpi(144)
///     .failure_policy(FailurePolicy::Continue)
///     .build()
///     .unwrap();
/// assert_eq!(config.dpi, 144);
/// ```
#[derive(Clone)]
pub struct ConversionConfig {
    /// Rendering DPI used when rasterising each PDF page. Range: 36–600. Default: 72.
    ///
    /// At 72 DPI a US-Letter page becomes a 612 × 792 px image. Pages are
    /// always written as 8-bit RGB PNGs without an alpha channel.
    pub dpi: u32,

    /// What to do after a file fails. Default: [`FailurePolicy::Abort`].
    pub failure_policy: FailurePolicy,

    /// Explicit pdfium library file, or a directory containing it.
    ///
    /// When `None` the binding falls back to `PDFIUM_LIB_PATH`, then the
    /// executable's directory, then the system library path.
    pub pdfium_library_path: Option<PathBuf>,

    /// Optional per-file / per-page progress events.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            dpi: DEFAULT_DPI,
            failure_policy: FailurePolicy::default(),
            pdfium_library_path: None,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ConversionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionConfig")
            .field("dpi", &self.dpi)
            .field("failure_policy", &self.failure_policy)
            .field("pdfium_library_path", &self.pdfium_library_path)
            .field(
                "progress_callback",
                &self
                    .progress_callback
                    .as_ref()
                    .map(|_| "<dyn ConversionProgressCallback>"),
            )
            .finish()
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }

    /// Page scale factor handed to the renderer (`dpi / 72`).
    pub fn render_scale(&self) -> f32 {
        self.dpi as f32 / 72.0
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn dpi(mut self, dpi: u32) -> Self {
        self.config.dpi = dpi;
        self
    }

    pub fn failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.config.failure_policy = policy;
        self
    }

    pub fn pdfium_library_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.pdfium_library_path = Some(path.into());
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, Pdf2PngError> {
        let c = &self.config;
        if !(MIN_DPI..=MAX_DPI).contains(&c.dpi) {
            return Err(Pdf2PngError::InvalidConfig(format!(
                "DPI must be {MIN_DPI}–{MAX_DPI}, got {}",
                c.dpi
            )));
        }
        Ok(self.config)
    }
}

/// How the converter reacts when one PDF fails.
///
/// Whatever the policy, a failing file keeps its source PDF and any pages
/// already written for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FailurePolicy {
    /// Stop at the first failing file and return it as an error. (default)
    #[default]
    Abort,
    /// Record the failure in the report and move on to the next file.
    Continue,
}
