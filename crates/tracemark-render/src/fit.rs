//! Fitting and centering reference text
//!
//! The reference is drawn at the largest integer pixel size whose ink fits
//! within `fill_fraction` of the canvas in both directions, then centered
//! on a square canvas.

use crate::font::resolve_font;
use crate::raster::FontRasterizer;
use crate::{RenderError, RenderResult};
use std::path::Path;
use tracemark_core::{Box, Pix, PixelDepth, RopOp};
use tracing::debug;

/// Rasterizes a line of text
pub trait TextRasterizer {
    /// Draw `text` at `px_size` pixels per em
    ///
    /// Returns a 1-bpp raster cropped to the ink, or `None` when nothing is
    /// drawn (for example, whitespace).
    fn rasterize(&self, text: &str, px_size: u32) -> RenderResult<Option<Pix>>;
}

/// Options for fitting reference text
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Largest share of the canvas the ink may cover along either axis
    pub fill_fraction: f64,
    /// First pixel size tried, as a fraction of the canvas size
    pub start_fraction: f64,
    /// Smallest pixel size tried
    pub min_size: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            fill_fraction: 0.9,
            start_fraction: 1.2,
            min_size: 1,
        }
    }
}

impl RenderOptions {
    /// Set the fill fraction
    pub fn with_fill_fraction(mut self, fraction: f64) -> Self {
        self.fill_fraction = fraction;
        self
    }

    /// Set the starting size fraction
    pub fn with_start_fraction(mut self, fraction: f64) -> Self {
        self.start_fraction = fraction;
        self
    }

    /// Set the smallest pixel size
    pub fn with_min_size(mut self, size: u32) -> Self {
        self.min_size = size;
        self
    }

    /// Check that the options are usable
    pub fn validate(&self) -> RenderResult<()> {
        if !(self.fill_fraction > 0.0 && self.fill_fraction <= 1.0) {
            return Err(RenderError::InvalidParameters(format!(
                "fill_fraction must be in (0, 1], got {}",
                self.fill_fraction
            )));
        }
        if !(self.start_fraction.is_finite() && self.start_fraction > 0.0) {
            return Err(RenderError::InvalidParameters(format!(
                "start_fraction must be positive, got {}",
                self.start_fraction
            )));
        }
        if self.min_size == 0 {
            return Err(RenderError::InvalidParameters(
                "min_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Text ink at its fitted size
#[derive(Debug, Clone)]
pub struct FittedText {
    /// Ink raster, cropped
    pub ink: Pix,
    /// Pixel size the ink was drawn at
    pub px_size: u32,
}

/// Find the largest pixel size at which `text` fits the canvas
///
/// Sizes from `min_size` to `start_fraction * canvas_size` are searched by
/// bisection, which finds the same size as shrinking one step at a time
/// because ink extent grows with size. If even `min_size` does not fit,
/// `min_size` is used.
///
/// # Errors
///
/// Returns [`RenderError::EmptyText`] when the text draws no ink.
pub fn fit_text<R: TextRasterizer + ?Sized>(
    rasterizer: &R,
    text: &str,
    canvas_size: u32,
    options: &RenderOptions,
) -> RenderResult<FittedText> {
    options.validate()?;
    if text.trim().is_empty() {
        return Err(RenderError::EmptyText(text.to_string()));
    }

    let limit = options.fill_fraction * f64::from(canvas_size);
    let fits = |ink: &Option<Pix>| match ink {
        Some(pix) => f64::from(pix.width()) <= limit && f64::from(pix.height()) <= limit,
        None => true,
    };

    let start = ((options.start_fraction * f64::from(canvas_size)).round() as u32)
        .max(options.min_size);
    let mut hi = start;
    let mut best = rasterizer.rasterize(text, hi)?;
    let mut best_size = hi;

    if !fits(&best) {
        let mut lo = options.min_size;
        let lo_ink = rasterizer.rasterize(text, lo)?;
        best = lo_ink;
        best_size = lo;
        if fits(&best) {
            // lo fits and hi does not
            while hi - lo > 1 {
                let mid = lo + (hi - lo) / 2;
                let ink = rasterizer.rasterize(text, mid)?;
                if fits(&ink) {
                    lo = mid;
                    best = ink;
                    best_size = mid;
                } else {
                    hi = mid;
                }
            }
        }
    }

    let ink = best.ok_or_else(|| RenderError::EmptyText(text.to_string()))?;
    debug!(
        "Fitted {:?} at {} px: ink {}x{} within {:.1}",
        text,
        best_size,
        ink.width(),
        ink.height(),
        limit
    );
    Ok(FittedText {
        ink,
        px_size: best_size,
    })
}

/// A reference text mask on a square canvas
#[derive(Debug, Clone)]
pub struct RenderedText {
    /// 1-bpp `canvas_size x canvas_size` mask
    pub mask: Pix,
    /// Pixel size the text was drawn at
    pub px_size: u32,
}

/// Fit `text` and center its ink on a `canvas_size` square
pub fn render_text<R: TextRasterizer + ?Sized>(
    rasterizer: &R,
    text: &str,
    canvas_size: u32,
    options: &RenderOptions,
) -> RenderResult<RenderedText> {
    let fitted = fit_text(rasterizer, text, canvas_size, options)?;
    let mut canvas = Pix::new(canvas_size, canvas_size, PixelDepth::Bit1)?.to_mut();
    let side = canvas_size as i32;
    let dest = Box::centered_in(fitted.ink.width() as i32, fitted.ink.height() as i32, side, side);
    canvas.paste(&fitted.ink, dest.x, dest.y, RopOp::Src)?;
    Ok(RenderedText {
        mask: canvas.into(),
        px_size: fitted.px_size,
    })
}

/// Render reference text with the font at `font_path`
///
/// A font that cannot be loaded, or that lacks glyphs for `text`, is
/// replaced by the default font. Text that neither can draw fails with
/// [`RenderError::MissingGlyphs`].
pub fn render_reference(
    text: &str,
    font_path: impl AsRef<Path>,
    canvas_size: u32,
    options: &RenderOptions,
) -> RenderResult<RenderedText> {
    let font = resolve_font(font_path, text)?;
    render_text(&FontRasterizer::new(font)?, text, canvas_size, options)
}
