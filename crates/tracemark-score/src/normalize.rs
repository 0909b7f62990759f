//! Input normalization
//!
//! Drawings and rendered references arrive at arbitrary sizes and offsets.
//! Both are brought into the same frame: the ink is cropped to its
//! bounding box, scaled uniformly so the longer side spans
//! `fill_fraction` of the canvas, and centered on an empty square canvas.

use crate::{ScoreOptions, ScoringError, ScoringResult};
use tracemark_core::{Box, Pix, PixelDepth, RopOp};
use tracemark_transform::{ScaleMethod, scale_to_size};
use tracing::debug;

/// Gray level separating ink from background after rescaling
const RETHRESHOLD: u32 = 127;

/// Normalize an RGBA drawing into a 1-bpp `canvas_size` square mask
///
/// Ink is every pixel with alpha above `alpha_threshold`. Returns
/// `Ok(None)` for a blank drawing.
///
/// # Errors
///
/// Returns [`ScoringError::UnsupportedInputFormat`] if the drawing has no
/// alpha channel.
pub fn normalize_drawing(pix: &Pix, options: &ScoreOptions) -> ScoringResult<Option<Pix>> {
    if !pix.has_alpha() {
        return Err(ScoringError::UnsupportedInputFormat(format!(
            "drawing has no alpha channel ({} bpp, {} samples per pixel)",
            pix.depth().bits(),
            pix.spp()
        )));
    }
    let mask = pix.alpha_mask(options.alpha_threshold)?;
    normalize_mask(&mask, options)
}

/// Normalize a 1-bpp mask into a `canvas_size` square mask
///
/// Returns `Ok(None)` if the mask has no foreground.
pub fn normalize_mask(mask: &Pix, options: &ScoreOptions) -> ScoringResult<Option<Pix>> {
    options.validate()?;
    if mask.depth() != PixelDepth::Bit1 {
        return Err(tracemark_core::Error::UnsupportedDepth(mask.depth().bits()).into());
    }
    let Some((crop, bbox)) = mask.clip_to_foreground()? else {
        return Ok(None);
    };

    let target = options.target_extent();
    let longer = crop.width().max(crop.height());
    let factor = f64::from(target) / f64::from(longer);
    let width = ((f64::from(crop.width()) * factor).round() as u32).clamp(1, target);
    let height = ((f64::from(crop.height()) * factor).round() as u32).clamp(1, target);

    let gray = crop.convert_1_to_8(0, 255)?;
    let scaled = scale_to_size(&gray, width, height, ScaleMethod::Auto)?;
    let mut ink = scaled.threshold_above(RETHRESHOLD)?;
    if ink.count_pixels() == 0 {
        // strokes thinner than a pixel after shrinking
        ink = scaled.threshold_above(0)?;
    }
    let Some((ink, _)) = ink.clip_to_foreground()? else {
        return Ok(None);
    };

    let n = options.canvas_size;
    let mut canvas = Pix::new(n, n, PixelDepth::Bit1)?.to_mut();
    let dest = Box::centered_in(ink.width() as i32, ink.height() as i32, n as i32, n as i32);
    canvas.paste(&ink, dest.x, dest.y, RopOp::Src)?;
    debug!(
        "Normalized ink {}x{} at ({}, {}) by {:.3} to {}x{} at ({}, {})",
        bbox.w,
        bbox.h,
        bbox.x,
        bbox.y,
        factor,
        ink.width(),
        ink.height(),
        dest.x,
        dest.y
    );
    Ok(Some(canvas.into()))
}
