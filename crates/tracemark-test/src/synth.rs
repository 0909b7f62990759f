//! Synthetic drawings
//!
//! Builds RGBA canvases the way a browser canvas produces them: a
//! transparent background with opaque black, round-capped strokes.

use crate::error::{TestError, TestResult};
use tracemark_core::{Pix, PixelDepth, PixelOp, RopOp, color};

/// Default stroke width of the drawing canvas
pub const CANVAS_LINE_WIDTH: u32 = 5;

/// A drawing made of polyline strokes
#[derive(Debug, Clone)]
pub struct Drawing {
    width: u32,
    height: u32,
    line_width: u32,
    strokes: Vec<Vec<(i32, i32)>>,
}

impl Drawing {
    /// Create an empty drawing on a `width x height` canvas
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            line_width: CANVAS_LINE_WIDTH,
            strokes: Vec::new(),
        }
    }

    /// Set the stroke width
    pub fn with_line_width(mut self, line_width: u32) -> Self {
        self.line_width = line_width;
        self
    }

    /// Add a polyline stroke
    pub fn stroke(mut self, points: &[(i32, i32)]) -> Self {
        self.strokes.push(points.to_vec());
        self
    }

    /// Copy of this drawing with every stroke shifted by (dx, dy)
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        let mut out = self.clone();
        for stroke in &mut out.strokes {
            for p in stroke.iter_mut() {
                *p = (p.0 + dx, p.1 + dy);
            }
        }
        out
    }

    /// Copy of this drawing scaled about the origin, line width included
    pub fn scaled(&self, factor: f64) -> Self {
        let mut out = self.clone();
        for stroke in &mut out.strokes {
            for p in stroke.iter_mut() {
                *p = (
                    (f64::from(p.0) * factor).round() as i32,
                    (f64::from(p.1) * factor).round() as i32,
                );
            }
        }
        out.line_width = ((f64::from(self.line_width) * factor).round() as u32).max(1);
        out
    }

    /// Rasterize the strokes into a 1-bpp mask
    pub fn to_mask(&self) -> TestResult<Pix> {
        let mut pm = Pix::new(self.width, self.height, PixelDepth::Bit1)
            .map_err(|e| TestError::Synth(e.to_string()))?
            .to_mut();
        for stroke in &self.strokes {
            pm.render_stroke(stroke, self.line_width, PixelOp::Set)
                .map_err(|e| TestError::Synth(e.to_string()))?;
        }
        Ok(pm.into())
    }

    /// Rasterize into an RGBA canvas with a transparent background
    pub fn to_pix(&self) -> TestResult<Pix> {
        rgba_from_mask(&self.to_mask()?)
    }

    /// Rasterize and encode as PNG
    pub fn to_png(&self) -> TestResult<Vec<u8>> {
        tracemark_io::write_png_bytes(&self.to_pix()?)
            .map_err(|e| TestError::Synth(e.to_string()))
    }

    /// Rasterize, encode as PNG and wrap in a data URL
    pub fn to_data_url(&self) -> TestResult<String> {
        Ok(tracemark_io::encode_data_url(&self.to_png()?, "image/png"))
    }
}

/// Paint a 1-bpp mask as opaque black on a transparent RGBA canvas
pub fn rgba_from_mask(mask: &Pix) -> TestResult<Pix> {
    let mut pm = Pix::new(mask.width(), mask.height(), PixelDepth::Bit32)
        .map_err(|e| TestError::Synth(e.to_string()))?
        .to_mut();
    pm.set_spp(4);
    let ink = color::compose_rgba(0, 0, 0, 255);
    for (x, y) in mask.foreground_points() {
        pm.set_pixel_unchecked(x, y, ink);
    }
    Ok(pm.into())
}

/// A 1-bpp mask with the given pixels set
pub fn mask_from_points(width: u32, height: u32, points: &[(u32, u32)]) -> TestResult<Pix> {
    let mut pm = Pix::new(width, height, PixelDepth::Bit1)
        .map_err(|e| TestError::Synth(e.to_string()))?
        .to_mut();
    for &(x, y) in points {
        pm.set_pixel(x, y, 1)
            .map_err(|e| TestError::Synth(e.to_string()))?;
    }
    Ok(pm.into())
}

/// Grow a mask by a `size x size` square, as a wider pen would draw it
///
/// Used to turn a one-pixel skeleton into a plausible user stroke.
pub fn thicken(mask: &Pix, size: u32) -> TestResult<Pix> {
    if size == 0 {
        return Err(TestError::Synth("pen size must be positive".to_string()));
    }
    let to_synth = |e: tracemark_core::Error| TestError::Synth(e.to_string());
    let lo = -((size / 2) as i32);
    let hi = lo + size as i32 - 1;

    let mut rows = mask.create_template().into_mut();
    for dx in lo..=hi {
        rows.paste(mask, dx, 0, RopOp::SrcOrDst).map_err(to_synth)?;
    }
    let rows: Pix = rows.into();
    let mut out = mask.create_template().into_mut();
    for dy in lo..=hi {
        out.paste(&rows, 0, dy, RopOp::SrcOrDst).map_err(to_synth)?;
    }
    Ok(out.into())
}

/// An opaque RGB PNG (no alpha channel) of the given size
pub fn opaque_rgb_png(width: u32, height: u32) -> TestResult<Vec<u8>> {
    let pix = Pix::new(width, height, PixelDepth::Bit32)
        .map_err(|e| TestError::Synth(e.to_string()))?;
    tracemark_io::write_png_bytes(&pix).map_err(|e| TestError::Synth(e.to_string()))
}
