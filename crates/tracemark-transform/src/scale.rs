//! Image scaling operations
//!
//! Scaling is separable: each axis gets its own set of resampling weights
//! and the image is filtered along rows, then along columns, in `f32`.
//!
//! - Sampling: nearest neighbor at the destination pixel center
//! - Linear: bilinear interpolation with centers aligned
//! - AreaMap: each destination pixel averages the source area it covers
//! - Auto: AreaMap on axes that shrink, Linear on axes that grow
//!
//! 8-bpp images support every method. 1-bpp images support sampling only;
//! scale their 0/255 expansion for anything smoother.

use crate::{TransformError, TransformResult};
use tracemark_core::{Pix, PixelDepth};

/// Scaling method to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScaleMethod {
    /// Nearest-neighbor sampling (fastest, pixelated results)
    Sampling,
    /// Bilinear interpolation (good for upscaling)
    Linear,
    /// Area mapping (best for downscaling, anti-aliased)
    AreaMap,
    /// Per-axis selection based on the scale factor
    #[default]
    Auto,
}

/// Resampling weights for one destination index: (source index, weight)
type Taps = Vec<(usize, f32)>;

fn axis_taps(src: u32, dst: u32, method: ScaleMethod) -> Vec<Taps> {
    let method = match method {
        ScaleMethod::Auto if dst < src => ScaleMethod::AreaMap,
        ScaleMethod::Auto => ScaleMethod::Linear,
        m => m,
    };
    let ratio = src as f64 / dst as f64;
    let last = (src - 1) as usize;

    (0..dst)
        .map(|i| {
            let i = i as f64;
            match method {
                ScaleMethod::Sampling => {
                    let s = (((i + 0.5) * ratio).floor() as usize).min(last);
                    vec![(s, 1.0)]
                }
                ScaleMethod::Linear => {
                    let pos = ((i + 0.5) * ratio - 0.5).clamp(0.0, last as f64);
                    let i0 = pos.floor() as usize;
                    let frac = (pos - i0 as f64) as f32;
                    if i0 >= last || frac == 0.0 {
                        vec![(i0, 1.0)]
                    } else {
                        vec![(i0, 1.0 - frac), (i0 + 1, frac)]
                    }
                }
                _ => {
                    let start = i * ratio;
                    let end = (i + 1.0) * ratio;
                    let first = start.floor() as usize;
                    let stop = (end.ceil() as usize).min(last + 1);
                    (first..stop)
                        .filter_map(|j| {
                            let lo = start.max(j as f64);
                            let hi = end.min(j as f64 + 1.0);
                            (hi > lo).then(|| (j, ((hi - lo) / ratio) as f32))
                        })
                        .collect()
                }
            }
        })
        .collect()
}

fn scale_gray(
    pix: &Pix,
    width: u32,
    height: u32,
    method: ScaleMethod,
) -> TransformResult<Pix> {
    let ws = pix.width() as usize;
    let hs = pix.height() as usize;
    let wd = width as usize;
    let x_taps = axis_taps(pix.width(), width, method);
    let y_taps = axis_taps(pix.height(), height, method);

    // Horizontal pass: hs rows of wd samples
    let mut tmp = vec![0f32; hs * wd];
    let mut src_row = vec![0f32; ws];
    for y in 0..hs {
        for (x, v) in src_row.iter_mut().enumerate() {
            *v = pix.get_pixel_unchecked(x as u32, y as u32) as f32;
        }
        let out = &mut tmp[y * wd..(y + 1) * wd];
        for (o, taps) in out.iter_mut().zip(&x_taps) {
            *o = taps.iter().map(|&(s, w)| src_row[s] * w).sum();
        }
    }

    // Vertical pass
    let mut pixd = Pix::new(width, height, PixelDepth::Bit8)?.to_mut();
    for (y, taps) in y_taps.iter().enumerate() {
        for x in 0..wd {
            let v: f32 = taps.iter().map(|&(s, w)| tmp[s * wd + x] * w).sum();
            let v = v.round().clamp(0.0, 255.0) as u32;
            pixd.set_pixel_unchecked(x as u32, y as u32, v);
        }
    }
    Ok(pixd.into())
}

fn sample_any(pix: &Pix, width: u32, height: u32) -> TransformResult<Pix> {
    let x_taps = axis_taps(pix.width(), width, ScaleMethod::Sampling);
    let y_taps = axis_taps(pix.height(), height, ScaleMethod::Sampling);

    let mut pixd = Pix::new(width, height, pix.depth())?.to_mut();
    pixd.set_spp(pix.spp());
    for (y, ty) in y_taps.iter().enumerate() {
        let sy = ty[0].0 as u32;
        for (x, tx) in x_taps.iter().enumerate() {
            let val = pix.get_pixel_unchecked(tx[0].0 as u32, sy);
            pixd.set_pixel_unchecked(x as u32, y as u32, val);
        }
    }
    Ok(pixd.into())
}

/// Scale an image to an exact size
///
/// # Errors
///
/// Returns an error if a target dimension is 0, or if a non-sampling
/// method is requested for a depth other than 8 bpp.
pub fn scale_to_size(
    pix: &Pix,
    width: u32,
    height: u32,
    method: ScaleMethod,
) -> TransformResult<Pix> {
    if width == 0 || height == 0 {
        return Err(TransformError::InvalidParameters(format!(
            "target size must be positive: {}x{}",
            width, height
        )));
    }

    match (pix.depth(), method) {
        (_, ScaleMethod::Sampling) => sample_any(pix, width, height),
        (PixelDepth::Bit8, _) => scale_gray(pix, width, height, method),
        (depth, _) => Err(TransformError::UnsupportedDepth(format!(
            "{:?} scaling requires 8 bpp, got {} bpp",
            method,
            depth.bits()
        ))),
    }
}

/// Scale an image by the given factors
///
/// Output dimensions are `round(w * scale_x)` by `round(h * scale_y)`,
/// at least 1.
pub fn scale(
    pix: &Pix,
    scale_x: f32,
    scale_y: f32,
    method: ScaleMethod,
) -> TransformResult<Pix> {
    if !(scale_x.is_finite() && scale_y.is_finite()) || scale_x <= 0.0 || scale_y <= 0.0 {
        return Err(TransformError::InvalidScaleFactor(format!(
            "{} x {}",
            scale_x, scale_y
        )));
    }
    let width = ((pix.width() as f32 * scale_x).round() as u32).max(1);
    let height = ((pix.height() as f32 * scale_y).round() as u32).max(1);
    scale_to_size(pix, width, height, method)
}

/// Scale an image using nearest-neighbor sampling
pub fn scale_by_sampling(pix: &Pix, scale_x: f32, scale_y: f32) -> TransformResult<Pix> {
    scale(pix, scale_x, scale_y, ScaleMethod::Sampling)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray_ramp(w: u32, h: u32) -> Pix {
        let mut pm = Pix::new(w, h, PixelDepth::Bit8).unwrap().to_mut();
        for y in 0..h {
            for x in 0..w {
                pm.set_pixel(x, y, (x * 255 / (w - 1).max(1)) as u32).unwrap();
            }
        }
        pm.into()
    }

    #[test]
    fn test_area_taps_sum_to_one() {
        for (src, dst) in [(10, 3), (7, 7), (256, 230), (3, 10)] {
            for taps in axis_taps(src, dst, ScaleMethod::AreaMap) {
                let sum: f32 = taps.iter().map(|t| t.1).sum();
                assert!((sum - 1.0).abs() < 1e-4, "{src}->{dst}: {sum}");
            }
        }
    }

    #[test]
    fn test_area_map_halving_averages() {
        let mut pm = Pix::new(4, 2, PixelDepth::Bit8).unwrap().to_mut();
        for (x, v) in [0, 255, 100, 100].into_iter().enumerate() {
            pm.set_pixel(x as u32, 0, v).unwrap();
            pm.set_pixel(x as u32, 1, v).unwrap();
        }
        let pix: Pix = pm.into();
        let out = scale_to_size(&pix, 2, 1, ScaleMethod::AreaMap).unwrap();
        assert_eq!(out.get_pixel(0, 0), Some(128));
        assert_eq!(out.get_pixel(1, 0), Some(100));
    }

    #[test]
    fn test_linear_upscale_preserves_constant() {
        let mut pm = Pix::new(3, 3, PixelDepth::Bit8).unwrap().to_mut();
        for y in 0..3 {
            for x in 0..3 {
                pm.set_pixel(x, y, 77).unwrap();
            }
        }
        let pix: Pix = pm.into();
        let out = scale(&pix, 4.0, 4.0, ScaleMethod::Linear).unwrap();
        assert_eq!((out.width(), out.height()), (12, 12));
        assert!((0..12).all(|x| out.get_pixel(x, 5) == Some(77)));
    }

    #[test]
    fn test_auto_keeps_ramp_monotone() {
        let pix = gray_ramp(40, 4);
        for w in [13, 90] {
            let out = scale_to_size(&pix, w, 4, ScaleMethod::Auto).unwrap();
            let row: Vec<u32> = (0..w).map(|x| out.get_pixel(x, 2).unwrap()).collect();
            assert!(row.windows(2).all(|p| p[0] <= p[1]), "{row:?}");
        }
    }

    #[test]
    fn test_sampling_binary() {
        let mut pm = Pix::new(4, 4, PixelDepth::Bit1).unwrap().to_mut();
        pm.set_pixel(3, 3, 1).unwrap();
        let pix: Pix = pm.into();
        let out = scale_by_sampling(&pix, 2.0, 2.0).unwrap();
        assert_eq!(out.depth(), PixelDepth::Bit1);
        assert_eq!(out.count_pixels(), 4);
        assert_eq!(out.get_pixel(7, 7), Some(1));
    }

    #[test]
    fn test_invalid_requests() {
        let pix = Pix::new(4, 4, PixelDepth::Bit1).unwrap();
        assert!(scale_to_size(&pix, 8, 8, ScaleMethod::Linear).is_err());
        assert!(scale_to_size(&pix, 0, 8, ScaleMethod::Sampling).is_err());
        assert!(scale(&pix, -1.0, 1.0, ScaleMethod::Sampling).is_err());
    }
}
