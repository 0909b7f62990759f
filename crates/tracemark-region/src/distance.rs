//! Distance fields
//!
//! For every pixel of a 1-bpp mask, the distance to the nearest foreground
//! pixel. Foreground pixels have distance 0.
//!
//! The exact Euclidean transform is the separable lower envelope of
//! parabolas from Felzenszwalb & Huttenlocher, "Distance Transforms of
//! Sampled Functions" (2012): one pass down the columns and one along the
//! rows, each linear in the number of pixels.

use crate::{RegionError, RegionResult};
use tracemark_core::{FPix, Pix, PixelDepth};

/// Distance metric for [`distance_field`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceMetric {
    /// Exact Euclidean distance
    #[default]
    Euclidean,
    /// 3-4 chamfer distance divided by 3, an approximation of Euclidean
    /// distance within about 6%
    Chamfer,
}

/// Squared distance standing in for "no foreground on this line"
const FAR: f64 = 1e20;

/// Compute the distance field of a mask
///
/// # Errors
///
/// Returns [`RegionError::EmptyMask`] when the mask has no foreground,
/// since no finite distance exists.
pub fn distance_field(mask: &Pix, metric: DistanceMetric) -> RegionResult<FPix> {
    if mask.depth() != PixelDepth::Bit1 {
        return Err(RegionError::UnsupportedDepth {
            expected: "1-bpp binary",
            actual: mask.depth().bits(),
        });
    }
    if mask.count_pixels() == 0 {
        return Err(RegionError::EmptyMask);
    }

    let data = match metric {
        DistanceMetric::Euclidean => euclidean(mask),
        DistanceMetric::Chamfer => chamfer(mask),
    };
    Ok(FPix::from_data(mask.width(), mask.height(), data)?)
}

fn euclidean(mask: &Pix) -> Vec<f32> {
    let w = mask.width() as usize;
    let h = mask.height() as usize;
    let n = w.max(h);

    let mut sq = vec![FAR; w * h];
    for y in 0..h {
        mask.for_each_fg_in_row(y as u32, |x| sq[y * w + x as usize] = 0.0);
    }

    let mut f = vec![0f64; n];
    let mut d = vec![0f64; n];
    let mut v = vec![0usize; n];
    let mut z = vec![0f64; n + 1];

    for x in 0..w {
        for y in 0..h {
            f[y] = sq[y * w + x];
        }
        lower_envelope(&f[..h], &mut d[..h], &mut v, &mut z);
        for y in 0..h {
            sq[y * w + x] = d[y];
        }
    }
    for row in sq.chunks_mut(w) {
        f[..w].copy_from_slice(row);
        lower_envelope(&f[..w], &mut d[..w], &mut v, &mut z);
        row.copy_from_slice(&d[..w]);
    }

    sq.into_iter().map(|s| s.sqrt() as f32).collect()
}

/// One-dimensional squared distance transform of the sampled function `f`.
///
/// `v` and `z` are scratch buffers of at least `f.len()` and
/// `f.len() + 1` entries.
fn lower_envelope(f: &[f64], d: &mut [f64], v: &mut [usize], z: &mut [f64]) {
    let n = f.len();
    if n == 0 {
        return;
    }

    // abscissa where the parabola rooted at q overtakes the one at p
    let intersect = |q: usize, p: usize| {
        let (qf, pf) = (q as f64, p as f64);
        ((f[q] + qf * qf) - (f[p] + pf * pf)) / (2.0 * (qf - pf))
    };

    let mut k = 0usize;
    v[0] = 0;
    z[0] = f64::NEG_INFINITY;
    z[1] = f64::INFINITY;
    for q in 1..n {
        let mut s = intersect(q, v[k]);
        while s <= z[k] {
            k -= 1;
            s = intersect(q, v[k]);
        }
        k += 1;
        v[k] = q;
        z[k] = s;
        z[k + 1] = f64::INFINITY;
    }

    k = 0;
    for (q, out) in d.iter_mut().enumerate() {
        let qf = q as f64;
        while z[k + 1] < qf {
            k += 1;
        }
        let p = v[k] as f64;
        *out = (qf - p) * (qf - p) + f[v[k]];
    }
}

fn chamfer(mask: &Pix) -> Vec<f32> {
    const ORTH: u32 = 3;
    const DIAG: u32 = 4;
    let w = mask.width() as usize;
    let h = mask.height() as usize;

    let mut d = vec![u32::MAX / 2; w * h];
    for y in 0..h {
        mask.for_each_fg_in_row(y as u32, |x| d[y * w + x as usize] = 0);
    }

    for y in 0..h {
        for x in 0..w {
            let mut best = d[y * w + x];
            if x > 0 {
                best = best.min(d[y * w + x - 1] + ORTH);
            }
            if y > 0 {
                let up = (y - 1) * w;
                best = best.min(d[up + x] + ORTH);
                if x > 0 {
                    best = best.min(d[up + x - 1] + DIAG);
                }
                if x + 1 < w {
                    best = best.min(d[up + x + 1] + DIAG);
                }
            }
            d[y * w + x] = best;
        }
    }
    for y in (0..h).rev() {
        for x in (0..w).rev() {
            let mut best = d[y * w + x];
            if x + 1 < w {
                best = best.min(d[y * w + x + 1] + ORTH);
            }
            if y + 1 < h {
                let down = (y + 1) * w;
                best = best.min(d[down + x] + ORTH);
                if x + 1 < w {
                    best = best.min(d[down + x + 1] + DIAG);
                }
                if x > 0 {
                    best = best.min(d[down + x - 1] + DIAG);
                }
            }
            d[y * w + x] = best;
        }
    }

    d.into_iter().map(|v| v as f32 / ORTH as f32).collect()
}
