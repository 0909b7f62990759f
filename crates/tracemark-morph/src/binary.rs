//! Binary morphology
//!
//! The hit-miss transform works on whole 32-bit words: for every SEL
//! element the image is shifted by the element offset and ANDed into an
//! accumulator. Pixels outside the image are background.

use crate::{MorphError, MorphResult, Sel};
use tracemark_core::{Pix, PixelDepth};

pub(crate) fn check_binary(pix: &Pix) -> MorphResult<()> {
    if pix.depth() != PixelDepth::Bit1 {
        return Err(MorphError::UnsupportedDepth {
            expected: "1-bpp binary",
            actual: pix.depth().bits(),
        });
    }
    Ok(())
}

/// Mask of the valid bits in the last word of a row.
fn end_mask(width: u32) -> u32 {
    match width % 32 {
        0 => !0,
        leftover => !0 << (32 - leftover),
    }
}

/// Row-packed words of a 1-bpp image.
///
/// Bits past the right edge read as background: 0 in the plain plane and
/// 1 in the inverted plane.
struct Plane {
    words: Vec<u32>,
    wpl: usize,
    height: usize,
    fill: u32,
}

impl Plane {
    fn new(pix: &Pix, inverted: bool) -> Self {
        let wpl = pix.wpl() as usize;
        let mask = end_mask(pix.width());
        let mut words = pix.data().to_vec();
        for row in words.chunks_mut(wpl) {
            if inverted {
                row.iter_mut().for_each(|w| *w = !*w);
            }
            if let Some(last) = row.last_mut() {
                *last = if inverted { *last | !mask } else { *last & mask };
            }
        }
        Self {
            words,
            wpl,
            height: pix.height() as usize,
            fill: if inverted { !0 } else { 0 },
        }
    }

    /// Combine the plane, shifted so that output pixel (x, y) reads plane
    /// pixel (x + dx, y + dy), into `acc`.
    fn combine_shifted(&self, acc: &mut [u32], dx: i32, dy: i32, op: fn(u32, u32) -> u32) {
        let q = dx.div_euclid(32) as isize;
        let r = dx.rem_euclid(32) as u32;
        let fill_row = vec![self.fill; self.wpl];

        for (y, acc_row) in acc.chunks_mut(self.wpl).enumerate() {
            let sy = y as isize + dy as isize;
            let src = if sy >= 0 && (sy as usize) < self.height {
                &self.words[sy as usize * self.wpl..][..self.wpl]
            } else {
                &fill_row[..]
            };
            let word = |i: isize| {
                if i >= 0 && (i as usize) < src.len() {
                    src[i as usize]
                } else {
                    self.fill
                }
            };
            for (i, a) in acc_row.iter_mut().enumerate() {
                let i = i as isize + q;
                let shifted = if r == 0 {
                    word(i)
                } else {
                    (word(i) << r) | (word(i + 1) >> (32 - r))
                };
                *a = op(*a, shifted);
            }
        }
    }
}

fn finish(pix: &Pix, words: Vec<u32>) -> MorphResult<Pix> {
    let mut pm = pix.create_template().into_mut();
    pm.data_mut().copy_from_slice(&words);
    pm.clear_pad_bits();
    Ok(pm.into())
}

/// Hit-miss transform
///
/// A pixel is set when every hit of the SEL placed there lies on
/// foreground and every miss on background. Positions outside the image
/// are background.
pub fn hit_miss_transform(pix: &Pix, sel: &Sel) -> MorphResult<Pix> {
    check_binary(pix)?;
    if sel.hit_count() + sel.miss_count() == 0 {
        return Err(MorphError::InvalidSel(
            "hit-miss transform needs at least one hit or miss".to_string(),
        ));
    }

    let fg = Plane::new(pix, false);
    let mut acc = vec![!0u32; fg.words.len()];
    for (dx, dy) in sel.hit_offsets() {
        fg.combine_shifted(&mut acc, dx, dy, |a, s| a & s);
    }
    if sel.miss_count() > 0 {
        let bg = Plane::new(pix, true);
        for (dx, dy) in sel.miss_offsets() {
            bg.combine_shifted(&mut acc, dx, dy, |a, s| a & s);
        }
    }
    finish(pix, acc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracemark_test::synth::mask_from_points;

    #[test]
    fn test_hit_miss_isolated_pixels() {
        let sel = Sel::from_string("ooo\noCo\nooo").unwrap();
        let pix = mask_from_points(50, 6, &[(0, 0), (10, 3), (40, 2), (41, 2)]).unwrap();
        let out = hit_miss_transform(&pix, &sel).unwrap();
        // the corner pixel counts because outside is background
        assert_eq!(out.foreground_points(), vec![(0, 0), (10, 3)]);
    }

    #[test]
    fn test_hit_miss_across_word_boundary() {
        let sel = Sel::from_string("oCx").unwrap();
        let pix = mask_from_points(64, 1, &[(31, 0), (32, 0), (33, 0)]).unwrap();
        let out = hit_miss_transform(&pix, &sel).unwrap();
        assert_eq!(out.foreground_points(), vec![(31, 0)]);
    }

    #[test]
    fn test_rejects_non_binary() {
        let pix = Pix::new(4, 4, PixelDepth::Bit8).unwrap();
        let sel = Sel::from_string("xCx").unwrap();
        assert!(matches!(
            hit_miss_transform(&pix, &sel),
            Err(MorphError::UnsupportedDepth { actual: 8, .. })
        ));
        let empty = Sel::new(3, 3).unwrap();
        let bin = Pix::new(4, 4, PixelDepth::Bit1).unwrap();
        assert!(hit_miss_transform(&bin, &empty).is_err());
    }
}
