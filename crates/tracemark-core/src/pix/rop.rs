//! Word-wise raster operations
//!
//! Masks are combined whole words at a time; pasting at an offset goes
//! pixel by pixel.

use super::{Pix, PixMut, PixelDepth};
use crate::error::{Error, Result};

/// How a source pixel combines with the destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RopOp {
    /// Source replaces destination
    Src,
    /// Source AND destination
    SrcAndDst,
    /// Source OR destination
    SrcOrDst,
    /// Destination AND (NOT source)
    Subtract,
}

impl RopOp {
    #[inline]
    fn apply(self, src: u32, dst: u32) -> u32 {
        match self {
            RopOp::Src => src,
            RopOp::SrcAndDst => src & dst,
            RopOp::SrcOrDst => src | dst,
            RopOp::Subtract => dst & !src,
        }
    }
}

fn check_compatible(a_w: u32, a_h: u32, a_d: PixelDepth, b: &Pix) -> Result<()> {
    if a_w != b.width() || a_h != b.height() {
        return Err(Error::DimensionMismatch {
            expected: (a_w, a_h),
            actual: (b.width(), b.height()),
        });
    }
    if a_d != b.depth() {
        return Err(Error::InvalidParameter(format!(
            "depth mismatch: {} bpp vs {} bpp",
            a_d.bits(),
            b.depth().bits()
        )));
    }
    Ok(())
}

impl Pix {
    /// Pixels set in `self` but not in `other`
    pub fn subtract(&self, other: &Pix) -> Result<Pix> {
        self.rop(other, RopOp::Subtract)
    }

    /// Combine with `other` as source and `self` as destination
    ///
    /// # Errors
    ///
    /// Both images must agree in size and depth.
    pub fn rop(&self, other: &Pix, op: RopOp) -> Result<Pix> {
        let mut pm = self.to_mut();
        pm.rop_inplace(other, op)?;
        Ok(pm.into())
    }
}

impl PixMut {
    /// Add the pixels of `other`
    pub fn or_inplace(&mut self, other: &Pix) -> Result<()> {
        self.rop_inplace(other, RopOp::SrcOrDst)
    }

    /// Combine with `other` in place
    pub fn rop_inplace(&mut self, other: &Pix, op: RopOp) -> Result<()> {
        check_compatible(self.width(), self.height(), self.depth(), other)?;
        for (dst, &src) in self.data_mut().iter_mut().zip(other.data()) {
            *dst = op.apply(src, *dst);
        }
        self.clear_pad_bits();
        Ok(())
    }

    /// Combine `src` into `self` with its top-left corner at (`dx`, `dy`)
    ///
    /// Parts of `src` off the destination are dropped. Depths must match.
    pub fn paste(&mut self, src: &Pix, dx: i32, dy: i32, op: RopOp) -> Result<()> {
        if src.depth() != self.depth() {
            return Err(Error::InvalidParameter(format!(
                "depth mismatch: {} bpp vs {} bpp",
                self.depth().bits(),
                src.depth().bits()
            )));
        }

        let dw = self.width() as i32;
        let dh = self.height() as i32;
        for sy in 0..src.height() as i32 {
            let y = dy + sy;
            if y < 0 || y >= dh {
                continue;
            }
            for sx in 0..src.width() as i32 {
                let x = dx + sx;
                if x < 0 || x >= dw {
                    continue;
                }
                let s = src.get_pixel_unchecked(sx as u32, sy as u32);
                let d = self.get_pixel_unchecked(x as u32, y as u32);
                self.set_pixel_unchecked(x as u32, y as u32, op.apply(s, d));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask(points: &[(u32, u32)]) -> Pix {
        let mut pm = Pix::new(40, 4, PixelDepth::Bit1).unwrap().to_mut();
        for &(x, y) in points {
            pm.set_pixel(x, y, 1).unwrap();
        }
        pm.into()
    }

    #[test]
    fn test_and_or_subtract() {
        let a = mask(&[(0, 0), (5, 1), (35, 2)]);
        let b = mask(&[(5, 1), (36, 3)]);

        assert_eq!(a.rop(&b, RopOp::SrcAndDst).unwrap().count_pixels(), 1);
        assert_eq!(a.rop(&b, RopOp::SrcOrDst).unwrap().count_pixels(), 4);

        let diff = a.subtract(&b).unwrap();
        assert_eq!(diff.count_pixels(), 2);
        assert_eq!(diff.get_pixel(5, 1), Some(0));
    }

    #[test]
    fn test_rop_size_mismatch() {
        let a = Pix::new(10, 10, PixelDepth::Bit1).unwrap();
        let b = Pix::new(11, 10, PixelDepth::Bit1).unwrap();
        assert!(a.rop(&b, RopOp::SrcOrDst).is_err());

        let c = Pix::new(10, 10, PixelDepth::Bit8).unwrap();
        assert!(a.rop(&c, RopOp::SrcOrDst).is_err());
    }

    #[test]
    fn test_paste_clipped() {
        let src = Pix::new(4, 4, PixelDepth::Bit1).unwrap();
        let mut sm = src.to_mut();
        sm.set_all();
        let src: Pix = sm.into();

        let mut dst = Pix::new(6, 6, PixelDepth::Bit1).unwrap().to_mut();
        dst.paste(&src, 4, -2, RopOp::SrcOrDst).unwrap();
        let dst: Pix = dst.into();

        // Only a 2x2 corner lands inside
        assert_eq!(dst.count_pixels(), 4);
        assert_eq!(dst.get_pixel(5, 1), Some(1));
        assert_eq!(dst.get_pixel(5, 2), Some(0));
    }
}
