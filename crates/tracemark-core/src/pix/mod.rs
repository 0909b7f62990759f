//! Packed rasters
//!
//! A [`Pix`] is one of three kinds of image: a 1-bpp ink mask, an 8-bpp
//! gray working image, or a 32-bpp RGBA drawing.
//!
//! Rows are arrays of `u32` words, each row padded to a whole word.
//! Within a word the leftmost pixel sits in the high bits. A 32-bpp pixel
//! is `0xRRGGBBAA`.
//!
//! `Pix` shares its buffer through an `Arc`, so clones are cheap. Edits go
//! through [`PixMut`]: take one with [`Pix::to_mut`] (always copies) or
//! [`Pix::into_mut`] (copies only if shared), then turn it back with
//! `.into()`.

mod access;
mod clip;
pub mod convert;
pub mod graphics;
pub mod rop;
mod statistics;

pub use graphics::PixelOp;
pub use rop::RopOp;

use crate::error::{Error, Result};
use std::ops::Range;
use std::sync::Arc;

/// Bits per pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum PixelDepth {
    /// Ink mask
    Bit1 = 1,
    /// Gray
    Bit8 = 8,
    /// RGB or RGBA
    Bit32 = 32,
}

impl PixelDepth {
    /// Number of bits per pixel
    #[inline]
    pub fn bits(self) -> u32 {
        self as u32
    }

    /// Value with every bit of a pixel set
    #[inline]
    pub fn max_value(self) -> u32 {
        match self {
            PixelDepth::Bit32 => u32::MAX,
            d => (1 << d.bits()) - 1,
        }
    }
}

#[derive(Debug, Clone)]
struct Raster {
    width: u32,
    height: u32,
    depth: PixelDepth,
    /// 1 for masks and gray, 3 for RGB, 4 for RGBA
    spp: u32,
    /// Words per row
    wpl: u32,
    words: Vec<u32>,
}

impl Raster {
    fn zeroed(width: u32, height: u32, depth: PixelDepth, spp: u32) -> Self {
        // at most 32 bpp, so a row never needs more words than pixels
        let wpl = (u64::from(width) * u64::from(depth.bits())).div_ceil(32) as u32;
        Raster {
            width,
            height,
            depth,
            spp,
            wpl,
            words: vec![0; wpl as usize * height as usize],
        }
    }

    #[inline]
    fn row(&self, y: u32) -> Range<usize> {
        let start = y as usize * self.wpl as usize;
        start..start + self.wpl as usize
    }
}

/// Shared, read-only raster
///
/// # Examples
///
/// ```
/// use tracemark_core::{Pix, PixelDepth};
///
/// let pix = Pix::new(256, 256, PixelDepth::Bit1).unwrap();
/// assert_eq!(pix.width(), 256);
/// assert_eq!(pix.wpl(), 8);
/// ```
#[derive(Debug, Clone)]
pub struct Pix {
    inner: Arc<Raster>,
}

impl Pix {
    /// A blank raster; 32-bpp rasters start as RGB (`spp == 3`)
    ///
    /// # Errors
    ///
    /// Fails with [`Error::InvalidDimension`] on a zero width or height.
    pub fn new(width: u32, height: u32, depth: PixelDepth) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let spp = if depth == PixelDepth::Bit32 { 3 } else { 1 };
        Ok(Pix {
            inner: Arc::new(Raster::zeroed(width, height, depth, spp)),
        })
    }

    /// Width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Bits per pixel
    #[inline]
    pub fn depth(&self) -> PixelDepth {
        self.inner.depth
    }

    /// Samples per pixel
    #[inline]
    pub fn spp(&self) -> u32 {
        self.inner.spp
    }

    /// Words per row
    #[inline]
    pub fn wpl(&self) -> u32 {
        self.inner.wpl
    }

    /// True for 32-bpp rasters with four samples
    #[inline]
    pub fn has_alpha(&self) -> bool {
        self.inner.depth == PixelDepth::Bit32 && self.inner.spp == 4
    }

    /// All words, row after row
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.words
    }

    /// Words of row `y`; panics past the last row
    #[inline]
    pub fn row_data(&self, y: u32) -> &[u32] {
        &self.inner.words[self.inner.row(y)]
    }

    /// A blank raster shaped like this one, `spp` included
    pub fn create_template(&self) -> Self {
        let r = &self.inner;
        Pix {
            inner: Arc::new(Raster::zeroed(r.width, r.height, r.depth, r.spp)),
        }
    }

    /// True when both rasters have the same width and height
    pub fn sizes_equal(&self, other: &Pix) -> bool {
        (self.width(), self.height()) == (other.width(), other.height())
    }

    /// Take the buffer for editing if no other `Pix` shares it
    ///
    /// Hands `self` back unchanged when the buffer is shared.
    pub fn try_into_mut(self) -> std::result::Result<PixMut, Self> {
        Arc::try_unwrap(self.inner)
            .map(|inner| PixMut { inner })
            .map_err(|inner| Pix { inner })
    }

    /// An editable copy
    pub fn to_mut(&self) -> PixMut {
        PixMut {
            inner: Raster::clone(&self.inner),
        }
    }

    /// Take the buffer for editing, copying it only when shared
    pub fn into_mut(self) -> PixMut {
        self.try_into_mut().unwrap_or_else(|shared| shared.to_mut())
    }
}

/// Editable raster, turned back into a [`Pix`] with `.into()`
#[derive(Debug)]
pub struct PixMut {
    inner: Raster,
}

impl PixMut {
    /// Width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Bits per pixel
    #[inline]
    pub fn depth(&self) -> PixelDepth {
        self.inner.depth
    }

    /// Samples per pixel
    #[inline]
    pub fn spp(&self) -> u32 {
        self.inner.spp
    }

    /// Words per row
    #[inline]
    pub fn wpl(&self) -> u32 {
        self.inner.wpl
    }

    /// Mark a 32-bpp raster as RGB (3) or RGBA (4)
    pub fn set_spp(&mut self, spp: u32) {
        self.inner.spp = spp;
    }

    /// All words, row after row
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.words
    }

    /// All words, writable
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u32] {
        &mut self.inner.words
    }

    /// Words of row `y`
    #[inline]
    pub fn row_data(&self, y: u32) -> &[u32] {
        &self.inner.words[self.inner.row(y)]
    }

    /// Words of row `y`, writable
    #[inline]
    pub fn row_data_mut(&mut self, y: u32) -> &mut [u32] {
        let range = self.inner.row(y);
        &mut self.inner.words[range]
    }

    /// Set every pixel to its maximum value
    pub fn set_all(&mut self) {
        self.inner.words.fill(u32::MAX);
        self.clear_pad_bits();
    }

    /// Zero the bits past the last pixel of each row
    pub fn clear_pad_bits(&mut self) {
        let used = (self.inner.width * self.inner.depth.bits()) % 32;
        if used == 0 {
            return;
        }
        let keep = u32::MAX << (32 - used);
        let wpl = self.inner.wpl as usize;
        for row in self.inner.words.chunks_exact_mut(wpl) {
            row[wpl - 1] &= keep;
        }
    }
}

impl From<PixMut> for Pix {
    fn from(pm: PixMut) -> Self {
        Pix {
            inner: Arc::new(pm.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_values() {
        assert_eq!(PixelDepth::Bit8.bits(), 8);
        assert_eq!(PixelDepth::Bit1.max_value(), 1);
        assert_eq!(PixelDepth::Bit8.max_value(), 0xff);
        assert_eq!(PixelDepth::Bit32.max_value(), u32::MAX);
    }

    #[test]
    fn test_new_gray() {
        let pix = Pix::new(100, 200, PixelDepth::Bit8).unwrap();
        assert_eq!((pix.width(), pix.height()), (100, 200));
        assert_eq!(pix.spp(), 1);
        // 800 bits per row
        assert_eq!(pix.wpl(), 25);
        assert!(!pix.has_alpha());
        assert!(pix.data().iter().all(|&w| w == 0));
    }

    #[test]
    fn test_new_zero_size() {
        assert!(Pix::new(0, 4, PixelDepth::Bit1).is_err());
        assert!(Pix::new(4, 0, PixelDepth::Bit32).is_err());
    }

    #[test]
    fn test_row_padding() {
        for (width, depth, wpl) in [
            (32, PixelDepth::Bit1, 1),
            (33, PixelDepth::Bit1, 2),
            (5, PixelDepth::Bit8, 2),
            (10, PixelDepth::Bit32, 10),
        ] {
            assert_eq!(Pix::new(width, 1, depth).unwrap().wpl(), wpl);
        }
    }

    #[test]
    fn test_clone_shares_data() {
        let pix1 = Pix::new(100, 100, PixelDepth::Bit8).unwrap();
        let pix2 = pix1.clone();
        assert_eq!(pix1.data().as_ptr(), pix2.data().as_ptr());

        let copy: Pix = pix1.to_mut().into();
        assert_ne!(pix1.data().as_ptr(), copy.data().as_ptr());
    }

    #[test]
    fn test_try_into_mut_unique() {
        let pix = Pix::new(16, 4, PixelDepth::Bit1).unwrap();
        let shared = pix.clone();
        let pix = pix.try_into_mut().unwrap_err();
        drop(shared);
        assert!(pix.try_into_mut().is_ok());
    }

    #[test]
    fn test_into_mut_copies_when_shared() {
        let pix1 = Pix::new(8, 8, PixelDepth::Bit1).unwrap();
        let mut pm = pix1.clone().into_mut();
        pm.set_pixel(3, 3, 1).unwrap();
        let pix2: Pix = pm.into();

        assert_eq!(pix1.get_pixel(3, 3), Some(0));
        assert_eq!(pix2.get_pixel(3, 3), Some(1));
    }

    #[test]
    fn test_set_all_clears_pad_bits() {
        let mut pm = Pix::new(33, 2, PixelDepth::Bit1).unwrap().to_mut();
        pm.set_all();
        assert_eq!(pm.row_data(0)[1], 0x8000_0000);
        let pix: Pix = pm.into();
        assert_eq!(pix.count_pixels(), 66);
    }

    #[test]
    fn test_template_keeps_alpha() {
        let mut pm = Pix::new(10, 10, PixelDepth::Bit32).unwrap().to_mut();
        pm.set_spp(4);
        pm.set_pixel(1, 1, u32::MAX).unwrap();
        let src: Pix = pm.into();

        let blank = src.create_template();
        assert!(blank.has_alpha());
        assert_eq!(blank.get_pixel(1, 1), Some(0));
        assert!(blank.sizes_equal(&src));
    }
}
