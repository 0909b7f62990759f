//! Pixel access functions
//!
//! Low-level functions for getting and setting individual pixels.
//!
//! # Pixel packing
//!
//! Pixels are packed MSB-to-LSB within each 32-bit word. In a 1-bit image,
//! pixel 0 occupies bit 31 (MSB) of the first word; in an 8-bit image it
//! occupies bits 31..24.

use super::{Pix, PixMut, PixelDepth};
use crate::error::{Error, Result};

#[inline]
fn read_packed(data: &[u32], wpl: u32, depth: PixelDepth, x: u32, y: u32) -> u32 {
    let row = (y * wpl) as usize;
    match depth {
        PixelDepth::Bit1 => (data[row + (x >> 5) as usize] >> (31 - (x & 31))) & 1,
        PixelDepth::Bit8 => (data[row + (x >> 2) as usize] >> (8 * (3 - (x & 3)))) & 0xff,
        PixelDepth::Bit32 => data[row + x as usize],
    }
}

#[inline]
fn write_packed(data: &mut [u32], wpl: u32, depth: PixelDepth, x: u32, y: u32, val: u32) {
    let row = (y * wpl) as usize;
    match depth {
        PixelDepth::Bit1 => {
            let word = &mut data[row + (x >> 5) as usize];
            let shift = 31 - (x & 31);
            *word = (*word & !(1 << shift)) | ((val & 1) << shift);
        }
        PixelDepth::Bit8 => {
            let word = &mut data[row + (x >> 2) as usize];
            let shift = 8 * (3 - (x & 3));
            *word = (*word & !(0xff << shift)) | ((val & 0xff) << shift);
        }
        PixelDepth::Bit32 => data[row + x as usize] = val,
    }
}

impl Pix {
    /// Get a pixel value at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if the computed word index is outside the data.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        read_packed(self.data(), self.wpl(), self.depth(), x, y)
    }

    /// Get RGBA values at (x, y).
    ///
    /// Only valid for 32-bit images.
    pub fn get_rgba(&self, x: u32, y: u32) -> Option<(u8, u8, u8, u8)> {
        if self.depth() != PixelDepth::Bit32 {
            return None;
        }
        self.get_pixel(x, y).map(crate::color::extract_rgba)
    }

    /// Call `f(x)` for every foreground pixel in row `y` of a 1-bpp image.
    ///
    /// Zero words are skipped. Has no effect on other depths.
    pub fn for_each_fg_in_row(&self, y: u32, mut f: impl FnMut(u32)) {
        if self.depth() != PixelDepth::Bit1 {
            return;
        }
        let w = self.width();
        for (i, &word) in self.row_data(y).iter().enumerate() {
            let mut bits = word;
            while bits != 0 {
                let lead = bits.leading_zeros();
                let x = (i as u32) * 32 + lead;
                if x >= w {
                    break;
                }
                f(x);
                bits &= !(0x8000_0000u32 >> lead);
            }
        }
    }
}

impl PixMut {
    /// Get a pixel value at (x, y).
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get a pixel value without bounds checking.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        read_packed(self.data(), self.wpl(), self.depth(), x, y)
    }

    /// Set a pixel value at (x, y).
    ///
    /// The value is masked to the pixel depth.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, val: u32) -> Result<()> {
        if x >= self.width() || y >= self.height() {
            return Err(Error::IndexOutOfBounds {
                index: (y as usize) * (self.width() as usize) + (x as usize),
                len: (self.width() as usize) * (self.height() as usize),
            });
        }
        self.set_pixel_unchecked(x, y, val);
        Ok(())
    }

    /// Set a pixel value without bounds checking.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, val: u32) {
        let wpl = self.wpl();
        let depth = self.depth();
        write_packed(self.data_mut(), wpl, depth, x, y, val);
    }
}
