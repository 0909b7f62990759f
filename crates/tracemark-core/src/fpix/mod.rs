//! FPix - Floating-point image
//!
//! `FPix` is a 2D array of `f32` values. Distance fields are stored in it,
//! and the scorer samples it at the foreground pixels of a binary mask.
//!
//! # Examples
//!
//! ```
//! use tracemark_core::FPix;
//!
//! let mut fpix = FPix::new(100, 100).unwrap();
//! fpix.set_pixel(10, 20, 0.5).unwrap();
//! assert_eq!(fpix.get_pixel(10, 20).unwrap(), 0.5);
//! ```

use crate::error::{Error, Result};
use crate::pix::{Pix, PixelDepth};

/// Floating-point image, row-major without padding
#[derive(Debug, Clone)]
pub struct FPix {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl FPix {
    /// A zero-filled field
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let len = (width as usize) * (height as usize);
        Self::from_data(width, height, vec![0.0; len])
    }

    /// Wrap row-major values
    ///
    /// # Errors
    ///
    /// Fails on a zero dimension, or when `data` does not hold exactly
    /// `width * height` values.
    pub fn from_data(width: u32, height: u32, data: Vec<f32>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let len = (width as usize) * (height as usize);
        if data.len() != len {
            return Err(Error::InvalidParameter(format!(
                "{} values for a {}x{} field",
                data.len(),
                width,
                height
            )));
        }

        Ok(FPix {
            width,
            height,
            data,
        })
    }

    /// Width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// (width, height)
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn index(&self, x: u32, y: u32) -> Result<usize> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                index: (y as usize) * (self.width as usize) + (x as usize),
                len: self.data.len(),
            });
        }
        Ok((y as usize) * (self.width as usize) + (x as usize))
    }

    /// Value at (x, y), or `IndexOutOfBounds`
    pub fn get_pixel(&self, x: u32, y: u32) -> Result<f32> {
        Ok(self.data[self.index(x, y)?])
    }

    /// Store a value at (x, y), or fail with `IndexOutOfBounds`
    pub fn set_pixel(&mut self, x: u32, y: u32, value: f32) -> Result<()> {
        let idx = self.index(x, y)?;
        self.data[idx] = value;
        Ok(())
    }

    /// Value at (x, y); panics outside the image
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> f32 {
        self.data[(y as usize) * (self.width as usize) + (x as usize)]
    }

    /// All values, row-major
    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Values of row `y`
    #[inline]
    pub fn row(&self, y: u32) -> &[f32] {
        let start = (y as usize) * (self.width as usize);
        &self.data[start..start + self.width as usize]
    }

    /// Sum and count of the values sampled at the foreground pixels of a
    /// 1-bpp mask.
    ///
    /// The sum is accumulated in `f64`.
    ///
    /// # Errors
    ///
    /// Returns an error if the mask is not 1 bpp or its size differs.
    pub fn masked_sum(&self, mask: &Pix) -> Result<(f64, u64)> {
        if mask.depth() != PixelDepth::Bit1 {
            return Err(Error::UnsupportedDepth(mask.depth().bits()));
        }
        if mask.width() != self.width || mask.height() != self.height {
            return Err(Error::DimensionMismatch {
                expected: (self.width, self.height),
                actual: (mask.width(), mask.height()),
            });
        }

        let mut sum = 0.0f64;
        let mut count = 0u64;
        for y in 0..self.height {
            let row = self.row(y);
            mask.for_each_fg_in_row(y, |x| {
                sum += f64::from(row[x as usize]);
                count += 1;
            });
        }
        Ok((sum, count))
    }

    /// Mean of the values at the foreground pixels of a 1-bpp mask.
    ///
    /// Returns `None` when the mask has no foreground.
    pub fn masked_mean(&self, mask: &Pix) -> Result<Option<f64>> {
        let (sum, count) = self.masked_sum(mask)?;
        if count == 0 {
            return Ok(None);
        }
        Ok(Some(sum / count as f64))
    }

    /// Render to an 8-bpp image, multiplying by `gain` and clipping to 255.
    ///
    /// Negative values clip to zero.
    pub fn to_pix_scaled(&self, gain: f32) -> Result<Pix> {
        let pix = Pix::new(self.width, self.height, PixelDepth::Bit8)?;
        let mut pm = pix.to_mut();
        for y in 0..self.height {
            for x in 0..self.width {
                let v = (self.get_pixel_unchecked(x, y) * gain).round();
                pm.set_pixel_unchecked(x, y, v.clamp(0.0, 255.0) as u32);
            }
        }
        Ok(pm.into())
    }
}
