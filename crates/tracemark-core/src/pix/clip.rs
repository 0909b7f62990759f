//! Rectangle clipping and foreground bounding boxes

use super::{Pix, PixelDepth};
use crate::Box;
use crate::error::{Error, Result};

impl Pix {
    /// Copy out the `w x h` rectangle at (`x`, `y`)
    ///
    /// A rectangle running past the right or bottom edge is cut short.
    /// Depth and spp carry over.
    ///
    /// # Errors
    ///
    /// Fails on an empty rectangle or an origin outside the image.
    ///
    /// # Examples
    ///
    /// ```
    /// use tracemark_core::{Pix, PixelDepth};
    ///
    /// let pix = Pix::new(100, 80, PixelDepth::Bit1).unwrap();
    /// let clipped = pix.clip_rectangle(80, 60, 50, 50).unwrap();
    /// assert_eq!(clipped.width(), 20);
    /// assert_eq!(clipped.height(), 20);
    /// ```
    pub fn clip_rectangle(&self, x: u32, y: u32, w: u32, h: u32) -> Result<Pix> {
        if w == 0 || h == 0 {
            return Err(Error::InvalidParameter(format!(
                "empty clip rectangle {}x{}",
                w, h
            )));
        }

        let src_w = self.width();
        let src_h = self.height();
        if x >= src_w || y >= src_h {
            return Err(Error::InvalidParameter(format!(
                "clip origin ({}, {}) outside {}x{} image",
                x, y, src_w, src_h
            )));
        }

        let clip_w = w.min(src_w - x);
        let clip_h = h.min(src_h - y);

        let mut pixd = Pix::new(clip_w, clip_h, self.depth())?.to_mut();
        pixd.set_spp(self.spp());

        for dy in 0..clip_h {
            for dx in 0..clip_w {
                let val = self.get_pixel_unchecked(x + dx, y + dy);
                pixd.set_pixel_unchecked(dx, dy, val);
            }
        }

        Ok(pixd.into())
    }

    /// Tight box around the ink of a 1-bpp mask, `None` when blank
    ///
    /// Scans whole words, skipping empty ones.
    pub fn foreground_bbox(&self) -> Result<Option<Box>> {
        if self.depth() != PixelDepth::Bit1 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }

        let w = self.width();
        let h = self.height();

        // pad bits of the last word never count
        let leftover = w % 32;
        let end_mask: u32 = if leftover == 0 {
            0xFFFF_FFFF
        } else {
            !0u32 << (32 - leftover)
        };
        let masked = |row: &[u32], i: usize| -> u32 {
            if i + 1 == row.len() {
                row[i] & end_mask
            } else {
                row[i]
            }
        };

        let mut minx = u32::MAX;
        let mut maxx = 0u32;
        let mut miny = u32::MAX;
        let mut maxy = 0u32;

        for y in 0..h {
            let row = self.row_data(y);
            let first = (0..row.len()).find(|&i| masked(row, i) != 0);
            let Some(first) = first else {
                continue;
            };
            // Both searches succeed once `first` exists
            let last = (first..row.len())
                .rev()
                .find(|&i| masked(row, i) != 0)
                .unwrap_or(first);

            let left = first as u32 * 32 + masked(row, first).leading_zeros();
            let right = last as u32 * 32 + 31 - masked(row, last).trailing_zeros();

            minx = minx.min(left);
            maxx = maxx.max(right);
            miny = miny.min(y);
            maxy = y;
        }

        if miny == u32::MAX {
            return Ok(None);
        }

        Ok(Some(Box::new(
            minx as i32,
            miny as i32,
            (maxx - minx + 1) as i32,
            (maxy - miny + 1) as i32,
        )?))
    }

    /// Crop a 1-bpp mask to its ink, returning the crop and where it was
    pub fn clip_to_foreground(&self) -> Result<Option<(Pix, Box)>> {
        let Some(bbox) = self.foreground_bbox()? else {
            return Ok(None);
        };
        let clipped = self.clip_rectangle(
            bbox.x as u32,
            bbox.y as u32,
            bbox.w as u32,
            bbox.h as u32,
        )?;
        Ok(Some((clipped, bbox)))
    }
}
