//! Foreground pixel statistics for binary images

use super::{Pix, PixelDepth};

impl Pix {
    /// Count foreground pixels in a 1-bpp image.
    ///
    /// Returns 0 for other depths. Padding bits are ignored.
    pub fn count_pixels(&self) -> u64 {
        if self.depth() != PixelDepth::Bit1 {
            return 0;
        }
        let leftover = self.width() % 32;
        let end_mask: u32 = if leftover == 0 {
            0xFFFF_FFFF
        } else {
            !0u32 << (32 - leftover)
        };

        let mut count = 0u64;
        for y in 0..self.height() {
            let row = self.row_data(y);
            let last = row.len() - 1;
            for (i, &word) in row.iter().enumerate() {
                let word = if i == last { word & end_mask } else { word };
                count += u64::from(word.count_ones());
            }
        }
        count
    }

    /// Coordinates of all foreground pixels of a 1-bpp image, in raster order.
    pub fn foreground_points(&self) -> Vec<(u32, u32)> {
        let mut points = Vec::new();
        for y in 0..self.height() {
            self.for_each_fg_in_row(y, |x| points.push((x, y)));
        }
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_pixels() {
        let mut pm = Pix::new(50, 3, PixelDepth::Bit1).unwrap().to_mut();
        pm.set_pixel(0, 0, 1).unwrap();
        pm.set_pixel(49, 2, 1).unwrap();
        pm.row_data_mut(1)[1] |= 0x0000_0001; // pad bit
        let pix: Pix = pm.into();
        assert_eq!(pix.count_pixels(), 2);
        assert_eq!(Pix::new(4, 4, PixelDepth::Bit8).unwrap().count_pixels(), 0);
    }

    #[test]
    fn test_foreground_points() {
        let mut pm = Pix::new(10, 10, PixelDepth::Bit1).unwrap().to_mut();
        pm.set_pixel(2, 4, 1).unwrap();
        pm.set_pixel(6, 4, 1).unwrap();
        let pix: Pix = pm.into();
        assert_eq!(pix.foreground_points(), vec![(2, 4), (6, 4)]);

        let empty = Pix::new(10, 10, PixelDepth::Bit1).unwrap();
        assert!(empty.foreground_points().is_empty());
    }
}
