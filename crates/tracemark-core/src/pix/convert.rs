//! Depth conversions and alpha extraction

use super::{Pix, PixelDepth};
use crate::color;
use crate::error::{Error, Result};

impl Pix {
    /// Extract the alpha channel of an RGBA image as an 8-bpp image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSupported`] if the image has no alpha channel.
    pub fn extract_alpha(&self) -> Result<Pix> {
        if !self.has_alpha() {
            return Err(Error::NotSupported(format!(
                "no alpha channel: {} bpp, spp {}",
                self.depth().bits(),
                self.spp()
            )));
        }

        let mut pixd = Pix::new(self.width(), self.height(), PixelDepth::Bit8)?.to_mut();
        for y in 0..self.height() {
            for x in 0..self.width() {
                let a = color::alpha(self.get_pixel_unchecked(x, y));
                pixd.set_pixel_unchecked(x, y, u32::from(a));
            }
        }
        Ok(pixd.into())
    }

    /// Binary mask of the pixels whose alpha exceeds `thresh`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSupported`] if the image has no alpha channel.
    pub fn alpha_mask(&self, thresh: u8) -> Result<Pix> {
        self.extract_alpha()?.threshold_above(u32::from(thresh))
    }

    /// Binary mask of the pixels of an 8-bpp image whose value exceeds
    /// `thresh`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDepth`] if the image is not 8 bpp.
    pub fn threshold_above(&self, thresh: u32) -> Result<Pix> {
        if self.depth() != PixelDepth::Bit8 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }

        let mut pixd = Pix::new(self.width(), self.height(), PixelDepth::Bit1)?.to_mut();
        for y in 0..self.height() {
            for x in 0..self.width() {
                if self.get_pixel_unchecked(x, y) > thresh {
                    pixd.set_pixel_unchecked(x, y, 1);
                }
            }
        }
        Ok(pixd.into())
    }

    /// Expand a 1-bpp image to 8 bpp, mapping 0 to `val0` and 1 to `val1`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDepth`] if the image is not 1 bpp.
    pub fn convert_1_to_8(&self, val0: u8, val1: u8) -> Result<Pix> {
        if self.depth() != PixelDepth::Bit1 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }

        let mut pixd = Pix::new(self.width(), self.height(), PixelDepth::Bit8)?.to_mut();
        for y in 0..self.height() {
            for x in 0..self.width() {
                let v = if self.get_pixel_unchecked(x, y) != 0 {
                    val1
                } else {
                    val0
                };
                pixd.set_pixel_unchecked(x, y, u32::from(v));
            }
        }
        Ok(pixd.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgba_with_alpha(alphas: &[u8]) -> Pix {
        let mut pm = Pix::new(alphas.len() as u32, 1, PixelDepth::Bit32)
            .unwrap()
            .to_mut();
        pm.set_spp(4);
        for (x, &a) in alphas.iter().enumerate() {
            pm.set_pixel(x as u32, 0, color::compose_rgba(0, 0, 0, a))
                .unwrap();
        }
        pm.into()
    }

    #[test]
    fn test_extract_alpha() {
        let pix = rgba_with_alpha(&[0, 10, 11, 255]);
        let alpha = pix.extract_alpha().unwrap();
        assert_eq!(alpha.depth(), PixelDepth::Bit8);
        assert_eq!(alpha.get_pixel(2, 0), Some(11));
    }

    #[test]
    fn test_alpha_mask_threshold_is_strict() {
        let pix = rgba_with_alpha(&[0, 10, 11, 255]);
        let mask = pix.alpha_mask(10).unwrap();
        assert_eq!(mask.foreground_points(), vec![(2, 0), (3, 0)]);
    }

    #[test]
    fn test_no_alpha_is_rejected() {
        let rgb = Pix::new(4, 4, PixelDepth::Bit32).unwrap();
        assert!(matches!(rgb.extract_alpha(), Err(Error::NotSupported(_))));
        let gray = Pix::new(4, 4, PixelDepth::Bit8).unwrap();
        assert!(gray.alpha_mask(10).is_err());
    }

    #[test]
    fn test_convert_1_to_8_roundtrip_threshold() {
        let mut pm = Pix::new(3, 3, PixelDepth::Bit1).unwrap().to_mut();
        pm.set_pixel(1, 1, 1).unwrap();
        let mask: Pix = pm.into();

        let gray = mask.convert_1_to_8(0, 255).unwrap();
        assert_eq!(gray.get_pixel(1, 1), Some(255));
        assert_eq!(gray.get_pixel(0, 0), Some(0));

        let back = gray.threshold_above(127).unwrap();
        assert_eq!(back.foreground_points(), vec![(1, 1)]);
    }
}
