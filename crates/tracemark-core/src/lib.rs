//! tracemark-core - Raster data structures for stroke scoring
//!
//! - [`Pix`] / [`PixMut`] - packed rasters: 1-bpp masks, 8-bpp gray,
//!   32-bpp RGBA drawings
//! - [`Box`] - ink bounding boxes and paste rectangles
//! - [`FPix`] - `f32` fields, used for distance transforms
//!
//! Binary masks are 1-bpp `Pix` values with ink bits set to 1.

pub mod box_;
pub mod error;
pub mod fpix;
pub mod pix;

pub use box_::Box;
pub use error::{Error, Result};
pub use fpix::FPix;
pub use pix::{Pix, PixMut, PixelDepth, PixelOp, RopOp};

/// Packing of 32-bpp pixels as `0xRRGGBBAA`
pub mod color {
    /// Pack red, green, blue and alpha
    #[inline]
    pub fn compose_rgba(r: u8, g: u8, b: u8, a: u8) -> u32 {
        u32::from_be_bytes([r, g, b, a])
    }

    /// Pack an opaque color
    #[inline]
    pub fn compose_rgb(r: u8, g: u8, b: u8) -> u32 {
        compose_rgba(r, g, b, 255)
    }

    /// Unpack into (r, g, b, a)
    #[inline]
    pub fn extract_rgba(pixel: u32) -> (u8, u8, u8, u8) {
        let [r, g, b, a] = pixel.to_be_bytes();
        (r, g, b, a)
    }

    /// Alpha byte of a packed pixel
    #[inline]
    pub fn alpha(pixel: u32) -> u8 {
        pixel.to_be_bytes()[3]
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_compose_extract() {
            let pixel = compose_rgba(10, 20, 30, 40);
            assert_eq!(pixel, 0x0a14_1e28);
            assert_eq!(extract_rgba(pixel), (10, 20, 30, 40));
            assert_eq!(alpha(pixel), 40);
        }

        #[test]
        fn test_compose_rgb_is_opaque() {
            assert_eq!(extract_rgba(compose_rgb(1, 2, 3)), (1, 2, 3, 255));
        }
    }
}
