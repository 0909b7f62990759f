//! PNG image format support
//!
//! Decoding normalizes every PNG flavor to 8-bit samples: palettes are
//! expanded to RGB, `tRNS` chunks to an alpha channel, and 16-bit samples
//! are stripped. Images with an alpha channel come back as 32-bpp with
//! `spp = 4`.

use crate::{IoError, IoResult};
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use std::io::{BufRead, Cursor, Seek, Write};
use tracemark_core::{Pix, PixelDepth, color};

/// Read a PNG image
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Pix> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::normalize_to_color8());
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let (color_type, bit_depth) = reader.output_color_type();
    if bit_depth != BitDepth::Eight {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported PNG output depth: {:?}",
            bit_depth
        )));
    }

    let (pix_depth, spp, samples) = match color_type {
        ColorType::Grayscale => (PixelDepth::Bit8, 1, 1),
        ColorType::GrayscaleAlpha => (PixelDepth::Bit32, 4, 2),
        ColorType::Rgb => (PixelDepth::Bit32, 3, 3),
        ColorType::Rgba => (PixelDepth::Bit32, 4, 4),
        ColorType::Indexed => {
            return Err(IoError::UnsupportedFormat(
                "indexed PNG was not expanded".to_string(),
            ));
        }
    };

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let width = output_info.width;
    let height = output_info.height;
    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];

    let mut pix_mut = Pix::new(width, height, pix_depth)?.to_mut();
    pix_mut.set_spp(spp);

    for y in 0..height {
        let row = &data[y as usize * bytes_per_row..][..width as usize * samples];
        for (x, px) in row.chunks_exact(samples).enumerate() {
            let val = match px {
                [g] => u32::from(*g),
                [g, a] => color::compose_rgba(*g, *g, *g, *a),
                [r, g, b] => color::compose_rgb(*r, *g, *b),
                [r, g, b, a] => color::compose_rgba(*r, *g, *b, *a),
                _ => unreachable!("chunks_exact yields {samples} samples"),
            };
            pix_mut.set_pixel_unchecked(x as u32, y, val);
        }
    }

    Ok(pix_mut.into())
}

/// Read a PNG image from an in-memory buffer
pub fn read_png_bytes(bytes: &[u8]) -> IoResult<Pix> {
    read_png(Cursor::new(bytes))
}

/// Write a PNG image
///
/// 1-bpp images are written as 1-bit grayscale with the bit values kept
/// as they are, 8-bpp as 8-bit grayscale, and 32-bpp as RGB or RGBA
/// depending on `spp`.
pub fn write_png<W: Write>(pix: &Pix, writer: W) -> IoResult<()> {
    let width = pix.width();
    let height = pix.height();

    let (color_type, bit_depth, bytes_per_row) = match pix.depth() {
        PixelDepth::Bit1 => (ColorType::Grayscale, BitDepth::One, width.div_ceil(8)),
        PixelDepth::Bit8 => (ColorType::Grayscale, BitDepth::Eight, width),
        PixelDepth::Bit32 if pix.spp() == 4 => (ColorType::Rgba, BitDepth::Eight, width * 4),
        PixelDepth::Bit32 => (ColorType::Rgb, BitDepth::Eight, width * 3),
    };
    let bytes_per_row = bytes_per_row as usize;

    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(color_type);
    encoder.set_depth(bit_depth);
    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;

    let mut data = vec![0u8; bytes_per_row * height as usize];
    for y in 0..height {
        let row = &mut data[y as usize * bytes_per_row..][..bytes_per_row];
        for x in 0..width {
            let val = pix.get_pixel_unchecked(x, y);
            let xi = x as usize;
            match color_type {
                ColorType::Grayscale if bit_depth == BitDepth::One => {
                    if val != 0 {
                        row[xi / 8] |= 1 << (7 - (xi % 8));
                    }
                }
                ColorType::Grayscale => row[xi] = val as u8,
                ColorType::Rgb => {
                    let (r, g, b, _) = color::extract_rgba(val);
                    row[xi * 3..xi * 3 + 3].copy_from_slice(&[r, g, b]);
                }
                _ => {
                    let (r, g, b, a) = color::extract_rgba(val);
                    row[xi * 4..xi * 4 + 4].copy_from_slice(&[r, g, b, a]);
                }
            }
        }
    }

    writer
        .write_image_data(&data)
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;
    writer
        .finish()
        .map_err(|e| IoError::EncodeError(format!("PNG finish error: {}", e)))?;
    Ok(())
}

/// Encode a PNG image into a byte vector
pub fn write_png_bytes(pix: &Pix) -> IoResult<Vec<u8>> {
    let mut out = Vec::new();
    write_png(pix, &mut out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_raw(width: u32, height: u32, color: ColorType, data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        {
            let mut encoder = Encoder::new(&mut out, width, height);
            encoder.set_color(color);
            encoder.set_depth(BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(data).unwrap();
        }
        out
    }

    #[test]
    fn test_read_rgba_has_alpha() {
        let bytes = encode_raw(2, 1, ColorType::Rgba, &[1, 2, 3, 4, 5, 6, 7, 8]);
        let pix = read_png_bytes(&bytes).unwrap();
        assert!(pix.has_alpha());
        assert_eq!(pix.get_rgba(1, 0), Some((5, 6, 7, 8)));
    }

    #[test]
    fn test_read_gray_alpha() {
        let bytes = encode_raw(1, 1, ColorType::GrayscaleAlpha, &[9, 200]);
        let pix = read_png_bytes(&bytes).unwrap();
        assert!(pix.has_alpha());
        assert_eq!(pix.get_rgba(0, 0), Some((9, 9, 9, 200)));
    }

    #[test]
    fn test_read_rgb_has_no_alpha() {
        let bytes = encode_raw(1, 1, ColorType::Rgb, &[1, 2, 3]);
        let pix = read_png_bytes(&bytes).unwrap();
        assert_eq!(pix.depth(), PixelDepth::Bit32);
        assert!(!pix.has_alpha());
    }

    #[test]
    fn test_read_garbage_fails() {
        let result = read_png_bytes(b"definitely not a png");
        assert!(matches!(result, Err(IoError::DecodeError(_))));
    }

    #[test]
    fn test_write_read_binary() {
        let mut pm = Pix::new(13, 3, PixelDepth::Bit1).unwrap().to_mut();
        pm.set_pixel(12, 2, 1).unwrap();
        let pix: Pix = pm.into();

        let bytes = write_png_bytes(&pix).unwrap();
        let back = read_png_bytes(&bytes).unwrap();
        // 1-bit gray expands to 8-bit samples on read
        assert_eq!(back.depth(), PixelDepth::Bit8);
        assert_eq!(back.get_pixel(12, 2), Some(255));
        assert_eq!(back.get_pixel(0, 0), Some(0));
    }
}
