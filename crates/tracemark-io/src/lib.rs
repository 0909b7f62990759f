//! tracemark-io - Image input/output
//!
//! Drawings are uploaded as PNG, usually wrapped in a base64 data URL.
//! This crate decodes both layers into a [`Pix`] and writes masks back out
//! as PNG for inspection.

mod dataurl;
mod error;
pub mod png;

pub use dataurl::{DataUrl, decode_data_url, encode_data_url};
pub use error::{IoError, IoResult};
pub use png::{read_png, read_png_bytes, write_png, write_png_bytes};

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracemark_core::Pix;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

/// Image file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageFormat {
    /// Unknown or unrecognized format
    #[default]
    Unknown,
    /// PNG format
    Png,
}

/// Detect the image format from the leading bytes.
pub fn detect_format(bytes: &[u8]) -> ImageFormat {
    if bytes.starts_with(&PNG_SIGNATURE) {
        ImageFormat::Png
    } else {
        ImageFormat::Unknown
    }
}

/// Decode an encoded image held in memory.
///
/// # Errors
///
/// Returns [`IoError::DecodeError`] for bytes without a PNG signature
/// (empty and truncated input included) and for corrupt PNG data.
pub fn read_image_bytes(bytes: &[u8]) -> IoResult<Pix> {
    match detect_format(bytes) {
        ImageFormat::Png => read_png_bytes(bytes),
        ImageFormat::Unknown => Err(IoError::DecodeError(format!(
            "unrecognized image signature ({} bytes)",
            bytes.len()
        ))),
    }
}

/// Read an image from a file path.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Pix> {
    let file = File::open(path)?;
    read_png(BufReader::new(file))
}

/// Write an image to a file path as PNG.
pub fn write_image<P: AsRef<Path>>(pix: &Pix, path: P) -> IoResult<()> {
    let file = File::create(path)?;
    write_png(pix, BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_format() {
        assert_eq!(detect_format(&PNG_SIGNATURE), ImageFormat::Png);
        assert_eq!(detect_format(b"GIF89a"), ImageFormat::Unknown);
        assert_eq!(detect_format(&[]), ImageFormat::Unknown);
    }

    #[test]
    fn test_read_image_bytes_unknown() {
        let cases: [&[u8]; 3] = [b"\xff\xd8\xff\xe0", b"", &PNG_SIGNATURE[..3]];
        for bytes in cases {
            assert!(matches!(
                read_image_bytes(bytes),
                Err(IoError::DecodeError(_))
            ));
        }
    }
}
