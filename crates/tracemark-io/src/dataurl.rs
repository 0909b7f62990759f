//! Data-URL decoding
//!
//! Canvas drawings arrive as `data:image/png;base64,<payload>`. The header
//! is optional: a bare base64 payload is accepted too.

use crate::{IoError, IoResult};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

/// A decoded data URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    /// Media type from the header (e.g. `image/png`), if a header was present
    pub mime: Option<String>,
    /// Decoded payload bytes
    pub data: Vec<u8>,
}

impl DataUrl {
    /// Parse a data URL or a bare base64 payload.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::InvalidData`] if the header is not a base64 data
    /// URL or the payload is not valid base64.
    pub fn parse(input: &str) -> IoResult<Self> {
        let input = input.trim();
        let (mime, payload) = match input.split_once(',') {
            Some((header, payload)) => {
                let media = header.strip_prefix("data:").ok_or_else(|| {
                    IoError::InvalidData("data URL must start with 'data:'".to_string())
                })?;
                let mime = media.strip_suffix(";base64").ok_or_else(|| {
                    IoError::InvalidData("data URL payload is not base64 encoded".to_string())
                })?;
                let mime = (!mime.is_empty()).then(|| mime.to_string());
                (mime, payload)
            }
            None => (None, input),
        };

        let payload: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
        let data = BASE64
            .decode(payload.as_bytes())
            .map_err(|e| IoError::InvalidData(format!("invalid base64 payload: {}", e)))?;

        Ok(DataUrl { mime, data })
    }
}

/// Decode the payload of a data URL (or bare base64 string) into bytes.
pub fn decode_data_url(input: &str) -> IoResult<Vec<u8>> {
    DataUrl::parse(input).map(|url| url.data)
}

/// Encode bytes as a base64 data URL with the given media type.
pub fn encode_data_url(bytes: &[u8], mime: &str) -> String {
    format!("data:{};base64,{}", mime, BASE64.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_header() {
        let url = DataUrl::parse("data:image/png;base64,AQID").unwrap();
        assert_eq!(url.mime.as_deref(), Some("image/png"));
        assert_eq!(url.data, vec![1, 2, 3]);
    }

    #[test]
    fn test_parse_bare_payload() {
        assert_eq!(decode_data_url("AQID").unwrap(), vec![1, 2, 3]);
        assert_eq!(decode_data_url("AQ\nID ").unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(DataUrl::parse("data:image/png,AQID").is_err());
        assert!(DataUrl::parse("image/png;base64,AQID").is_err());
        assert!(DataUrl::parse("data:image/png;base64,@@@").is_err());
    }

    #[test]
    fn test_encode_then_parse() {
        let s = encode_data_url(&[0xff, 0x00], "image/png");
        assert!(s.starts_with("data:image/png;base64,"));
        assert_eq!(decode_data_url(&s).unwrap(), vec![0xff, 0x00]);
    }
}
