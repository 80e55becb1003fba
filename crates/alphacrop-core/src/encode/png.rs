//! PNG encoding for export.
//!
//! This module provides PNG encoding using the `image` crate's PNG encoder.
//! Output is deterministic: the same buffer always encodes to the same bytes.

use image::codecs::png::PngEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;
use thiserror::Error;

use crate::buffer::PixelBuffer;

/// The eight magic bytes every PNG file starts with.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Errors that can occur during PNG encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// PNG encoding failed
    #[error("PNG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encode an RGBA pixel buffer to PNG bytes.
///
/// # Errors
///
/// Returns `EncodeError::InvalidDimensions` for zero-sized buffers, which PNG
/// cannot represent.
pub fn encode_png(buffer: &PixelBuffer) -> Result<Vec<u8>, EncodeError> {
    if buffer.is_empty() {
        return Err(EncodeError::InvalidDimensions {
            width: buffer.width(),
            height: buffer.height(),
        });
    }

    let mut out = Cursor::new(Vec::new());
    PngEncoder::new(&mut out)
        .write_image(
            buffer.as_bytes(),
            buffer.width(),
            buffer.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(out.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode_image;

    #[test]
    fn test_encode_png_signature() {
        let buf = PixelBuffer::new(4, 4, vec![128u8; 4 * 4 * 4]).unwrap();
        let png = encode_png(&buf).unwrap();
        assert_eq!(&png[..8], &PNG_SIGNATURE);
    }

    #[test]
    fn test_encode_placeholder() {
        let png = encode_png(&PixelBuffer::transparent_placeholder()).unwrap();
        let back = decode_image(&png).unwrap();
        assert_eq!((back.width(), back.height()), (1, 1));
        assert_eq!(back.as_bytes(), &[0, 0, 0, 0]);
    }

    #[test]
    fn test_encode_zero_width() {
        let buf = PixelBuffer::new(0, 3, vec![]).unwrap();
        assert!(matches!(
            encode_png(&buf),
            Err(EncodeError::InvalidDimensions { width: 0, height: 3 })
        ));
    }

    #[test]
    fn test_encode_non_square() {
        let wide = PixelBuffer::new(40, 3, vec![7u8; 40 * 3 * 4]).unwrap();
        let tall = PixelBuffer::new(3, 40, vec![7u8; 3 * 40 * 4]).unwrap();
        assert!(encode_png(&wide).is_ok());
        assert!(encode_png(&tall).is_ok());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
