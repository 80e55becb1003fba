//! Format-sniffing raster decode to RGBA8.

use std::io::Cursor;

use image::{ImageError, ImageReader};
use thiserror::Error;

use crate::buffer::PixelBuffer;

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The file format is not recognized or supported.
    #[error("Unsupported image format")]
    UnsupportedFormat,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image data: {0}")]
    CorruptData(String),
}

impl From<ImageError> for DecodeError {
    fn from(err: ImageError) -> Self {
        match err {
            ImageError::Unsupported(_) => DecodeError::UnsupportedFormat,
            other => DecodeError::CorruptData(other.to_string()),
        }
    }
}

/// Decode image bytes into an RGBA pixel buffer.
///
/// # Errors
///
/// Returns `DecodeError::UnsupportedFormat` if the format can't be identified.
/// Returns `DecodeError::CorruptData` if the data is truncated or malformed.
pub fn decode_image(bytes: &[u8]) -> Result<PixelBuffer, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptData(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::UnsupportedFormat);
    }

    let img = reader.decode()?;
    Ok(PixelBuffer::from_rgba_image(img.into_rgba8()))
}
