//! RGBA pixel buffer with validated dimensions.
//!
//! A [`PixelBuffer`] is the unit every pipeline stage hands to the next one:
//! decode produces it, the scanner reads it, the extractor allocates a fresh
//! one and encode consumes it. The length invariant is checked once when the
//! buffer is built so per-pixel reads can index directly.

use thiserror::Error;

/// Bytes per RGBA pixel.
pub const CHANNELS: usize = 4;

/// Offset of the alpha byte inside a pixel.
const ALPHA: usize = 3;

/// Errors raised by buffer construction and coordinate access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
    /// Pixel data length doesn't match `width * height * 4`.
    #[error("Invalid buffer: expected {expected} bytes for {width}x{height} RGBA, got {actual}")]
    InvalidBuffer {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    /// Coordinate lies outside the buffer.
    #[error("Pixel ({x}, {y}) is out of bounds for a {width}x{height} buffer")]
    OutOfBounds { x: u32, y: u32, width: u32, height: u32 },
}

/// A decoded image with interleaved RGBA8 pixel data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    /// RGBA pixel data in row-major order (4 bytes per pixel).
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a buffer, validating that `data` holds exactly `width * height` pixels.
    ///
    /// Zero-sized buffers are accepted; they simply contain no pixels.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, BufferError> {
        let expected = byte_len(width, height);
        match expected {
            Some(expected) if expected == data.len() => Ok(Self {
                width,
                height,
                data,
            }),
            _ => Err(BufferError::InvalidBuffer {
                width,
                height,
                expected: expected.unwrap_or(usize::MAX),
                actual: data.len(),
            }),
        }
    }

    /// The canonical 1x1 fully transparent buffer.
    ///
    /// Stands in for the crop of an image that has no visible pixel at all.
    pub fn transparent_placeholder() -> Self {
        Self {
            width: 1,
            height: 1,
            data: vec![0; CHANNELS],
        }
    }

    /// Create a PixelBuffer from an image::RgbaImage.
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            data: img.into_raw(),
        }
    }

    /// Convert to an image::RgbaImage for encoding.
    pub fn to_rgba_image(&self) -> Option<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume the buffer and return its RGBA bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Check if the buffer holds no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Alpha value of the pixel at `(x, y)`.
    pub fn alpha_at(&self, x: u32, y: u32) -> Result<u8, BufferError> {
        let idx = self.offset(x, y)?;
        Ok(self.data[idx + ALPHA])
    }

    /// All four channels of the pixel at `(x, y)`.
    pub fn pixel_at(&self, x: u32, y: u32) -> Result<[u8; 4], BufferError> {
        let idx = self.offset(x, y)?;
        let mut px = [0u8; CHANNELS];
        px.copy_from_slice(&self.data[idx..idx + CHANNELS]);
        Ok(px)
    }

    /// Iterate rows as byte slices, top to bottom.
    pub(crate) fn rows(&self) -> std::slice::ChunksExact<'_, u8> {
        // chunks_exact panics on a zero chunk size
        let stride = (self.width as usize * CHANNELS).max(1);
        self.data.chunks_exact(stride)
    }

    /// Byte offset of the first channel of a pixel.
    fn offset(&self, x: u32, y: u32) -> Result<usize, BufferError> {
        if x >= self.width || y >= self.height {
            return Err(BufferError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok((y as usize * self.width as usize + x as usize) * CHANNELS)
    }
}

/// `width * height * 4`, or `None` on overflow.
fn byte_len(width: u32, height: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(CHANNELS)
}
