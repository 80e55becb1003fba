//! Content-aware cropping: find the visible region of an RGBA image and cut
//! it out.
//!
//! # Coordinate System
//!
//! - Rectangles are in pixel coordinates of the source buffer
//! - Origin is the top-left corner
//! - A pixel is visible when its alpha is greater than zero
//!
//! # Degenerate input
//!
//! An image without a single visible pixel has no bounding box.
//! [`crop_to_content`] returns the 1x1 transparent placeholder for it instead of
//! calling the extractor.

mod extract;
mod scan;

pub use extract::extract_rect;
pub use scan::scan_bounds;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::buffer::PixelBuffer;

/// Errors from rectangle extraction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CropError {
    /// The rectangle is empty or not contained in the source buffer.
    #[error("Rectangle {rect} is not contained in a {width}x{height} buffer")]
    RectangleOutOfBounds { rect: Rect, width: u32, height: u32 },
}

/// An axis-aligned pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge, `None` on overflow.
    pub fn right(&self) -> Option<u32> {
        self.x.checked_add(self.width)
    }

    /// Exclusive bottom edge, `None` on overflow.
    pub fn bottom(&self) -> Option<u32> {
        self.y.checked_add(self.height)
    }

    /// Check that the rectangle is non-empty and lies inside `width` x `height`.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.width > 0
            && self.height > 0
            && self.right().is_some_and(|r| r <= width)
            && self.bottom().is_some_and(|b| b <= height)
    }

    /// Check if the pixel `(x, y)` lies inside the rectangle.
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x
            && y >= self.y
            && self.right().is_some_and(|r| x < r)
            && self.bottom().is_some_and(|b| y < b)
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}, {}x{}]", self.x, self.y, self.width, self.height)
    }
}

/// Crop a buffer to its visible content.
///
/// Returns the detected rectangle alongside the cropped buffer. When the image
/// is fully transparent the rectangle is `None` and the buffer is
/// [`PixelBuffer::transparent_placeholder`].
pub fn crop_to_content(buffer: &PixelBuffer) -> Result<(Option<Rect>, PixelBuffer), CropError> {
    match scan_bounds(buffer) {
        Some(rect) => Ok((Some(rect), extract_rect(buffer, rect)?)),
        None => Ok((None, PixelBuffer::transparent_placeholder())),
    }
}
