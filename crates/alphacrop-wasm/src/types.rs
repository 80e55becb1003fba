//! WASM-compatible wrapper types for pixel data and rectangles.

use alphacrop_core::{BufferError, PixelBuffer, Rect};
use wasm_bindgen::prelude::*;

/// An RGBA pixel buffer wrapper for JavaScript.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy is made
/// to JavaScript memory as a `Uint8Array`.
#[wasm_bindgen]
pub struct JsPixelBuffer {
    inner: PixelBuffer,
}

#[wasm_bindgen]
impl JsPixelBuffer {
    /// Create a new JsPixelBuffer from dimensions and RGBA pixel data.
    ///
    /// Throws if `pixels.length != width * height * 4`, e.g. when handed the
    /// `data` of an `ImageData` with mismatched dimensions.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<JsPixelBuffer, JsValue> {
        Self::try_new(width, height, pixels).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// Get the number of bytes in the pixel buffer (width * height * 4)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.as_bytes().len()
    }

    /// Returns RGBA pixel data as Uint8Array (a copy).
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.as_bytes().to_vec()
    }

    /// Alpha value at `(x, y)`; throws when the coordinate is outside the image.
    pub fn alpha_at(&self, x: u32, y: u32) -> Result<u8, JsValue> {
        self.inner
            .alpha_at(x, y)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl JsPixelBuffer {
    pub(crate) fn try_new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, BufferError> {
        PixelBuffer::new(width, height, pixels).map(Self::from_buffer)
    }

    pub(crate) fn from_buffer(inner: PixelBuffer) -> Self {
        Self { inner }
    }

    pub(crate) fn buffer(&self) -> &PixelBuffer {
        &self.inner
    }
}

/// A crop rectangle in source pixel coordinates.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl From<Rect> for JsRect {
    fn from(rect: Rect) -> Self {
        Self {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
        }
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_constructor_rejects_bad_length() {
        assert!(JsPixelBuffer::new(2, 2, vec![0u8; 3]).is_err());
    }

    #[wasm_bindgen_test]
    fn test_alpha_at_out_of_bounds() {
        let img = JsPixelBuffer::new(1, 1, vec![0, 0, 0, 9]).unwrap();
        assert_eq!(img.alpha_at(0, 0).unwrap(), 9);
        assert!(img.alpha_at(1, 0).is_err());
    }
}
