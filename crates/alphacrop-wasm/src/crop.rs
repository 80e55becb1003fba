//! Single-image crop bindings.
//!
//! # Functions
//!
//! - [`find_crop_rect`] - Bounding box of the visible pixels, or `undefined`
//! - [`crop_to_content`] - Crop a decoded buffer to its visible pixels
//! - [`crop_image_bytes`] - Decode, crop and re-encode a file as PNG in one call
//!
//! # Example
//!
//! ```typescript
//! import { crop_image_bytes } from '@alphacrop/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const png = crop_image_bytes(bytes);
//! const url = URL.createObjectURL(new Blob([png], { type: 'image/png' }));
//! ```

use crate::types::{JsPixelBuffer, JsRect};
use alphacrop_core::{crop, ItemError, PngCodec, RasterCodec};
use wasm_bindgen::prelude::*;

/// Find the smallest rectangle containing every pixel with alpha > 0.
///
/// Returns `undefined` for a fully transparent image.
#[wasm_bindgen]
pub fn find_crop_rect(image: &JsPixelBuffer) -> Option<JsRect> {
    crop::scan_bounds(image.buffer()).map(JsRect::from)
}

/// Crop a buffer to its visible content.
///
/// A fully transparent image becomes a 1x1 transparent buffer.
#[wasm_bindgen]
pub fn crop_to_content(image: &JsPixelBuffer) -> Result<JsPixelBuffer, JsValue> {
    crop::crop_to_content(image.buffer())
        .map(|(_, cropped)| JsPixelBuffer::from_buffer(cropped))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Decode an image file, crop it to its visible content and encode it as PNG.
///
/// # Errors
///
/// Throws if the bytes are not a supported image or the PNG encode fails.
#[wasm_bindgen]
pub fn crop_image_bytes(bytes: &[u8]) -> Result<Vec<u8>, JsValue> {
    crop_bytes(bytes).map_err(|e| JsValue::from_str(&e.to_string()))
}

pub(crate) fn crop_bytes(bytes: &[u8]) -> Result<Vec<u8>, ItemError> {
    let codec = PngCodec;
    let decoded = codec.decode(bytes)?;
    let (_, cropped) = crop::crop_to_content(&decoded)?;
    Ok(codec.encode(&cropped)?)
}

/// Tests for crop bindings.
///
/// Functions returning `Result<T, JsValue>` only work on wasm32 targets, so
/// native tests exercise the inner helpers.
#[cfg(test)]
mod tests {
    use super::*;
    use alphacrop_core::decode::decode_image;
    use alphacrop_core::encode::encode_png;
    use alphacrop_core::PixelBuffer;

    fn sprite() -> PixelBuffer {
        // 4x3, visible pixels at (1, 1) and (2, 1)
        let mut data = vec![0u8; 4 * 3 * 4];
        data[(4 + 1) * 4..(4 + 1) * 4 + 4].copy_from_slice(&[255, 0, 0, 255]);
        data[(4 + 2) * 4..(4 + 2) * 4 + 4].copy_from_slice(&[0, 255, 0, 100]);
        PixelBuffer::new(4, 3, data).unwrap()
    }

    #[test]
    fn test_find_crop_rect() {
        let img = JsPixelBuffer::from_buffer(sprite());
        assert_eq!(
            find_crop_rect(&img),
            Some(JsRect {
                x: 1,
                y: 1,
                width: 2,
                height: 1
            })
        );
    }

    #[test]
    fn test_find_crop_rect_transparent() {
        let img = JsPixelBuffer::try_new(2, 2, vec![0u8; 16]).unwrap();
        assert_eq!(find_crop_rect(&img), None);
    }

    #[test]
    fn test_crop_bytes() {
        let png = encode_png(&sprite()).unwrap();
        let cropped = decode_image(&crop_bytes(&png).unwrap()).unwrap();
        assert_eq!((cropped.width(), cropped.height()), (2, 1));
        assert_eq!(cropped.as_bytes(), &[255, 0, 0, 255, 0, 255, 0, 100]);
    }

    #[test]
    fn test_crop_bytes_rejects_garbage() {
        assert!(matches!(crop_bytes(b"nope"), Err(ItemError::Decode(_))));
    }
}
