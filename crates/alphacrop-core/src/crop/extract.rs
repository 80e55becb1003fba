//! Sub-rectangle extraction.

use super::{CropError, Rect};
use crate::buffer::{PixelBuffer, CHANNELS};

/// Copy the pixels inside `rect` into a new buffer.
///
/// Output pixel `(i, j)` equals source pixel `(rect.x + i, rect.y + j)` with all
/// four channels unchanged. The rectangle must be non-empty and fully contained
/// in the source.
///
/// # Errors
///
/// Returns [`CropError::RectangleOutOfBounds`] if the rectangle is empty,
/// overflows, or extends past the source edges.
pub fn extract_rect(buffer: &PixelBuffer, rect: Rect) -> Result<PixelBuffer, CropError> {
    if !rect.fits_within(buffer.width(), buffer.height()) {
        return Err(out_of_bounds(buffer, rect));
    }

    let row_start = rect.x as usize * CHANNELS;
    let row_len = rect.width as usize * CHANNELS;
    let mut output = Vec::with_capacity(row_len * rect.height as usize);

    // Copy pixel data row by row
    for row in buffer
        .rows()
        .skip(rect.y as usize)
        .take(rect.height as usize)
    {
        output.extend_from_slice(&row[row_start..row_start + row_len]);
    }

    PixelBuffer::new(rect.width, rect.height, output).map_err(|_| out_of_bounds(buffer, rect))
}

fn out_of_bounds(buffer: &PixelBuffer, rect: Rect) -> CropError {
    CropError::RectangleOutOfBounds {
        rect,
        width: buffer.width(),
        height: buffer.height(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Create a test image where each pixel has a unique value based on position.
    fn test_image(width: u32, height: u32) -> PixelBuffer {
        let mut data = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                let v = ((y * width + x) % 256) as u8;
                data.extend_from_slice(&[v, v.wrapping_add(1), v.wrapping_add(2), 255]);
            }
        }
        PixelBuffer::new(width, height, data).unwrap()
    }

    #[test]
    fn test_full_extract() {
        let img = test_image(8, 6);
        let result = extract_rect(&img, Rect::new(0, 0, 8, 6)).unwrap();
        assert_eq!(result, img);
    }

    #[test]
    fn test_center_extract() {
        let img = test_image(10, 10);
        let result = extract_rect(&img, Rect::new(2, 3, 4, 5)).unwrap();

        assert_eq!(result.width(), 4);
        assert_eq!(result.height(), 5);

        // First pixel should be from position (2, 3) in the original
        // Value at (2, 3) = 3 * 10 + 2 = 32
        assert_eq!(result.pixel_at(0, 0).unwrap(), [32, 33, 34, 255]);
        // Last pixel from (5, 7) = 75
        assert_eq!(result.pixel_at(3, 4).unwrap(), [75, 76, 77, 255]);
    }

    #[test]
    fn test_single_pixel_extract() {
        let img = test_image(4, 4);
        let result = extract_rect(&img, Rect::new(3, 3, 1, 1)).unwrap();
        assert_eq!(result.as_bytes(), &[15, 16, 17, 255]);
    }

    #[test]
    fn test_extract_preserves_alpha() {
        let data = vec![1, 2, 3, 0, 4, 5, 6, 77, 7, 8, 9, 128, 10, 11, 12, 0];
        let img = PixelBuffer::new(2, 2, data).unwrap();
        let result = extract_rect(&img, Rect::new(1, 0, 1, 2)).unwrap();
        assert_eq!(result.as_bytes(), &[4, 5, 6, 77, 10, 11, 12, 0]);
    }

    #[test]
    fn test_extract_out_of_bounds() {
        let img = test_image(4, 4);
        for rect in [
            Rect::new(3, 0, 2, 1),
            Rect::new(0, 3, 1, 2),
            Rect::new(4, 4, 1, 1),
            Rect::new(0, 0, 5, 4),
        ] {
            assert!(matches!(
                extract_rect(&img, rect),
                Err(CropError::RectangleOutOfBounds { .. })
            ));
        }
    }

    #[test]
    fn test_extract_empty_rect() {
        let img = test_image(4, 4);
        assert!(extract_rect(&img, Rect::new(1, 1, 0, 2)).is_err());
        assert!(extract_rect(&img, Rect::new(1, 1, 2, 0)).is_err());
    }

    #[test]
    fn test_extract_overflowing_rect() {
        let img = test_image(4, 4);
        assert!(extract_rect(&img, Rect::new(u32::MAX, 0, 2, 1)).is_err());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::crop::scan_bounds;
    use proptest::prelude::*;

    /// Strategy for an image with a visible block placed somewhere inside it.
    fn framed_strategy() -> impl Strategy<Value = (PixelBuffer, Rect)> {
        (2u32..=30, 2u32..=30)
            .prop_flat_map(|(w, h)| (Just(w), Just(h), 0..w, 0..h))
            .prop_flat_map(|(w, h, x, y)| (Just(w), Just(h), Just(x), Just(y), 1..=w - x, 1..=h - y))
            .prop_map(|(w, h, x, y, rw, rh)| {
                let rect = Rect::new(x, y, rw, rh);
                let mut data = vec![0u8; (w * h * 4) as usize];
                for py in 0..h {
                    for px in 0..w {
                        let idx = ((py * w + px) * 4) as usize;
                        data[idx] = (px * 3 + py) as u8;
                        data[idx + 1] = py as u8;
                        if rect.contains(px, py) {
                            data[idx + 3] = 1 + ((px + py) % 255) as u8;
                        }
                    }
                }
                (PixelBuffer::new(w, h, data).unwrap(), rect)
            })
    }

    proptest! {
        /// Property: scan finds exactly the visible block.
        #[test]
        fn prop_scan_finds_block((img, rect) in framed_strategy()) {
            prop_assert_eq!(scan_bounds(&img), Some(rect));
        }

        /// Property: extracted pixels match the source at their offset.
        #[test]
        fn prop_extracted_pixels_match_source((img, rect) in framed_strategy()) {
            let out = extract_rect(&img, rect).unwrap();
            prop_assert_eq!(out.width(), rect.width);
            prop_assert_eq!(out.height(), rect.height);
            prop_assert_eq!(out.as_bytes().len(), (rect.width * rect.height * 4) as usize);
            for j in 0..rect.height {
                for i in 0..rect.width {
                    prop_assert_eq!(
                        out.pixel_at(i, j).unwrap(),
                        img.pixel_at(rect.x + i, rect.y + j).unwrap()
                    );
                }
            }
        }

        /// Property: re-scanning a crop yields its full extent.
        #[test]
        fn prop_crop_is_maximal((img, _rect) in framed_strategy()) {
            let found = scan_bounds(&img).unwrap();
            let out = extract_rect(&img, found).unwrap();
            prop_assert_eq!(scan_bounds(&out), Some(Rect::new(0, 0, out.width(), out.height())));
        }
    }
}
