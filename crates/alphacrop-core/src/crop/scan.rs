//! Bounding-box detection over the alpha channel.

use super::Rect;
use crate::buffer::{PixelBuffer, CHANNELS};

/// Find the smallest rectangle enclosing every pixel with alpha > 0.
///
/// Every pixel is visited exactly once in row-major order. Partially
/// translucent pixels (alpha 1..=254) count as content. Returns `None` when the
/// buffer has no such pixel, including zero-sized buffers.
///
/// # Example
///
/// ```ignore
/// let rect = scan_bounds(&buffer);
/// if let Some(rect) = rect {
///     println!("content at {rect}");
/// }
/// ```
pub fn scan_bounds(buffer: &PixelBuffer) -> Option<Rect> {
    let mut min_x = u32::MAX;
    let mut min_y = u32::MAX;
    let mut max_x = 0u32;
    let mut max_y = 0u32;
    let mut found = false;

    for (y, row) in (0u32..).zip(buffer.rows()) {
        for (x, px) in (0u32..).zip(row.chunks_exact(CHANNELS)) {
            if px[3] > 0 {
                found = true;
                min_x = min_x.min(x);
                max_x = max_x.max(x);
                min_y = min_y.min(y);
                max_y = max_y.max(y);
            }
        }
    }

    found.then(|| Rect::new(min_x, min_y, max_x - min_x + 1, max_y - min_y + 1))
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for a small RGBA buffer with sparse visible pixels.
    fn buffer_strategy() -> impl Strategy<Value = PixelBuffer> {
        (1u32..=24, 1u32..=24).prop_flat_map(|(w, h)| {
            let n = (w * h) as usize;
            // Mostly transparent so boxes are not always the full image
            prop::collection::vec(prop_oneof![8 => Just(0u8), 1 => 1u8..=255], n..=n).prop_map(
                move |alphas| {
                    let mut data = Vec::with_capacity(n * 4);
                    for (i, a) in alphas.iter().enumerate() {
                        data.extend_from_slice(&[i as u8, 7, 42, *a]);
                    }
                    PixelBuffer::new(w, h, data).unwrap()
                },
            )
        })
    }

    fn visible(buf: &PixelBuffer) -> Vec<(u32, u32)> {
        let mut out = Vec::new();
        for y in 0..buf.height() {
            for x in 0..buf.width() {
                if buf.alpha_at(x, y).unwrap() > 0 {
                    out.push((x, y));
                }
            }
        }
        out
    }

    proptest! {
        /// Property: `None` exactly when no pixel is visible.
        #[test]
        fn prop_none_iff_transparent(buf in buffer_strategy()) {
            prop_assert_eq!(scan_bounds(&buf).is_none(), visible(&buf).is_empty());
        }

        /// Property: the rectangle fits the buffer and contains every visible pixel.
        #[test]
        fn prop_rect_contains_all_visible(buf in buffer_strategy()) {
            if let Some(rect) = scan_bounds(&buf) {
                prop_assert!(rect.fits_within(buf.width(), buf.height()));
                for (x, y) in visible(&buf) {
                    prop_assert!(rect.contains(x, y), "({}, {}) outside {}", x, y, rect);
                }
            }
        }

        /// Property: each edge of the rectangle touches a visible pixel.
        #[test]
        fn prop_rect_is_tight(buf in buffer_strategy()) {
            if let Some(rect) = scan_bounds(&buf) {
                let pts = visible(&buf);
                let right = rect.x + rect.width - 1;
                let bottom = rect.y + rect.height - 1;
                prop_assert!(pts.iter().any(|&(x, _)| x == rect.x));
                prop_assert!(pts.iter().any(|&(x, _)| x == right));
                prop_assert!(pts.iter().any(|&(_, y)| y == rect.y));
                prop_assert!(pts.iter().any(|&(_, y)| y == bottom));
            }
        }

        /// Property: scanning is deterministic.
        #[test]
        fn prop_scan_is_deterministic(buf in buffer_strategy()) {
            prop_assert_eq!(scan_bounds(&buf), scan_bounds(&buf));
        }
    }
}
