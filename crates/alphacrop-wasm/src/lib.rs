//! alphacrop WASM - WebAssembly bindings for alphacrop
//!
//! This crate exposes the alphacrop-core batch cropping pipeline to
//! JavaScript/TypeScript applications. Everything runs in the browser; no file
//! ever leaves the page.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for pixel buffers and rectangles
//! - `crop` - Single-image bounding box and crop bindings
//! - `batch` - Batch submission, results and ZIP export
//!
//! # Usage
//!
//! ```typescript
//! import init, { CropBatch } from '@alphacrop/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const batch = new CropBatch();
//! batch.add_file(file.name, file.type, new Uint8Array(await file.arrayBuffer()));
//! const outcome = batch.process();
//! console.log(`Cropped ${outcome.count} images`);
//! ```

use wasm_bindgen::prelude::*;

mod batch;
mod crop;
mod types;

// Re-export public types
pub use batch::{CropBatch, CropOutcome};
pub use crop::{crop_image_bytes, crop_to_content, find_crop_rect};
pub use types::{JsPixelBuffer, JsRect};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Write a warning to the browser console.
///
/// Imported JS functions can't be called on native targets, so this is a
/// no-op outside wasm32.
pub(crate) fn console_warn(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&JsValue::from_str(message));
    #[cfg(not(target_arch = "wasm32"))]
    let _ = message;
}
