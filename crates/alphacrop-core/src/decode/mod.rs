//! Image decoding for the crop pipeline.
//!
//! Any container the `image` crate is built with (PNG, JPEG, GIF, BMP, WebP)
//! is sniffed from its magic bytes and converted to RGBA8, so images without
//! an alpha channel come out fully opaque.
//!
//! # Examples
//!
//! ```ignore
//! use alphacrop_core::decode::decode_image;
//!
//! let bytes = std::fs::read("sprite.png").unwrap();
//! let buffer = decode_image(&bytes).unwrap();
//! println!("Decoded {}x{} image", buffer.width(), buffer.height());
//! ```

mod raster;

pub use raster::{decode_image, DecodeError};
