//! Image encoding for cropped output.
//!
//! Cropped buffers are always written as PNG: lossless and alpha-preserving,
//! so a cropped file decodes back to exactly the pixels that were extracted.
//!
//! # Examples
//!
//! ```ignore
//! use alphacrop_core::encode::encode_png;
//!
//! let png_bytes = encode_png(&buffer).unwrap();
//! println!("Encoded {} bytes", png_bytes.len());
//! ```

mod png;

pub use png::{encode_png, EncodeError, PNG_SIGNATURE};
