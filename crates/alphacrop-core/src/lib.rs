//! alphacrop Core - transparent border cropping
//!
//! This crate trims the fully transparent margin off RGBA images and bundles
//! the results into a single ZIP archive.
//!
//! # Module Structure
//!
//! - `buffer` - Validated RGBA pixel buffer
//! - `crop` - Bounding-box scan and rectangle extraction
//! - `decode` / `encode` - `image`-backed codec adapters (any input, PNG out)
//! - `batch` - Order-preserving batch pipeline with cancellation
//! - `archive` - ZIP assembly of named results
//!
//! # Usage
//!
//! ```ignore
//! use alphacrop_core::{assemble_archive, process_batch, ArchiveOptions, BatchConfig,
//!     BatchItem, CancelToken, PngCodec};
//!
//! let items = vec![BatchItem::new("logo.png", "image/png", std::fs::read("logo.png")?)];
//! let report = process_batch(&items, &BatchConfig::default(), &PngCodec, &CancelToken::new())?;
//! let zip = assemble_archive(report.archive_entries(), &ArchiveOptions::default())?;
//! ```

pub mod archive;
pub mod batch;
pub mod buffer;
pub mod crop;
pub mod decode;
pub mod encode;

pub use archive::{
    assemble_archive, ArchiveEntry, ArchiveError, ArchiveOptions, Compression,
    DEFAULT_ARCHIVE_NAME,
};
pub use batch::{
    process_batch, BatchConfig, BatchError, BatchItem, BatchReport, CancelToken, CropResult,
    ItemError, ItemFailure, PngCodec, RasterCodec,
};
pub use buffer::{BufferError, PixelBuffer};
pub use crop::{crop_to_content, extract_rect, scan_bounds, CropError, Rect};
