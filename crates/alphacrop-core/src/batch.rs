//! Batch cropping pipeline.
//!
//! Every submitted item runs through the same stateless pipeline:
//!
//! 1. Skip it if its content type is not `image/*`
//! 2. Decode to an RGBA [`PixelBuffer`]
//! 3. Scan for the visible bounding box
//! 4. Extract the box, or fall back to the 1x1 transparent placeholder
//! 5. Encode the crop to PNG
//!
//! A failing item is reported in [`BatchReport::failures`] and never stops the
//! rest of the batch.
//!
//! ## Parallel Processing
//!
//! With the `parallel` feature, items are fanned out over a
//! [rayon](https://docs.rs/rayon) pool. Each item owns one result slot indexed
//! by its input position, so the report is in input order no matter which
//! item finishes first.
//!
//! ## Cancellation
//!
//! A [`CancelToken`] is checked before each item starts. Items that never
//! started are dropped from the report and [`BatchReport::cancelled`] is set;
//! results that were already produced are kept.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::archive::ArchiveEntry;
use crate::buffer::PixelBuffer;
use crate::crop::{crop_to_content, CropError, Rect};
use crate::decode::{decode_image, DecodeError};
use crate::encode::{encode_png, EncodeError};

/// Errors that abort the whole batch before any item runs.
#[derive(Error, Debug)]
pub enum BatchError {
    #[error("Thread count must be at least 1 when set")]
    InvalidThreads,
    #[error("Failed to build thread pool: {0}")]
    ThreadPool(String),
}

/// Why a single item produced no result.
#[derive(Error, Debug)]
pub enum ItemError {
    #[error("decode failed: {0}")]
    Decode(#[from] DecodeError),
    #[error("encode failed: {0}")]
    Encode(#[from] EncodeError),
    #[error("crop failed: {0}")]
    Crop(#[from] CropError),
}

/// Decode and encode collaborator for the pipeline.
///
/// Implementations must be `Sync` so items can share one codec across
/// worker threads.
pub trait RasterCodec: Sync {
    /// Decode raw file bytes into an RGBA buffer.
    fn decode(&self, bytes: &[u8]) -> Result<PixelBuffer, DecodeError>;

    /// Encode a buffer into storable file bytes.
    fn encode(&self, buffer: &PixelBuffer) -> Result<Vec<u8>, EncodeError>;
}

/// The production codec: decodes any supported format, writes PNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngCodec;

impl RasterCodec for PngCodec {
    fn decode(&self, bytes: &[u8]) -> Result<PixelBuffer, DecodeError> {
        decode_image(bytes)
    }

    fn encode(&self, buffer: &PixelBuffer) -> Result<Vec<u8>, EncodeError> {
        encode_png(buffer)
    }
}

/// One submitted file.
#[derive(Debug, Clone)]
pub struct BatchItem {
    pub name: String,
    /// MIME type as reported by the submitting surface (e.g. `image/png`).
    pub content_type: String,
    pub bytes: Arc<[u8]>,
}

impl BatchItem {
    pub fn new(
        name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Check if the declared content type is an image type.
    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }
}

/// A successfully cropped item.
#[derive(Debug, Clone)]
pub struct CropResult {
    /// Input name, used verbatim as the archive entry name.
    pub name: String,
    /// Detected content box, `None` when the placeholder was used.
    pub rect: Option<Rect>,
    pub cropped: PixelBuffer,
    /// Encoded crop, ready to be archived.
    pub encoded: Vec<u8>,
    /// The undecoded input, kept for side-by-side display.
    pub original: Arc<[u8]>,
}

impl CropResult {
    pub fn archive_entry(&self) -> ArchiveEntry {
        ArchiveEntry::new(self.name.clone(), self.encoded.clone())
    }
}

/// A failed item together with its input position.
#[derive(Debug)]
pub struct ItemFailure {
    pub index: usize,
    pub name: String,
    pub error: ItemError,
}

/// Everything a batch run produced, in input order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub results: Vec<CropResult>,
    pub failures: Vec<ItemFailure>,
    /// Names of items skipped for a non-image content type.
    pub skipped: Vec<String>,
    /// Set when cancellation dropped at least one unstarted item.
    pub cancelled: bool,
}

impl BatchReport {
    /// Archive entries for every produced result, in order.
    pub fn archive_entries(&self) -> Vec<ArchiveEntry> {
        self.results.iter().map(CropResult::archive_entry).collect()
    }

    /// Check if every submitted image was cropped.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty() && !self.cancelled
    }
}

/// Configuration for a batch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Process items concurrently. Ignored without the `parallel` feature.
    pub parallel: bool,
    /// Worker count for the pool; `None` lets rayon decide.
    pub threads: Option<usize>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            threads: None,
        }
    }
}

impl BatchConfig {
    /// Run everything on the calling thread.
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            threads: None,
        }
    }

    pub fn validate(&self) -> Result<(), BatchError> {
        if self.threads == Some(0) {
            return Err(BatchError::InvalidThreads);
        }
        Ok(())
    }
}

/// Cooperative cancellation flag shared between the caller and the batch.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the batch to stop before its next item.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// What happened to one input slot.
enum Outcome {
    Produced(CropResult),
    Failed(ItemFailure),
    Skipped(String),
    NotStarted,
}

/// Crop every item and collect the results in input order.
///
/// # Errors
///
/// Only configuration problems fail the whole batch. Per-item problems are
/// reported in [`BatchReport::failures`].
#[tracing::instrument(skip_all, fields(items = items.len(), parallel = config.parallel))]
pub fn process_batch<C>(
    items: &[BatchItem],
    config: &BatchConfig,
    codec: &C,
    cancel: &CancelToken,
) -> Result<BatchReport, BatchError>
where
    C: RasterCodec + ?Sized,
{
    config.validate()?;

    let outcomes = if config.parallel {
        run_parallel(items, config, codec, cancel)?
    } else {
        run_sequential(items, codec, cancel)
    };

    let report = merge(outcomes);
    tracing::info!(
        produced = report.results.len(),
        failed = report.failures.len(),
        skipped = report.skipped.len(),
        cancelled = report.cancelled,
        "batch finished"
    );
    Ok(report)
}

fn run_sequential<C>(items: &[BatchItem], codec: &C, cancel: &CancelToken) -> Vec<Outcome>
where
    C: RasterCodec + ?Sized,
{
    items
        .iter()
        .enumerate()
        .map(|(index, item)| run_item(index, item, codec, cancel))
        .collect()
}

#[cfg(feature = "parallel")]
fn run_parallel<C>(
    items: &[BatchItem],
    config: &BatchConfig,
    codec: &C,
    cancel: &CancelToken,
) -> Result<Vec<Outcome>, BatchError>
where
    C: RasterCodec + ?Sized,
{
    use rayon::prelude::*;

    let pool = build_thread_pool(config.threads)?;
    // Indexed collect writes each outcome into the slot of its input position
    Ok(pool.install(|| {
        items
            .par_iter()
            .enumerate()
            .map(|(index, item)| run_item(index, item, codec, cancel))
            .collect()
    }))
}

#[cfg(not(feature = "parallel"))]
fn run_parallel<C>(
    items: &[BatchItem],
    _config: &BatchConfig,
    codec: &C,
    cancel: &CancelToken,
) -> Result<Vec<Outcome>, BatchError>
where
    C: RasterCodec + ?Sized,
{
    tracing::debug!("built without the parallel feature, running sequentially");
    Ok(run_sequential(items, codec, cancel))
}

#[cfg(feature = "parallel")]
fn build_thread_pool(threads: Option<usize>) -> Result<rayon::ThreadPool, BatchError> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| BatchError::ThreadPool(e.to_string()))
}

fn run_item<C>(index: usize, item: &BatchItem, codec: &C, cancel: &CancelToken) -> Outcome
where
    C: RasterCodec + ?Sized,
{
    if cancel.is_cancelled() {
        return Outcome::NotStarted;
    }

    if !item.is_image() {
        tracing::debug!(index, name = %item.name, content_type = %item.content_type, "skipping non-image item");
        return Outcome::Skipped(item.name.clone());
    }

    match crop_item(item, codec) {
        Ok(result) => {
            tracing::debug!(index, name = %item.name, rect = ?result.rect, "cropped item");
            Outcome::Produced(result)
        }
        Err(error) => {
            tracing::warn!(index, name = %item.name, %error, "item failed");
            Outcome::Failed(ItemFailure {
                index,
                name: item.name.clone(),
                error,
            })
        }
    }
}

/// Steps 2 to 5 of the pipeline for one image item.
fn crop_item<C>(item: &BatchItem, codec: &C) -> Result<CropResult, ItemError>
where
    C: RasterCodec + ?Sized,
{
    let decoded = codec.decode(&item.bytes)?;
    let (rect, cropped) = crop_to_content(&decoded)?;
    drop(decoded);
    let encoded = codec.encode(&cropped)?;

    Ok(CropResult {
        name: item.name.clone(),
        rect,
        cropped,
        encoded,
        original: Arc::clone(&item.bytes),
    })
}

fn merge(outcomes: Vec<Outcome>) -> BatchReport {
    let mut report = BatchReport::default();
    for outcome in outcomes {
        match outcome {
            Outcome::Produced(result) => report.results.push(result),
            Outcome::Failed(failure) => report.failures.push(failure),
            Outcome::Skipped(name) => report.skipped.push(name),
            Outcome::NotStarted => report.cancelled = true,
        }
    }
    report
}
