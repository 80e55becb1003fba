//! Batch submission bindings.
//!
//! JavaScript collects files into a [`CropBatch`], runs it once and reads the
//! cropped PNGs and the ZIP bundle back from the [`CropOutcome`].
//!
//! # Example
//!
//! ```typescript
//! import { CropBatch } from '@alphacrop/wasm';
//!
//! const batch = new CropBatch();
//! for (const file of input.files) {
//!   batch.add_file(file.name, file.type, new Uint8Array(await file.arrayBuffer()));
//! }
//!
//! const outcome = batch.process();
//! for (let i = 0; i < outcome.count; i++) {
//!   const png = outcome.cropped_png(i);
//!   showPreview(outcome.name(i), outcome.original(i), png);
//! }
//! for (const { name, reason } of outcome.failures()) {
//!   console.warn(`${name}: ${reason}`);
//! }
//!
//! saveAs(new Blob([outcome.archive()]), outcome.archive_name);
//! ```

use alphacrop_core::{
    assemble_archive, process_batch, ArchiveError, ArchiveOptions, BatchConfig, BatchError,
    BatchItem, BatchReport, CancelToken, PngCodec, DEFAULT_ARCHIVE_NAME,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::types::JsRect;

/// A collection of files waiting to be cropped.
#[wasm_bindgen]
#[derive(Default)]
pub struct CropBatch {
    items: Vec<BatchItem>,
    archive_options: ArchiveOptions,
}

#[wasm_bindgen]
impl CropBatch {
    #[wasm_bindgen(constructor)]
    pub fn new() -> CropBatch {
        Self::default()
    }

    /// Queue a file. Files whose `content_type` is not `image/*` are skipped
    /// when the batch runs.
    pub fn add_file(&mut self, name: String, content_type: String, bytes: Vec<u8>) {
        self.items.push(BatchItem::new(name, content_type, bytes));
    }

    /// Number of queued files
    #[wasm_bindgen(getter)]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if no file is queued
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drop all queued files
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Set archive options from a plain object, e.g. `{ compression: "stored" }`.
    pub fn set_archive_options(&mut self, options: JsValue) -> Result<(), JsValue> {
        self.archive_options =
            serde_wasm_bindgen::from_value(options).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(())
    }

    /// Crop every queued file.
    ///
    /// Files that fail to decode or encode are listed in
    /// `CropOutcome.failures()`; they never abort the batch.
    pub fn process(&self) -> Result<CropOutcome, JsValue> {
        self.run().map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl CropBatch {
    pub(crate) fn run(&self) -> Result<CropOutcome, BatchError> {
        // The browser main thread has no worker pool to fan out to
        let report = process_batch(
            &self.items,
            &BatchConfig::sequential(),
            &PngCodec,
            &CancelToken::new(),
        )?;

        for failure in &report.failures {
            crate::console_warn(&format!("alphacrop: failed to crop {}: {}", failure.name, failure.error));
        }

        Ok(CropOutcome {
            report,
            archive_options: self.archive_options,
        })
    }
}

/// A failed file as seen from JavaScript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureInfo {
    pub index: usize,
    pub name: String,
    pub reason: String,
}

/// Results of one batch run, in submission order.
#[wasm_bindgen]
pub struct CropOutcome {
    report: BatchReport,
    archive_options: ArchiveOptions,
}

#[wasm_bindgen]
impl CropOutcome {
    /// Number of cropped images
    #[wasm_bindgen(getter)]
    pub fn count(&self) -> usize {
        self.report.results.len()
    }

    /// Names of cropped images, in order
    pub fn names(&self) -> Vec<String> {
        self.report.results.iter().map(|r| r.name.clone()).collect()
    }

    pub fn name(&self, index: usize) -> Option<String> {
        self.report.results.get(index).map(|r| r.name.clone())
    }

    /// Detected content box, `undefined` if the image was fully transparent.
    pub fn rect(&self, index: usize) -> Option<JsRect> {
        self.report.results.get(index)?.rect.map(JsRect::from)
    }

    /// Cropped image as PNG bytes.
    pub fn cropped_png(&self, index: usize) -> Option<Vec<u8>> {
        self.report.results.get(index).map(|r| r.encoded.clone())
    }

    /// The submitted file bytes, for side-by-side display.
    pub fn original(&self, index: usize) -> Option<Vec<u8>> {
        self.report.results.get(index).map(|r| r.original.to_vec())
    }

    /// Names of files skipped for a non-image content type
    pub fn skipped(&self) -> Vec<String> {
        self.report.skipped.clone()
    }

    /// Failed files as an array of `{ index, name, reason }`.
    pub fn failures(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.failure_infos())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Build the ZIP bundle of all cropped images.
    ///
    /// Files sharing a name collapse into one entry holding the last one.
    pub fn archive(&self) -> Result<Vec<u8>, JsValue> {
        self.archive_bytes()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Suggested download name for the archive
    #[wasm_bindgen(getter)]
    pub fn archive_name(&self) -> String {
        DEFAULT_ARCHIVE_NAME.to_string()
    }
}

impl CropOutcome {
    pub(crate) fn failure_infos(&self) -> Vec<FailureInfo> {
        self.report
            .failures
            .iter()
            .map(|f| FailureInfo {
                index: f.index,
                name: f.name.clone(),
                reason: f.error.to_string(),
            })
            .collect()
    }

    pub(crate) fn archive_bytes(&self) -> Result<Vec<u8>, ArchiveError> {
        assemble_archive(self.report.archive_entries(), &self.archive_options)
    }
}
