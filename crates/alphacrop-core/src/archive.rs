//! ZIP bundling of cropped images.
//!
//! Entries are written under their declared name. When two entries share a
//! name the later bytes replace the earlier ones and the archive keeps a single
//! entry at the position where the name first appeared. Callers that need
//! every input to survive must make names unique before assembling.
//!
//! Entry timestamps are pinned to the ZIP epoch (1980-01-01) so the same
//! entries always produce the same archive bytes.

use std::collections::HashMap;
use std::io::{Cursor, Write};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

/// Suggested file name for the downloadable bundle.
pub const DEFAULT_ARCHIVE_NAME: &str = "cropped_pngs.zip";

/// Errors that can occur while writing the archive.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A named blob inside the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl ArchiveEntry {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

/// Per-entry compression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    /// Store bytes as-is. PNG data is already compressed, so this is the
    /// fastest option with little size penalty.
    Stored,
    /// Deflate each entry.
    #[default]
    Deflated,
}

impl Compression {
    fn method(self) -> CompressionMethod {
        match self {
            Compression::Stored => CompressionMethod::Stored,
            Compression::Deflated => CompressionMethod::Deflated,
        }
    }
}

/// Options for archive assembly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveOptions {
    pub compression: Compression,
}

/// Build a ZIP archive from named entries.
///
/// Entries appear in input order; a repeated name overwrites the earlier
/// entry's bytes in place.
#[tracing::instrument(skip_all)]
pub fn assemble_archive<I>(entries: I, options: &ArchiveOptions) -> Result<Vec<u8>, ArchiveError>
where
    I: IntoIterator<Item = ArchiveEntry>,
{
    let entries = dedupe_by_name(entries);
    tracing::debug!(entries = entries.len(), compression = ?options.compression, "assembling archive");

    let file_options = SimpleFileOptions::default()
        .compression_method(options.compression.method())
        .last_modified_time(DateTime::default());

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for entry in &entries {
        zip.start_file(entry.name.as_str(), file_options)?;
        zip.write_all(&entry.bytes)?;
    }

    Ok(zip.finish()?.into_inner())
}

/// Collapse repeated names, keeping the first position and the last bytes.
fn dedupe_by_name<I>(entries: I) -> Vec<ArchiveEntry>
where
    I: IntoIterator<Item = ArchiveEntry>,
{
    let mut out: Vec<ArchiveEntry> = Vec::new();
    let mut slots: HashMap<String, usize> = HashMap::new();

    for entry in entries {
        match slots.get(&entry.name) {
            Some(&slot) => {
                tracing::debug!(name = %entry.name, "duplicate archive entry overwrites earlier one");
                out[slot].bytes = entry.bytes;
            }
            None => {
                slots.insert(entry.name.clone(), out.len());
                out.push(entry);
            }
        }
    }

    out
}
