//! # fasub-rs
//!
//! Indexed random access, subsampling, and windowing of FASTA files.
//!
//! The input file is scanned once to record the byte offset of every header
//! line. Records are then re-read on demand by seeking straight to that
//! offset, which lets a subsample be emitted in any order without holding the
//! whole file in memory.
//!
//! ## Features
//!
//! - Single-pass indexing of identifier to header offset
//! - Seeded, reproducible random selection or file-order selection
//! - Offset/length windows with BED-style (`>chr1:1000-2000`) header rewriting
//! - Fixed-width line wrapping of emitted sequences
//! - Conversion of FASTA records into a JSON object
//!
//! ## Example
//!
//! ```rust,no_run
//! use fasub_rs::{subsample, FastaReader, SubsampleOptions};
//!
//! let mut reader = FastaReader::open("genome.fa")?;
//! let options = SubsampleOptions { seed: 42, ..Default::default() };
//!
//! let stdout = std::io::stdout();
//! let report = subsample(&mut reader, 10, &options, stdout.lock(), None::<std::io::Sink>)?;
//! eprintln!("sampled {} records", report.sample);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use log::{debug, info};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::path::Path;
use thiserror::Error;

pub mod header;
pub mod json;
pub mod records;
pub mod select;
pub mod subsample;
pub mod window;

pub use header::{Header, Interval};
pub use records::{FastaRecord, Records};
pub use select::{select, Selection, SelectMode};
pub use subsample::{subsample, SubsampleOptions, SubsampleReport};
pub use window::{Window, WindowedWriter, LINE_WIDTH};

/// Error types for FASTA operations
#[derive(Error, Debug)]
pub enum FastaError {
    #[error("Failed to open {path}: {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },
    #[error("Input is not seekable: {0}")]
    NotSeekable(String),
    #[error("cannot find target: {0}")]
    SequenceNotFound(String),
    #[error("Invalid header (missing '>'): {0}")]
    InvalidHeader(String),
    #[error("Duplicate record identifier: {0}")]
    DuplicateName(String),
    #[error("Invalid window: {0}")]
    InvalidWindow(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for FASTA operations
pub type FastaResult<T> = Result<T, FastaError>;

/// Strip a trailing `\n` or `\r\n` (any run of either)
pub(crate) fn trim_line_end(line: &str) -> &str {
    line.trim_end_matches(|c| c == '\n' || c == '\r')
}

/// Read one line as text, replacing invalid UTF-8; `None` at end of stream
pub(crate) fn read_line_lossy<R: BufRead>(
    reader: &mut R,
    buf: &mut Vec<u8>,
) -> FastaResult<Option<String>> {
    buf.clear();
    if reader.read_until(b'\n', buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(String::from_utf8_lossy(buf).into_owned()))
}

/// Concatenate sequence lines until the next header line or end of stream
///
/// The next header line is left unread in `reader`.
pub(crate) fn read_sequence<R: BufRead>(reader: &mut R) -> FastaResult<String> {
    let mut sequence = String::new();
    let mut buf = Vec::new();

    loop {
        let next = reader.fill_buf()?;
        if next.is_empty() || next[0] == header::HEADER_MARKER {
            break;
        }

        if let Some(line) = read_line_lossy(reader, &mut buf)? {
            sequence.push_str(trim_line_end(&line));
        }
    }

    Ok(sequence)
}

/// Identifier to header offset index of a FASTA stream
///
/// Holds the byte offset of every header line, relative to where indexing
/// started, and the identifiers in the order they appear in the file.
#[derive(Debug, Clone, Default)]
pub struct FastaIndex {
    offsets: HashMap<String, u64>,
    names: Vec<String>,
}

impl FastaIndex {
    /// Build the index with a single forward pass over `reader`
    ///
    /// The reader is consumed to its end. An identifier that appears twice is
    /// rejected with [`FastaError::DuplicateName`].
    pub fn build<R: BufRead>(reader: &mut R) -> FastaResult<Self> {
        let mut index = FastaIndex::default();
        let mut line = Vec::new();
        let mut offset: u64 = 0;

        loop {
            line.clear();
            let n = reader.read_until(b'\n', &mut line)?;
            if n == 0 {
                break;
            }

            if line[0] == header::HEADER_MARKER {
                let text = String::from_utf8_lossy(&line);
                let name = header::record_name(&text).to_string();
                if index.offsets.insert(name.clone(), offset).is_some() {
                    return Err(FastaError::DuplicateName(name));
                }
                index.names.push(name);
            }

            offset += n as u64;
        }

        info!("Indexed {} records ({} bytes)", index.len(), offset);
        Ok(index)
    }

    /// Number of records in the index
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Record identifiers in file order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Byte offset of the header line of `name`
    pub fn offset(&self, name: &str) -> Option<u64> {
        self.offsets.get(name).copied()
    }

    /// Check if the index contains the specified record
    pub fn contains(&self, name: &str) -> bool {
        self.offsets.contains_key(name)
    }
}

/// An open, indexed FASTA source
///
/// Owns both the seekable stream and the index built from it, so records can
/// be fetched by identifier in any order.
#[derive(Debug)]
pub struct FastaReader<R> {
    inner: R,
    /// Stream position the index offsets are relative to
    base: u64,
    index: FastaIndex,
}

impl FastaReader<BufReader<File>> {
    /// Open and index a FASTA file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the FASTA file
    ///
    /// # Returns
    ///
    /// The indexed reader, or an error if the file cannot be opened, is not a
    /// regular file (pipes, FIFOs, devices), or fails to index
    pub fn open<P: AsRef<Path>>(path: P) -> FastaResult<Self> {
        let path = path.as_ref();
        let open_error = |source| FastaError::Open {
            path: path.display().to_string(),
            source,
        };

        // checked before opening: opening a FIFO blocks until a writer appears
        let metadata = std::fs::metadata(path).map_err(open_error)?;
        if !metadata.is_file() {
            return Err(FastaError::NotSeekable(path.display().to_string()));
        }

        let file = File::open(path).map_err(open_error)?;
        Self::from_reader(BufReader::new(file))
    }
}

impl<R: BufRead + Seek> FastaReader<R> {
    /// Index a seekable stream from its current position
    ///
    /// Bytes before the current position are never read.
    pub fn from_reader(mut inner: R) -> FastaResult<Self> {
        let base = inner.stream_position()?;
        let index = FastaIndex::build(&mut inner)?;
        Ok(FastaReader { inner, base, index })
    }

    pub fn index(&self) -> &FastaIndex {
        &self.index
    }

    /// Fetch the header line and full sequence of a record
    ///
    /// # Arguments
    ///
    /// * `name` - Record identifier
    ///
    /// # Returns
    ///
    /// The record, or [`FastaError::SequenceNotFound`] if `name` is not indexed
    pub fn fetch_record(&mut self, name: &str) -> FastaResult<FastaRecord> {
        let offset = self
            .index
            .offset(name)
            .ok_or_else(|| FastaError::SequenceNotFound(name.to_string()))?;

        self.inner.seek(SeekFrom::Start(self.base + offset))?;

        let mut buf = Vec::new();
        let line = read_line_lossy(&mut self.inner, &mut buf)?.unwrap_or_default();
        let header = Header::parse(&line)?;
        let sequence = read_sequence(&mut self.inner)?;

        debug!("Fetched {} ({} bp) at offset {}", name, sequence.len(), offset);
        Ok(FastaRecord { header, sequence })
    }
}
