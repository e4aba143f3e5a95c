//! FASTA header parsing.
//!
//! A header yields its record identifier (first whitespace-delimited token
//! after `>`), and, when it looks like a BED-style interval
//! (`>chr1:1000-2000 comment`), the decomposed interval.

use crate::{trim_line_end, FastaError, FastaResult};
use regex::Regex;
use std::sync::OnceLock;

/// Header line marker
pub const HEADER_MARKER: u8 = b'>';

fn interval_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // trailing group keeps everything after the end coordinate, terminator included
        Regex::new(r"^>((?i:chr)[[:alnum:]]+):([0-9]+)-([0-9]+)((?s).*)$")
            .unwrap_or_else(|e| panic!("Error compiling interval header regex: {e}"))
    })
}

/// Genomic interval decomposed from a `>chrNAME:START-END<trailing>` header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interval {
    /// Chromosome token, including its `chr` prefix
    pub chrom: String,
    /// 0-based start
    pub start: u64,
    pub end: u64,
    /// Everything after the end coordinate, separator and line terminator included
    pub trailing: String,
}

impl Interval {
    /// Render the interval back into a header line
    pub fn to_header(&self) -> String {
        format!(">{}:{}-{}{}", self.chrom, self.start, self.end, self.trailing)
    }
}

/// A parsed FASTA header line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    raw: String,
    name: String,
    interval: Option<Interval>,
}

impl Header {
    /// Parse a raw header line, marker included
    ///
    /// Lines that do not start with `>` are rejected with
    /// [`FastaError::InvalidHeader`]. Headers that do not match the interval
    /// pattern are kept as opaque text.
    pub fn parse(line: &str) -> FastaResult<Self> {
        if line.as_bytes().first() != Some(&HEADER_MARKER) {
            return Err(FastaError::InvalidHeader(trim_line_end(line).to_string()));
        }

        Ok(Header {
            raw: line.to_string(),
            name: record_name(line).to_string(),
            interval: parse_interval(line),
        })
    }

    /// Record identifier
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The header line exactly as read
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn interval(&self) -> Option<&Interval> {
        self.interval.as_ref()
    }
}

/// First whitespace-delimited token after the marker; empty for a bare `>`
pub fn record_name(line: &str) -> &str {
    line.get(1..)
        .and_then(|rest| rest.split_whitespace().next())
        .unwrap_or("")
}

fn parse_interval(line: &str) -> Option<Interval> {
    let caps = interval_regex().captures(line)?;
    // coordinates too large for u64 leave the header opaque
    let start = caps[2].parse().ok()?;
    let end = caps[3].parse().ok()?;
    Some(Interval {
        chrom: caps[1].to_string(),
        start,
        end,
        trailing: caps[4].to_string(),
    })
}
