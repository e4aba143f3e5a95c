//! Forward-only FASTA record stream, for input that cannot seek.

use crate::header::{Header, HEADER_MARKER};
use crate::{read_line_lossy, read_sequence, FastaResult};
use std::io::BufRead;

/// A FASTA record: its header and the concatenated sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaRecord {
    pub header: Header,
    pub sequence: String,
}

impl FastaRecord {
    /// Record identifier
    pub fn name(&self) -> &str {
        self.header.name()
    }
}

/// Iterator over the records of a buffered stream
///
/// Lines before the first header are skipped.
pub struct Records<R> {
    reader: R,
    buf: Vec<u8>,
}

impl<R: BufRead> Records<R> {
    pub fn new(reader: R) -> Self {
        Records {
            reader,
            buf: Vec::new(),
        }
    }

    fn next_record(&mut self) -> FastaResult<Option<FastaRecord>> {
        let line = loop {
            match read_line_lossy(&mut self.reader, &mut self.buf)? {
                None => return Ok(None),
                Some(line) if line.as_bytes()[0] == HEADER_MARKER => break line,
                Some(_) => continue,
            }
        };

        let header = Header::parse(&line)?;
        let sequence = read_sequence(&mut self.reader)?;
        Ok(Some(FastaRecord { header, sequence }))
    }
}

impl<R: BufRead> Iterator for Records<R> {
    type Item = FastaResult<FastaRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}
