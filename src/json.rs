//! Conversion of FASTA records into a JSON object.
//!
//! Each record becomes one entry mapping its header (the text after `>`,
//! line terminator removed) to an array of single-character strings. Keys
//! keep file order; a repeated header keeps its first position and takes the
//! last record's sequence.
//!
//! Bases are always emitted as quoted strings so the output parses as JSON;
//! there is no bare-token mode.

use crate::{trim_line_end, FastaResult, Records};
use serde_json::{Map, Value};
use std::io::{BufRead, Write};

/// Read every record of `reader` into a JSON object
pub fn records_to_json<R: BufRead>(reader: R) -> FastaResult<Value> {
    let mut object = Map::new();

    for record in Records::new(reader) {
        let record = record?;
        let key = trim_line_end(&record.header.raw()[1..]).to_string();
        let bases = record
            .sequence
            .chars()
            .map(|c| Value::String(c.to_string()))
            .collect();
        object.insert(key, Value::Array(bases));
    }

    Ok(Value::Object(object))
}

/// Convert `reader` and write the JSON object, followed by a newline, to `out`
pub fn write_json<R: BufRead, W: Write>(reader: R, mut out: W, pretty: bool) -> FastaResult<()> {
    let value = records_to_json(reader)?;
    if pretty {
        serde_json::to_writer_pretty(&mut out, &value)?;
    } else {
        serde_json::to_writer(&mut out, &value)?;
    }
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
