//! Index, select, extract, and write: the full subsampling run.

use crate::select::{select, SelectMode};
use crate::window::{Window, WindowedWriter, LINE_WIDTH};
use crate::{FastaReader, FastaResult};
use log::{debug, info};
use std::io::{BufRead, Seek, Write};

/// Settings for one subsampling run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubsampleOptions {
    pub seed: u64,
    /// Shuffle before splitting; `false` keeps file order and ignores `seed`
    pub random: bool,
    pub window: Window,
    pub line_width: usize,
}

impl Default for SubsampleOptions {
    fn default() -> Self {
        SubsampleOptions {
            seed: 1,
            random: true,
            window: Window::default(),
            line_width: LINE_WIDTH,
        }
    }
}

impl SubsampleOptions {
    pub fn mode(&self) -> SelectMode {
        if self.random {
            SelectMode::Random { seed: self.seed }
        } else {
            SelectMode::Ordered
        }
    }
}

/// Counts from a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubsampleReport {
    pub requested: usize,
    /// Records written to the sample output
    pub sample: usize,
    /// Records in the rest partition (written only when a rest output is given)
    pub rest: usize,
    pub clamped: bool,
}

/// Write `n` records of `reader` to `sample_out`, and optionally the others to `rest_out`
pub fn subsample<R, S, T>(
    reader: &mut FastaReader<R>,
    n: usize,
    options: &SubsampleOptions,
    sample_out: S,
    rest_out: Option<T>,
) -> FastaResult<SubsampleReport>
where
    R: BufRead + Seek,
    S: Write,
    T: Write,
{
    let selection = select(reader.index().names().to_vec(), n, options.mode());

    let mut writer =
        WindowedWriter::with_line_width(sample_out, options.window, options.line_width);
    write_partition(reader, &selection.sample, &mut writer)?;

    if let Some(rest_out) = rest_out {
        let mut writer =
            WindowedWriter::with_line_width(rest_out, options.window, options.line_width);
        write_partition(reader, &selection.rest, &mut writer)?;
        info!("Wrote {} records to the rest output", selection.rest.len());
    }

    Ok(SubsampleReport {
        requested: n,
        sample: selection.sample.len(),
        rest: selection.rest.len(),
        clamped: selection.clamped,
    })
}

fn write_partition<R, W>(
    reader: &mut FastaReader<R>,
    names: &[String],
    writer: &mut WindowedWriter<W>,
) -> FastaResult<()>
where
    R: BufRead + Seek,
    W: Write,
{
    for name in names {
        let record = reader.fetch_record(name)?;
        debug!("Writing {}", name);
        writer.write_record(&record)?;
    }
    writer.flush()
}
