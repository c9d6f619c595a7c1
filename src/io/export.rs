//! Plain-text output for SOC traces.
//!
//! Rows are written verbatim through [`TracePoint`]'s `Display`; the time
//! cell is echoed as read and never quoted.

use std::io::Write;

use crate::error::TraceResult;
use crate::soc::engine::TracePoint;

/// Output column header.
pub const HEADER: &str = "Time,Power,SOC";

/// Row-at-a-time trace writer.
///
/// Each row is flushed as soon as it is written, so rows emitted before a
/// failure reach the destination even if the trace is aborted.
pub struct TraceWriter<W: Write> {
    out: W,
    rows_written: usize,
}

impl<W: Write> TraceWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            rows_written: 0,
        }
    }

    /// Writes the header, then each row as `trace` yields it.
    ///
    /// Stops at the first error; rows written before it stay written and
    /// are counted by [`TraceWriter::rows_written`].
    ///
    /// # Errors
    ///
    /// Returns the first error produced by the trace or by the writer.
    pub fn write_trace<I>(&mut self, trace: I) -> TraceResult<()>
    where
        I: IntoIterator<Item = TraceResult<TracePoint>>,
    {
        writeln!(self.out, "{HEADER}")?;
        self.out.flush()?;
        for point in trace {
            self.write_point(&point?)?;
        }
        Ok(())
    }

    fn write_point(&mut self, point: &TracePoint) -> TraceResult<()> {
        writeln!(self.out, "{point}")?;
        self.out.flush()?;
        self.rows_written += 1;
        Ok(())
    }

    /// Number of data rows written so far (header excluded).
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }
}
