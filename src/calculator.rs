//! Driver that reads an input file, prints the SOC trace, and reports failures.

use std::io::{self, Write};
use std::path::Path;

use tracing::info;

use crate::error::{TraceError, TraceResult};
use crate::io::export::TraceWriter;
use crate::io::reader::{REQUIRED_COLUMNS, Reading, read_csv};
use crate::soc::engine::SocEngine;
use crate::soc::model::SocModel;

/// Prefix of the single line printed when a calculation fails.
pub const FAILURE_PREFIX: &str = "Failed to calculate due to : ";

/// Outcome of one [`PowerCalculator::calculate`] call.
#[derive(Debug)]
pub struct Calculation {
    /// Data rows written before the calculation finished or failed.
    pub rows_written: usize,
    /// The failure that stopped the calculation, if any.
    pub error: Option<TraceError>,
}

impl Calculation {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Reads readings from a CSV file and writes their SOC trace.
pub struct PowerCalculator<M: SocModel> {
    engine: SocEngine<M>,
}

impl<M: SocModel> PowerCalculator<M> {
    pub fn new(engine: SocEngine<M>) -> Self {
        Self { engine }
    }

    /// Computes the trace for `path` and writes it to `out`.
    ///
    /// On success `out` receives `Time,Power,SOC` followed by one row per
    /// reading. Any trace failure is written to `out` as a single
    /// `Failed to calculate due to : <message>` line after whatever rows
    /// were already written, and is also returned in the [`Calculation`].
    ///
    /// # Errors
    ///
    /// Returns an `io::Error` only if the failure line itself cannot be
    /// written.
    pub fn calculate<W: Write>(&self, path: &Path, out: &mut W) -> io::Result<Calculation> {
        let mut writer = TraceWriter::new(&mut *out);
        let result = self.run(path, &mut writer);
        let rows_written = writer.rows_written();
        drop(writer);

        match result {
            Ok(()) => {
                info!(path = %path.display(), rows = rows_written, "trace complete");
                Ok(Calculation {
                    rows_written,
                    error: None,
                })
            }
            Err(err) => {
                writeln!(out, "{FAILURE_PREFIX}{err}")?;
                out.flush()?;
                Ok(Calculation {
                    rows_written,
                    error: Some(err),
                })
            }
        }
    }

    fn run<W: Write>(&self, path: &Path, writer: &mut TraceWriter<W>) -> TraceResult<()> {
        let rows = read_csv(path, Some(REQUIRED_COLUMNS))?;
        let readings = Reading::from_rows(&rows)?;

        writer.write_trace(self.engine.trace(&readings))
    }
}
