//! Tabular input and output for SOC traces.

/// SOC trace output.
pub mod export;
/// CSV row reader and reading extraction.
pub mod reader;

pub use export::{HEADER, TraceWriter};
pub use reader::{Reading, Row, read_csv, read_rows};
