//! CSV reader producing header-keyed rows and raw power readings.

use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::info;

use crate::error::{TraceError, TraceResult};

/// Column holding the `HH:MM` time of day.
pub const TIME_COLUMN: &str = "Time";
/// Column holding the signed integer power in kW.
pub const POWER_COLUMN: &str = "Power";
/// Columns the SOC engine needs.
pub const REQUIRED_COLUMNS: &[&str] = &[TIME_COLUMN, POWER_COLUMN];

const CSV_EXTENSION: &str = "csv";
const BOM: char = '\u{feff}';

/// One data row of the input file, keyed by header name in header order.
///
/// Values are kept as the raw strings found in the file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row {
    fields: Vec<(String, String)>,
}

impl Row {
    /// Builds a row from `(column, value)` pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Returns the raw value stored under `column`, if present.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    /// Iterates `(column, value)` pairs in header order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// A single power reading as found in the input file.
///
/// Neither field is parsed here; the SOC engine parses `time` as `HH:MM`
/// and `power` as a signed integer when it consumes the reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reading {
    /// Time of day, `HH:MM`, 24-hour.
    pub time: String,
    /// Power in kW as written in the file.
    pub power: String,
}

impl Reading {
    pub fn new(time: impl Into<String>, power: impl Into<String>) -> Self {
        Self {
            time: time.into(),
            power: power.into(),
        }
    }

    /// Extracts the `Time` and `Power` fields from a row.
    ///
    /// # Errors
    ///
    /// Returns `TraceError::MissingColumns` naming every absent column.
    pub fn from_row(row: &Row) -> TraceResult<Self> {
        match (row.get(TIME_COLUMN), row.get(POWER_COLUMN)) {
            (Some(time), Some(power)) => Ok(Self::new(time, power)),
            (time, power) => {
                let mut missing = Vec::new();
                if time.is_none() {
                    missing.push(TIME_COLUMN.to_string());
                }
                if power.is_none() {
                    missing.push(POWER_COLUMN.to_string());
                }
                Err(TraceError::MissingColumns { missing })
            }
        }
    }

    /// Converts every row, stopping at the first one lacking a required column.
    ///
    /// # Errors
    ///
    /// Returns `TraceError::MissingColumns` for the first incomplete row.
    pub fn from_rows(rows: &[Row]) -> TraceResult<Vec<Self>> {
        rows.iter().map(Self::from_row).collect()
    }
}

/// Reads a CSV file into header-keyed rows.
///
/// Checks, in order: the `.csv` extension, that the path is an existing
/// file, and (when `expected` is given) that every expected column is in
/// the header. The whole file is read before returning.
///
/// # Errors
///
/// Returns `InvalidFileType`, `FileNotFound`, `MissingColumns`, or a
/// wrapped csv/io error for malformed content.
pub fn read_csv(path: &Path, expected: Option<&[&str]>) -> TraceResult<Vec<Row>> {
    check_file(path)?;
    let file = File::open(path)?;
    let rows = read_rows(BufReader::new(file), expected)?;
    info!(path = %path.display(), rows = rows.len(), "read input file");
    Ok(rows)
}

/// Parses CSV content from any reader into header-keyed rows.
///
/// A leading UTF-8 byte order mark on the header is ignored.
///
/// # Errors
///
/// Returns `MissingColumns` if `expected` names a column absent from the
/// header, or a wrapped csv error for malformed content.
pub fn read_rows(reader: impl Read, expected: Option<&[&str]>) -> TraceResult<Vec<Row>> {
    let mut rdr = csv::ReaderBuilder::new().from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches(BOM).to_string())
        .collect();

    if let Some(expected) = expected {
        check_expected_fields(&headers, expected)?;
    }

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        rows.push(Row::from_pairs(
            headers.iter().map(String::as_str).zip(record.iter()),
        ));
    }
    Ok(rows)
}

fn check_file(path: &Path) -> TraceResult<()> {
    if path.extension().and_then(OsStr::to_str) != Some(CSV_EXTENSION) {
        return Err(TraceError::InvalidFileType {
            path: path.display().to_string(),
        });
    }
    if !path.is_file() {
        return Err(TraceError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    Ok(())
}

fn check_expected_fields(headers: &[String], expected: &[&str]) -> TraceResult<()> {
    let missing: Vec<String> = expected
        .iter()
        .filter(|name| !headers.iter().any(|h| h == *name))
        .map(|name| (*name).to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(TraceError::MissingColumns { missing })
    }
}
