//! Error kinds raised while reading readings and computing a SOC trace.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type TraceResult<T> = Result<T, TraceError>;

/// Every way a trace computation can fail.
///
/// All variants are raised eagerly; the first one aborts the trace.
#[derive(Error, Debug)]
pub enum TraceError {
    #[error("Invalid file type. Please provide a CSV file: {path}")]
    InvalidFileType { path: String },

    #[error("The file '{path}' does not exist. Please check the file path.")]
    FileNotFound { path: String },

    #[error("Missing column in csv file: {}", .missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    #[error("invalid power value \"{value}\": expected an integer (kW)")]
    InvalidPower { value: String },

    #[error("invalid time value \"{value}\": expected HH:MM")]
    InvalidTime { value: String },

    #[error("Invalid input: {what}")]
    InvalidInput { what: String },

    #[error("malformed csv: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl TraceError {
    pub(crate) fn invalid_input(what: impl Into<String>) -> Self {
        Self::InvalidInput { what: what.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_columns_lists_every_name() {
        let err = TraceError::MissingColumns {
            missing: vec!["Time".to_string(), "Power".to_string()],
        };
        assert_eq!(err.to_string(), "Missing column in csv file: Time, Power");
    }

    #[test]
    fn invalid_input_message() {
        let err = TraceError::invalid_input("'current_soc' should be between 0 and 1");
        assert_eq!(
            err.to_string(),
            "Invalid input: 'current_soc' should be between 0 and 1"
        );
    }
}
