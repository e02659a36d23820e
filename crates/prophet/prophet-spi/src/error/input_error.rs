//! Dataset ingestion errors

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading a tabular dataset.
#[derive(Error, Debug)]
pub enum InputError {
    /// The source could not be opened
    #[error("Failed to open '{}': {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source could not be read or framed into rows
    #[error("Failed to read row{}: {reason}", .line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    Read { line: Option<u64>, reason: String },

    /// A row did not contain exactly two fields
    #[error("Malformed row at line {line}: expected 2 fields, got {} ({fields:?})", .fields.len())]
    MalformedRow { line: u64, fields: Vec<String> },

    /// The value column did not parse as a floating-point number
    #[error("Invalid value '{value}' at line {line}: {source}")]
    InvalidValue {
        line: u64,
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },
}

impl InputError {
    /// Line number the error refers to, when known.
    pub fn line(&self) -> Option<u64> {
        match self {
            InputError::Open { .. } => None,
            InputError::Read { line, .. } => *line,
            InputError::MalformedRow { line, .. } | InputError::InvalidValue { line, .. } => {
                Some(*line)
            }
        }
    }
}
