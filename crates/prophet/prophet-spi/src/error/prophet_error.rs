//! Adapter error types

use thiserror::Error;

use super::InputError;

/// Errors that can occur while preparing, running or decoding a forecast
#[derive(Error, Debug)]
pub enum ProphetError {
    /// Malformed tabular input
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// The dataset could not be encoded as JSON
    #[error("Failed to serialize dataset: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The engine process could not be started
    #[error("Failed to launch '{program}': {source}")]
    ProcessLaunch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Feeding stdin or draining stdout of the engine failed
    #[error("Engine I/O failed: {0}")]
    ProcessIo(#[source] std::io::Error),

    /// The engine exited with a non-zero status
    #[error("Engine exited with code {code}")]
    ExitCode { code: i32 },

    /// The engine was terminated without an exit code (e.g. by a signal)
    #[error("Engine terminated abnormally: {status}")]
    Terminated { status: String },

    /// The engine output was not a sequence of valid forecast records
    #[error("Failed to decode engine output: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
    },

    /// Configuration could not be loaded
    #[error("Configuration error: {reason}")]
    Config { reason: String },
}

impl ProphetError {
    /// Exit code reported by the engine, if this is an exit-code failure.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            ProphetError::ExitCode { code } => Some(*code),
            _ => None,
        }
    }

    /// Whether the error came from reading the tabular input.
    pub fn is_input(&self) -> bool {
        matches!(self, ProphetError::Input(_))
    }
}
