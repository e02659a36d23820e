//! Forecast engine trait definition.

use crate::error::Result;

/// An out-of-process forecasting engine.
///
/// One call to [`execute`](ForecastEngine::execute) is one blocking run of
/// the engine. The engine receives the serialized dataset (a JSON array of
/// `{"ds", "y"}` objects) and the option arguments, and returns its raw
/// standard output.
///
/// The returned bytes are **zero or more JSON values written back to back**,
/// with no enclosing array and no separator beyond whitespace. They must be
/// read with a streaming JSON reader that can report "one value parsed,
/// more bytes remain"; a single whole-buffer parse will reject any output
/// holding more than one record.
///
/// Implementations map a failed start to `ProphetError::ProcessLaunch` and
/// a non-zero exit to `ProphetError::ExitCode`.
pub trait ForecastEngine: Send + Sync {
    /// Engine name, used in logs.
    fn name(&self) -> &str;

    /// Run the engine once with `payload` on stdin and `args` appended to
    /// its command line.
    fn execute(&self, payload: &[u8], args: &[String]) -> Result<Vec<u8>>;
}
