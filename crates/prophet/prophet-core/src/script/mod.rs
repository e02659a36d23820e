//! Engine script run by the interpreter.

/// Python program run inline (`python3 -c`) by [`ProcessEngine`](crate::ProcessEngine).
///
/// Reads a JSON array of `{"ds", "y"}` records from stdin, fits Prophet with
/// the `--option=value` arguments, extends the frame by the requested future
/// periods and writes one JSON record per forecast row to stdout.
pub const FORECAST_SCRIPT: &str = include_str!("forecast.py");
