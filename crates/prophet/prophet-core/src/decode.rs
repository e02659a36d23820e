//! Decoding of the engine's concatenated JSON output.

use prophet_spi::{ForecastPoint, ForecastSequence, ProphetError, Result};
use serde_json::Deserializer;

/// Decode a buffer holding zero or more back-to-back JSON forecast records.
///
/// Values need no enclosing array and no separator other than optional
/// whitespace. The first malformed or truncated value fails the whole
/// buffer; records decoded before it are dropped.
pub fn decode_forecast_stream(bytes: &[u8]) -> Result<ForecastSequence> {
    Deserializer::from_slice(bytes)
        .into_iter::<ForecastPoint>()
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|source| ProphetError::Decode { source })
}
