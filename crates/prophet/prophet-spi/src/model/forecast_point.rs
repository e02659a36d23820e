//! Forecast records produced by the engine

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Forecast sequence in engine emission order.
pub type ForecastSequence = Vec<ForecastPoint>;

/// One forecast record as emitted by the engine.
///
/// Fields absent from a record decode as `0.0`; JSON `null` (how the engine
/// writes NaN) decodes as `f64::NAN`. Component columns outside the fixed
/// set, such as `weekly` or `yearly`, land in [`ForecastPoint::extra`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastPoint {
    /// Timestamp, epoch milliseconds as written by the engine
    pub ds: i64,
    #[serde(deserialize_with = "nullable_f64")]
    pub trend: f64,
    #[serde(deserialize_with = "nullable_f64")]
    pub yhat_lower: f64,
    #[serde(deserialize_with = "nullable_f64")]
    pub yhat_upper: f64,
    #[serde(deserialize_with = "nullable_f64")]
    pub trend_lower: f64,
    #[serde(deserialize_with = "nullable_f64")]
    pub trend_upper: f64,
    #[serde(deserialize_with = "nullable_f64")]
    pub additive_terms: f64,
    #[serde(deserialize_with = "nullable_f64")]
    pub additive_terms_lower: f64,
    #[serde(deserialize_with = "nullable_f64")]
    pub additive_terms_upper: f64,
    #[serde(deserialize_with = "nullable_f64")]
    pub daily: f64,
    #[serde(deserialize_with = "nullable_f64")]
    pub daily_lower: f64,
    #[serde(deserialize_with = "nullable_f64")]
    pub daily_upper: f64,
    #[serde(deserialize_with = "nullable_f64")]
    pub multiplicative_terms: f64,
    #[serde(deserialize_with = "nullable_f64")]
    pub multiplicative_terms_lower: f64,
    #[serde(deserialize_with = "nullable_f64")]
    pub multiplicative_terms_upper: f64,
    /// Final prediction
    #[serde(deserialize_with = "nullable_f64")]
    pub yhat: f64,
    /// Additional components emitted by the engine
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl ForecastPoint {
    /// Look up an additional numeric component (e.g. `"weekly"`).
    pub fn component(&self, name: &str) -> Option<f64> {
        self.extra.get(name).and_then(serde_json::Value::as_f64)
    }

    /// Whether `value` falls inside the prediction interval.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.yhat_lower && value <= self.yhat_upper
    }
}

fn nullable_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}
