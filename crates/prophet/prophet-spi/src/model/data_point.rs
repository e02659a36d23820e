//! Observed samples sent to the engine

use serde::ser::Error as _;
use serde::{Deserialize, Serialize, Serializer};

/// One observed sample: an opaque timestamp label and its value.
///
/// Serialized as `{"ds": label, "y": value}`. Non-finite values refuse to
/// serialize rather than being written as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    #[serde(rename = "ds")]
    label: String,
    #[serde(rename = "y", serialize_with = "serialize_finite")]
    value: f64,
}

impl DataPoint {
    /// Create a new data point.
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }

    /// Timestamp label, forwarded to the engine unchanged.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Observed value.
    pub fn value(&self) -> f64 {
        self.value
    }
}

fn serialize_finite<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if !value.is_finite() {
        return Err(S::Error::custom(format!(
            "value {} is not a finite number",
            value
        )));
    }
    serializer.serialize_f64(*value)
}

/// Ordered sequence of data points.
///
/// Order and duplicates are kept exactly as provided by the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset(Vec<DataPoint>);

impl Dataset {
    /// Create an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a data point.
    pub fn push(&mut self, point: DataPoint) {
        self.0.push(point);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn points(&self) -> &[DataPoint] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DataPoint> {
        self.0.iter()
    }
}

impl From<Vec<DataPoint>> for Dataset {
    fn from(points: Vec<DataPoint>) -> Self {
        Self(points)
    }
}

impl FromIterator<DataPoint> for Dataset {
    fn from_iter<I: IntoIterator<Item = DataPoint>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a DataPoint;
    type IntoIter = std::slice::Iter<'a, DataPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Dataset {
    type Item = DataPoint;
    type IntoIter = std::vec::IntoIter<DataPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
