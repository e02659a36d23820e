//! Model module containing data structures

mod data_point;
mod forecast_point;

pub use data_point::{DataPoint, Dataset};
pub use forecast_point::{ForecastPoint, ForecastSequence};
