//! Contract module containing trait definitions for the adapter seams

mod dataset_source;
mod forecast_engine;

pub use dataset_source::DatasetSource;
pub use forecast_engine::ForecastEngine;
