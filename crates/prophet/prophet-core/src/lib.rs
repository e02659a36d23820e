//! Prophet Core
//!
//! Implementations behind the adapter contracts: the CSV dataset loader,
//! the subprocess-backed engine, the engine output decoder and the
//! `Prophet` adapter that ties them together.

pub mod adapter;
pub mod decode;
pub mod engine;
pub mod loader;
pub mod script;

// Re-export SPI types for implementations
pub use prophet_spi::{
    DataPoint, Dataset, DatasetSource, ForecastEngine, ForecastPoint, ForecastSequence,
    InputError, ProphetError, Result,
};

// Re-export main types
pub use adapter::Prophet;
pub use decode::decode_forecast_stream;
pub use engine::ProcessEngine;
pub use loader::CsvDatasetLoader;
pub use script::FORECAST_SCRIPT;
