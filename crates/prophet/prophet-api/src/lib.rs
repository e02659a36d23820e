//! Prophet Consumer API
//!
//! Configuration types for the forecast adapter.
//!
//! This crate provides:
//! - `ProphetConfig`, the engine options forwarded as command-line arguments
//! - `EngineConfig`, how the engine process is launched
//! - `Settings`, both of the above loaded from a JSON file
//! - Re-exports from SPI for convenience

pub mod config;

pub use config::{
    EngineConfig, ProphetConfig, Settings, CHANGEPOINT_PRIOR_SCALE, CHANGEPOINT_RANGE,
    DEFAULT_INTERPRETER, FUTURE_DATAFRAME_FREQ, FUTURE_DATAFRAME_PERIODS, INTERVAL_WIDTH,
    PYTHON_ENV_VAR,
};

// Re-export from SPI
pub use prophet_spi::{
    DataPoint, Dataset, DatasetSource, ForecastEngine, ForecastPoint, ForecastSequence,
    InputError, ProphetError, Result,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{EngineConfig, ProphetConfig, Settings};
    pub use prophet_spi::{
        DataPoint, Dataset, DatasetSource, ForecastEngine, ForecastPoint, ForecastSequence,
        InputError, ProphetError, Result,
    };
}
