//! Prophet Facade
//!
//! High-level API for running Prophet forecasts through an external
//! process. Re-exports all public types from the prophet stack for
//! convenient usage.

// Re-export everything from API (which includes SPI)
pub use prophet_api::*;

// Explicit re-exports for documentation
pub use prophet_api::prelude;

// Re-export core modules for direct access
pub use prophet_core::{adapter, decode, engine, loader, script};

// Re-export implementation types at root
pub use prophet_core::{
    decode_forecast_stream, CsvDatasetLoader, ProcessEngine, Prophet, FORECAST_SCRIPT,
};
