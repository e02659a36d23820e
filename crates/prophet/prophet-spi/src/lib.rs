//! Prophet Service Provider Interface
//!
//! Defines the engine and dataset-source contracts, the data transfer
//! models exchanged with the external forecasting engine, and the error
//! taxonomy shared by the whole stack.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::{DatasetSource, ForecastEngine};
pub use error::{InputError, ProphetError, Result};
pub use model::{DataPoint, Dataset, ForecastPoint, ForecastSequence};
