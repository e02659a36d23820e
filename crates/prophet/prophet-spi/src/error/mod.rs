//! Error module containing error types and result aliases

mod input_error;
mod prophet_error;

pub use input_error::InputError;
pub use prophet_error::ProphetError;

/// Result type for adapter operations
pub type Result<T> = std::result::Result<T, ProphetError>;
