//! Error module containing error types and result aliases

mod sales_error;

pub use sales_error::SalesError;

/// Result type for sales operations
pub type Result<T> = std::result::Result<T, SalesError>;
