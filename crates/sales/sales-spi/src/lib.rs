//! Sales Service Provider Interface
//!
//! Defines the regression model contract, the error taxonomy and the
//! feature/result types shared by the forecasting and predictive builders.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::Regressor;
pub use error::{Result, SalesError};
pub use model::{FeatureRow, ForecastPoint, ForecastResult, PredictionResult, DATE_FORMAT};
