//! Sales Core
//!
//! Core implementations for the sales forecasting service: calendar feature
//! derivation, store/item identifier decomposition, the training-time
//! categorical encoder, the pre-trained regressors and the two feature
//! builders that drive them.

pub mod calendar;
pub mod encoding;
pub mod forecaster;
pub mod identifiers;
pub mod models;
pub mod predictor;
pub mod service;

// Re-export SPI types for implementations
pub use sales_spi::{
    FeatureRow, ForecastPoint, ForecastResult, PredictionResult, Regressor, Result, SalesError,
    DATE_FORMAT,
};

// Re-export main types
pub use calendar::{parse_date, CalendarFeatures};
pub use encoding::CategoryEncoder;
pub use forecaster::{round2, NationalForecaster};
pub use identifiers::{CategoricalFields, ItemId, StoreId};
pub use models::{load_model, LinearModel, RandomForest, TreeNode};
pub use predictor::StoreItemPredictor;
pub use service::{ArtifactPaths, SalesService};
