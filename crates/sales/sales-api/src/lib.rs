//! Sales Consumer API
//!
//! Consumer configuration and bootstrap for the sales forecasting service.
//!
//! This crate provides:
//! - [`ServiceConfig`] with environment and builder construction
//! - The public endpoint catalogue shared by the server and the dashboard
//! - Re-exports from SPI and core for convenience

mod config;
mod endpoints;

pub use config::{ServiceConfig, ServiceConfigBuilder, DEFAULT_LOG_FILTER};
pub use endpoints::{objective, Endpoint, API_TITLE, ENDPOINTS, HEALTHY, WELCOME_MESSAGE};

// Re-export from core
pub use sales_core::{
    calendar, encoding, forecaster, identifiers, models, predictor, service, parse_date, round2,
    ArtifactPaths, CalendarFeatures, CategoricalFields, CategoryEncoder, ItemId, LinearModel,
    NationalForecaster, RandomForest, SalesService, StoreId, StoreItemPredictor, TreeNode,
};

// Re-export SPI types
pub use sales_spi::{
    FeatureRow, ForecastPoint, ForecastResult, PredictionResult, Regressor, Result, SalesError,
    DATE_FORMAT,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{Endpoint, ServiceConfig, ServiceConfigBuilder, ENDPOINTS, WELCOME_MESSAGE};
    pub use sales_core::{NationalForecaster, SalesService, StoreItemPredictor};
    pub use sales_spi::{
        FeatureRow, ForecastResult, PredictionResult, Regressor, Result, SalesError,
    };
}
