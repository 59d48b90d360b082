//! Model module containing data structures

mod feature_row;
mod forecast_result;
mod prediction_result;

pub use feature_row::FeatureRow;
pub use forecast_result::{ForecastPoint, ForecastResult, DATE_FORMAT};
pub use prediction_result::PredictionResult;
