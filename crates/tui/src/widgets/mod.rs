//! Reusable widgets for the dashboard.

mod chart;

pub use chart::{create_forecast_chart, forecast_points};
