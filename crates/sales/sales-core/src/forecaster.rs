//! National sales forecaster
//!
//! Produces a sliding window of daily forecasts from calendar features
//! alone. Day `i` of the window is labelled `start + i` days and its
//! features are computed from that same date, so the label and the feature
//! date always advance together.

use std::sync::Arc;

use chrono::{Days, NaiveDate};
use sales_spi::{FeatureRow, ForecastResult, Regressor, Result, SalesError};

use crate::calendar::{parse_date, CalendarFeatures};

/// Round to 2 decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Multi-day forecaster over the national model
#[derive(Clone)]
pub struct NationalForecaster {
    model: Arc<dyn Regressor>,
    horizon: usize,
}

impl NationalForecaster {
    /// Days forecast when no horizon is configured
    pub const DEFAULT_HORIZON: usize = 7;

    pub fn new(model: Arc<dyn Regressor>) -> Self {
        Self {
            model,
            horizon: Self::DEFAULT_HORIZON,
        }
    }

    /// Set the number of days per forecast (at least 1).
    pub fn with_horizon(mut self, horizon: usize) -> Result<Self> {
        validate_horizon(horizon)?;
        self.horizon = horizon;
        Ok(self)
    }

    pub fn horizon(&self) -> usize {
        self.horizon
    }

    pub fn model(&self) -> &Arc<dyn Regressor> {
        &self.model
    }

    /// Forecast the configured horizon starting at a date string.
    pub fn forecast(&self, start: &str) -> Result<ForecastResult> {
        self.forecast_from(parse_date(start)?)
    }

    /// Forecast the configured horizon starting at `start`.
    pub fn forecast_from(&self, start: NaiveDate) -> Result<ForecastResult> {
        self.forecast_days(start, self.horizon)
    }

    /// Forecast `days` consecutive days starting at `start`.
    pub fn forecast_days(&self, start: NaiveDate, days: usize) -> Result<ForecastResult> {
        validate_horizon(days)?;

        let mut result = ForecastResult::with_capacity(days);
        for offset in 0..days {
            let date = start
                .checked_add_days(Days::new(offset as u64))
                .ok_or_else(|| SalesError::InvalidDate {
                    input: start.to_string(),
                    reason: format!("{offset} days past the start is outside the calendar"),
                })?;

            let row = Self::features_for(date);
            let value = self.model.predict(&row)?;
            tracing::debug!(%date, ?row, value, "forecast day");
            result.push(date, round2(value));
        }
        Ok(result)
    }

    /// Feature row for a single forecast day.
    pub fn features_for(date: NaiveDate) -> FeatureRow {
        CalendarFeatures::from_date(date).forecast_row()
    }
}

fn validate_horizon(days: usize) -> Result<()> {
    if days == 0 {
        return Err(SalesError::InvalidParameter {
            name: "horizon".to_string(),
            reason: "must forecast at least one day".to_string(),
        });
    }
    Ok(())
}

impl std::fmt::Debug for NationalForecaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NationalForecaster")
            .field("model", &self.model.kind())
            .field("horizon", &self.horizon)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{DAY_OF_WEEK, DAY_OF_YEAR, FORECAST_FEATURES};
    use crate::models::LinearModel;

    /// Echoes day-of-year plus a third so rounding is observable
    fn day_of_year_model() -> Arc<dyn Regressor> {
        let features: Vec<String> = FORECAST_FEATURES.iter().map(|f| f.to_string()).collect();
        let coefficients = FORECAST_FEATURES
            .iter()
            .map(|f| if *f == DAY_OF_YEAR { 1.0 } else { 0.0 })
            .collect();
        Arc::new(LinearModel::new(features, coefficients, 1.0 / 3.0).unwrap())
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.234), 1.23);
        assert_eq!(round2(1.235_000_1), 1.24);
        assert_eq!(round2(-2.5551), -2.56);
        assert_eq!(round2(10.0), 10.0);
    }

    #[test]
    fn test_forecast_has_seven_consecutive_days() {
        let forecaster = NationalForecaster::new(day_of_year_model());
        let result = forecaster.forecast("2024-01-01").unwrap();

        assert_eq!(
            result.labels(),
            vec![
                "2024-01-01",
                "2024-01-02",
                "2024-01-03",
                "2024-01-04",
                "2024-01-05",
                "2024-01-06",
                "2024-01-07",
            ]
        );
    }

    #[test]
    fn test_features_advance_with_label() {
        let forecaster = NationalForecaster::new(day_of_year_model());
        let result = forecaster.forecast("2024-01-01").unwrap();

        // day_of_year 1..=7 plus 0.33
        let expected: Vec<f64> = (1..=7).map(|d| (d * 100 + 33) as f64 / 100.0).collect();
        assert_eq!(result.values(), expected);

        let second_day = NationalForecaster::features_for(result.points()[1].date);
        assert_eq!(second_day.get(DAY_OF_WEEK), Some(1.0));
    }

    #[test]
    fn test_values_have_two_decimals() {
        let forecaster = NationalForecaster::new(day_of_year_model());
        for point in forecaster.forecast("2023-06-10").unwrap().points() {
            assert_eq!(round2(point.value), point.value);
        }
    }

    #[test]
    fn test_forecast_crosses_year_end() {
        let forecaster = NationalForecaster::new(day_of_year_model());
        let result = forecaster.forecast("2023-12-29").unwrap();
        assert_eq!(result.labels().first().unwrap(), "2023-12-29");
        assert_eq!(result.labels().last().unwrap(), "2024-01-04");
        assert_eq!(result.get("2024-01-01"), Some(1.33));
    }

    #[test]
    fn test_invalid_date() {
        let forecaster = NationalForecaster::new(day_of_year_model());
        assert_eq!(
            forecaster.forecast("not-a-date").unwrap_err().code(),
            "invalid_date"
        );
    }

    #[test]
    fn test_custom_horizon() {
        let forecaster = NationalForecaster::new(day_of_year_model())
            .with_horizon(3)
            .unwrap();
        assert_eq!(forecaster.horizon(), 3);
        assert_eq!(forecaster.forecast("2024-05-01").unwrap().len(), 3);
    }

    #[test]
    fn test_zero_horizon_rejected() {
        let err = NationalForecaster::new(day_of_year_model())
            .with_horizon(0)
            .unwrap_err();
        assert_eq!(err.code(), "invalid_parameter");
    }

    #[test]
    fn test_calendar_overflow_is_invalid_date() {
        let forecaster = NationalForecaster::new(day_of_year_model());
        let err = forecaster.forecast_from(NaiveDate::MAX).unwrap_err();
        assert_eq!(err.code(), "invalid_date");
    }
}
