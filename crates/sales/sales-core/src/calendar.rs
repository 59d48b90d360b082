//! Calendar feature derivation
//!
//! Turns a date into the calendar attributes both models were trained on.
//! Day-of-week counts from Monday = 0, day-of-year from January 1 = 1 and
//! the week number is the ISO-8601 week.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use sales_spi::{FeatureRow, Result, SalesError};

pub const WEEK_OF_YEAR: &str = "week_of_year";
pub const DAY_OF_YEAR: &str = "day_of_year";
pub const DAY_OF_WEEK: &str = "day_of_week";
pub const DAY: &str = "day";
pub const MONTH: &str = "month";
pub const YEAR: &str = "year";

/// Features of the national forecasting model, in training order
pub const FORECAST_FEATURES: [&str; 6] = [WEEK_OF_YEAR, DAY_OF_YEAR, DAY_OF_WEEK, DAY, MONTH, YEAR];

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Parse a request date.
///
/// Accepts `YYYY-MM-DD`, `YYYY/MM/DD`, RFC 3339 timestamps and naive
/// `YYYY-MM-DD[T ]HH:MM:SS` timestamps; any time component is dropped.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(SalesError::InvalidDate {
            input: input.to_string(),
            reason: "date is empty".to_string(),
        });
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Ok(date);
        }
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(timestamp.date_naive());
    }
    for format in DATETIME_FORMATS {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(timestamp.date());
        }
    }

    Err(SalesError::InvalidDate {
        input: input.to_string(),
        reason: "expected a calendar date in YYYY-MM-DD format".to_string(),
    })
}

/// Calendar attributes of a single day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarFeatures {
    /// ISO-8601 week number (1-53)
    pub week_of_year: u32,
    /// Day of year (1-366)
    pub day_of_year: u32,
    /// Day of week (0 = Monday, 6 = Sunday)
    pub day_of_week: u32,
    /// Day of month (1-31)
    pub day: u32,
    /// Month (1-12)
    pub month: u32,
    pub year: i32,
}

impl CalendarFeatures {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            week_of_year: date.iso_week().week(),
            day_of_year: date.ordinal(),
            day_of_week: date.weekday().num_days_from_monday(),
            day: date.day(),
            month: date.month(),
            year: date.year(),
        }
    }

    /// Full calendar row consumed by the national forecasting model.
    pub fn forecast_row(&self) -> FeatureRow {
        FeatureRow::new()
            .with(WEEK_OF_YEAR, f64::from(self.week_of_year))
            .with(DAY_OF_YEAR, f64::from(self.day_of_year))
            .with(DAY_OF_WEEK, f64::from(self.day_of_week))
            .with(DAY, f64::from(self.day))
            .with(MONTH, f64::from(self.month))
            .with(YEAR, f64::from(self.year))
    }

    /// Append the date fields the store/item model uses.
    pub fn push_date_fields(&self, row: &mut FeatureRow) {
        row.push(DAY_OF_WEEK, f64::from(self.day_of_week));
        row.push(DAY, f64::from(self.day));
        row.push(MONTH, f64::from(self.month));
        row.push(YEAR, f64::from(self.year));
    }
}

impl From<NaiveDate> for CalendarFeatures {
    fn from(date: NaiveDate) -> Self {
        Self::from_date(date)
    }
}
