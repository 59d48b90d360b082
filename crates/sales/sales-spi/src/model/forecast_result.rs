//! Forecast result model

use chrono::NaiveDate;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Date format used for forecast keys
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One day of a forecast
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastPoint {
    /// Day the value applies to
    pub date: NaiveDate,
    /// Predicted value, rounded to 2 decimals
    pub value: f64,
}

impl ForecastPoint {
    /// The date formatted as `YYYY-MM-DD`
    pub fn label(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

/// Ordered date → value mapping, start date first
///
/// Serializes as a JSON object whose keys keep insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForecastResult {
    points: Vec<ForecastPoint>,
}

impl ForecastResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
        }
    }

    /// Append a day to the end of the forecast
    pub fn push(&mut self, date: NaiveDate, value: f64) {
        self.points.push(ForecastPoint { date, value });
    }

    pub fn points(&self) -> &[ForecastPoint] {
        &self.points
    }

    /// Value for a given date label, if present
    pub fn get(&self, label: &str) -> Option<f64> {
        self.points
            .iter()
            .find(|p| p.label() == label)
            .map(|p| p.value)
    }

    /// Date labels in order
    pub fn labels(&self) -> Vec<String> {
        self.points.iter().map(ForecastPoint::label).collect()
    }

    /// Values in order
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl Serialize for ForecastResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.points.len()))?;
        for point in &self.points {
            map.serialize_entry(&point.label(), &point.value)?;
        }
        map.end()
    }
}
