//! Regressor contract for pre-trained models
//!
//! Defines the single inference interface both sales models expose.

use crate::error::Result;
use crate::model::FeatureRow;

/// A pre-trained regression model
///
/// Models are loaded once and are read-only afterwards, so implementations
/// must be shareable across threads. The model declares the feature names
/// it was trained on, in training order; callers build a [`FeatureRow`]
/// by name and the row is aligned to that order before inference.
///
/// # Example
///
/// ```rust,ignore
/// use sales_spi::{FeatureRow, Regressor};
///
/// fn score<R: Regressor>(model: &R, day: f64) -> sales_spi::Result<f64> {
///     let mut row = FeatureRow::new();
///     row.push("day", day);
///     model.predict(&row)
/// }
/// ```
pub trait Regressor: Send + Sync {
    /// Human-readable model kind, e.g. `"linear"`
    fn kind(&self) -> &str;

    /// Feature names in the order the model was trained on
    fn feature_names(&self) -> &[String];

    /// Predict a single value for one feature row
    ///
    /// # Returns
    ///
    /// The model output, or [`crate::SalesError::FeatureMismatch`] if the
    /// row is missing a trained feature
    fn predict(&self, row: &FeatureRow) -> Result<f64>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SalesError;
    use std::sync::Arc;

    // ==========================================================================
    // Mock Implementations for Testing Trait Definitions
    // ==========================================================================

    /// Sums the trained features of a row
    struct MockSumRegressor {
        features: Vec<String>,
    }

    impl MockSumRegressor {
        fn new(features: &[&str]) -> Self {
            Self {
                features: features.iter().map(|f| f.to_string()).collect(),
            }
        }
    }

    impl Regressor for MockSumRegressor {
        fn kind(&self) -> &str {
            "sum"
        }

        fn feature_names(&self) -> &[String] {
            &self.features
        }

        fn predict(&self, row: &FeatureRow) -> Result<f64> {
            Ok(row.aligned(&self.features)?.iter().sum())
        }
    }

    #[test]
    fn test_mock_regressor_predicts_sum() {
        let model = MockSumRegressor::new(&["a", "b"]);
        let mut row = FeatureRow::new();
        row.push("b", 2.0);
        row.push("a", 1.5);
        row.push("ignored", 100.0);

        assert_eq!(model.predict(&row).unwrap(), 3.5);
    }

    #[test]
    fn test_mock_regressor_reports_missing_feature() {
        let model = MockSumRegressor::new(&["a", "b"]);
        let mut row = FeatureRow::new();
        row.push("a", 1.0);

        let err = model.predict(&row).unwrap_err();
        assert_eq!(
            err,
            SalesError::FeatureMismatch {
                feature: "b".to_string()
            }
        );
    }

    #[test]
    fn test_regressor_is_object_safe_and_shareable() {
        let model: Arc<dyn Regressor> = Arc::new(MockSumRegressor::new(&["x"]));
        let shared = Arc::clone(&model);

        let handle = std::thread::spawn(move || {
            let mut row = FeatureRow::new();
            row.push("x", 4.0);
            shared.predict(&row).unwrap()
        });

        assert_eq!(handle.join().unwrap(), 4.0);
        assert_eq!(model.kind(), "sum");
        assert_eq!(model.feature_names(), &["x".to_string()]);
    }
}
