//! Linear regression over named features
//!
//! Evaluates `intercept + Σ coefficient_i * x_i` with the coefficients a
//! fitted ordinary-least-squares model exported.

use sales_spi::{FeatureRow, Regressor, Result, SalesError};
use serde::{Deserialize, Serialize};

/// Pre-trained linear model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModel {
    /// Feature names in training order
    features: Vec<String>,
    /// One coefficient per feature
    coefficients: Vec<f64>,
    /// Y-intercept
    intercept: f64,
}

impl LinearModel {
    /// Create a linear model from named coefficients
    pub fn new(features: Vec<String>, coefficients: Vec<f64>, intercept: f64) -> Result<Self> {
        let model = Self {
            features,
            coefficients,
            intercept,
        };
        model.validate("linear model")?;
        Ok(model)
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    pub(crate) fn validate(&self, source: &str) -> Result<()> {
        if self.features.is_empty() {
            return Err(SalesError::unavailable(source, "linear model has no features"));
        }
        if self.features.len() != self.coefficients.len() {
            return Err(SalesError::unavailable(
                source,
                format!(
                    "linear model has {} features but {} coefficients",
                    self.features.len(),
                    self.coefficients.len()
                ),
            ));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(SalesError::unavailable(
                source,
                "linear model has non-finite parameters",
            ));
        }
        Ok(())
    }
}

impl Regressor for LinearModel {
    fn kind(&self) -> &str {
        "linear"
    }

    fn feature_names(&self) -> &[String] {
        &self.features
    }

    fn predict(&self, row: &FeatureRow) -> Result<f64> {
        let values = row.aligned(&self.features)?;
        let prediction = self.intercept
            + values
                .iter()
                .zip(&self.coefficients)
                .map(|(x, c)| x * c)
                .sum::<f64>();

        if !prediction.is_finite() {
            return Err(SalesError::InferenceFailed(format!(
                "linear model produced {prediction}"
            )));
        }
        Ok(prediction)
    }
}
