//! Loaded model handles shared by the server and the dashboard
//!
//! Artifacts are read once at startup; afterwards the service is immutable
//! and is handed out behind an `Arc`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use sales_spi::{ForecastResult, PredictionResult, Result};

use crate::encoding::CategoryEncoder;
use crate::forecaster::NationalForecaster;
use crate::identifiers::CATEGORICAL_FIELDS;
use crate::models::load_model;
use crate::predictor::StoreItemPredictor;

/// Locations of the model and encoder artifacts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub forecast_model: PathBuf,
    pub predictive_model: PathBuf,
    pub encoders: PathBuf,
}

impl ArtifactPaths {
    pub fn new(
        forecast_model: impl Into<PathBuf>,
        predictive_model: impl Into<PathBuf>,
        encoders: impl Into<PathBuf>,
    ) -> Self {
        Self {
            forecast_model: forecast_model.into(),
            predictive_model: predictive_model.into(),
            encoders: encoders.into(),
        }
    }

    /// Default artifact names inside a model directory.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(
            dir.join("linear_forecasting.json"),
            dir.join("random_predictive.json"),
            dir.join("encoders.csv"),
        )
    }
}

/// Both builders over one set of loaded artifacts
#[derive(Debug, Clone)]
pub struct SalesService {
    forecaster: NationalForecaster,
    predictor: StoreItemPredictor,
}

impl SalesService {
    pub fn new(forecaster: NationalForecaster, predictor: StoreItemPredictor) -> Self {
        Self {
            forecaster,
            predictor,
        }
    }

    /// Load every artifact; a missing or malformed one is
    /// [`sales_spi::SalesError::ModelUnavailable`].
    pub fn load(paths: &ArtifactPaths, horizon: usize) -> Result<Self> {
        let forecast_model = load_model(&paths.forecast_model)?;
        let predictive_model = load_model(&paths.predictive_model)?;

        let encoder = CategoryEncoder::from_csv_path(&paths.encoders)?;
        encoder.ensure_fields(&CATEGORICAL_FIELDS, &paths.encoders.display().to_string())?;
        tracing::info!(path = %paths.encoders.display(), "encoders loaded");

        let forecaster = NationalForecaster::new(forecast_model).with_horizon(horizon)?;
        let predictor = StoreItemPredictor::new(predictive_model, Arc::new(encoder));

        Ok(Self::new(forecaster, predictor))
    }

    /// National forecast for the configured horizon.
    pub fn forecast(&self, date: &str) -> Result<ForecastResult> {
        self.forecaster.forecast(date)
    }

    /// Store/item prediction for one date.
    pub fn predict(&self, date: &str, store_id: &str, item_id: &str) -> Result<PredictionResult> {
        self.predictor
            .predict(date, store_id, item_id)
            .map(PredictionResult::new)
    }

    pub fn forecaster(&self) -> &NationalForecaster {
        &self.forecaster
    }

    pub fn predictor(&self) -> &StoreItemPredictor {
        &self.predictor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const LINEAR: &str = r#"{
        "kind": "linear",
        "features": ["week_of_year", "day_of_year", "day_of_week", "day", "month", "year"],
        "coefficients": [0.0, 0.0, 10.0, 0.0, 0.0, 0.0],
        "intercept": 100.0
    }"#;

    const FOREST: &str = r#"{
        "kind": "random_forest",
        "features": ["day_of_week", "day", "month", "year", "item_id", "dept_id", "cat_id", "store_id", "state_id"],
        "trees": [{"feature": 7, "threshold": 0.5, "left": {"value": 1.0}, "right": {"value": 5.0}}]
    }"#;

    const ENCODERS: &str = "field,category\n\
        item_id,FOODS_1_001\n\
        dept_id,FOODS_1\n\
        cat_id,FOODS\n\
        store_id,CA_1\n\
        store_id,CA_2\n\
        state_id,CA\n";

    fn artifact_dir(encoders: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("linear_forecasting.json"), LINEAR).unwrap();
        fs::write(dir.path().join("random_predictive.json"), FOREST).unwrap();
        fs::write(dir.path().join("encoders.csv"), encoders).unwrap();
        dir
    }

    #[test]
    fn test_load_and_run_both_builders() {
        let dir = artifact_dir(ENCODERS);
        let service = SalesService::load(&ArtifactPaths::in_dir(dir.path()), 7).unwrap();

        let forecast = service.forecast("2024-01-01").unwrap();
        assert_eq!(forecast.len(), 7);
        assert_eq!(forecast.values(), vec![100.0, 110.0, 120.0, 130.0, 140.0, 150.0, 160.0]);

        let prediction = service.predict("2024-01-01", "CA_2", "FOODS_1_001").unwrap();
        assert_eq!(prediction, PredictionResult::new(5.0));
    }

    #[test]
    fn test_missing_artifact_is_fatal() {
        let dir = TempDir::new().unwrap();
        let err = SalesService::load(&ArtifactPaths::in_dir(dir.path()), 7).unwrap_err();
        assert_eq!(err.code(), "model_unavailable");
        assert!(err.to_string().contains("linear_forecasting.json"));
    }

    #[test]
    fn test_encoder_without_every_field_is_fatal() {
        let dir = artifact_dir("field,category\nstate_id,CA\n");
        let err = SalesService::load(&ArtifactPaths::in_dir(dir.path()), 7).unwrap_err();
        assert!(err.to_string().contains("no vocabulary for field 'item_id'"));
    }

    #[test]
    fn test_zero_horizon_is_fatal() {
        let dir = artifact_dir(ENCODERS);
        let err = SalesService::load(&ArtifactPaths::in_dir(dir.path()), 0).unwrap_err();
        assert_eq!(err.code(), "invalid_parameter");
    }
}
