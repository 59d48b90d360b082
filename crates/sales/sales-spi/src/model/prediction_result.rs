//! Store/item prediction result model

use serde::{Deserialize, Serialize};

/// Predicted sales for one (date, store, item) triple
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub prediction: f64,
}

impl PredictionResult {
    pub fn new(prediction: f64) -> Self {
        Self { prediction }
    }
}
